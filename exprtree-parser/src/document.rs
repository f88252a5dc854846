//! Renders parse trees as structured documents.
//!
//! Each non-terminal becomes a single-key object mapping its symbol tag to the list of
//! its rendered children. Number terminals become integers when their digit run fits
//! in a `u64` and stay literal text otherwise; every other terminal renders as its
//! lexeme. Empty nodes render as `null`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::ast::Node;
use crate::tokenizer::{Token, TokenKind};

/// Renders the tree rooted at `node` as a structured document.
///
/// # Arguments
///
/// * `node` - The root of the tree to render.
pub fn to_structured_document(node: &Node) -> Value {
    match node {
        Node::NonTerminal { symbol, children } => {
            let rendered = children.iter().map(to_structured_document).collect();

            let mut record = Map::new();
            record.insert(symbol.tag().to_owned(), Value::Array(rendered));
            Value::Object(record)
        }
        Node::Terminal(token) => render_terminal(token),
        Node::Empty => Value::Null,
    }
}

/// Renders the tree rooted at `node` as two-space-indented JSON text.
///
/// # Arguments
///
/// * `node` - The root of the tree to render.
pub fn to_pretty_string(node: &Node) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_structured_document(node))
}

fn render_terminal(token: &Token) -> Value {
    match token.kind {
        TokenKind::Number => token
            .text
            .parse::<u64>()
            .map_or_else(|_| Value::String(token.text.clone()), Value::from),
        _ => Value::String(token.text.clone()),
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        to_structured_document(self).serialize(serializer)
    }
}
