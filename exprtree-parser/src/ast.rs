//! Defines the parse tree produced for arithmetic expressions. The tree mirrors the
//! grammar derivation exactly: each non-terminal holds the children of the one
//! production that was selected for it.

use std::fmt::Display;

use crate::tokenizer::Token;

/// Identifies a non-terminal symbol of the expression grammar.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Symbol {
    /// An expression: a term followed by an expression tail.
    Expr,
    /// The remainder of a sum: `+` or `-`, a term and another tail; or nothing.
    ExprTail,
    /// A term: a factor followed by a term tail.
    Term,
    /// The remainder of a product: `*`, a factor and another tail; or nothing.
    TermTail,
    /// A number, a negated factor or a parenthesized expression.
    Factor,
}

impl Symbol {
    /// Returns the one-letter tag naming this symbol in rendered documents.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Expr => "E",
            Self::ExprTail => "X",
            Self::Term => "T",
            Self::TermTail => "Y",
            Self::Factor => "F",
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Represents a node of the parse tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A grammar symbol expanded into the children of one of its productions.
    NonTerminal {
        /// The symbol that was expanded.
        symbol: Symbol,
        /// The matched production, in order.
        children: Vec<Node>,
    },
    /// A matched token.
    Terminal(Token),
    /// The empty production.
    Empty,
}

impl Node {
    /// Tag used for terminal nodes.
    pub const TERMINAL_TAG: &'static str = "TERM";
    /// Tag used for empty nodes.
    pub const EMPTY_TAG: &'static str = "EPS";

    /// Returns a new non-terminal node.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The expanded symbol.
    /// * `children` - The nodes of the selected production.
    pub const fn non_terminal(symbol: Symbol, children: Vec<Self>) -> Self {
        Self::NonTerminal { symbol, children }
    }

    /// Returns the tag of the node: the symbol tag for non-terminals, otherwise
    /// [`Self::TERMINAL_TAG`] or [`Self::EMPTY_TAG`].
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::NonTerminal { symbol, .. } => symbol.tag(),
            Self::Terminal(_) => Self::TERMINAL_TAG,
            Self::Empty => Self::EMPTY_TAG,
        }
    }

    /// Returns the symbol of a non-terminal node.
    pub const fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::NonTerminal { symbol, .. } => Some(*symbol),
            Self::Terminal(_) | Self::Empty => None,
        }
    }

    /// Returns the children of the node; leaves have none.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::NonTerminal { children, .. } => children,
            Self::Terminal(_) | Self::Empty => &[],
        }
    }

    /// Returns the matched tokens of the tree, in source order.
    pub fn terminals(&self) -> Terminals<'_> {
        Terminals { stack: vec![self] }
    }

    /// Returns the height of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Reconstructs expression text from the tree by concatenating the lexemes of its
    /// terminals. Whitespace is not preserved, but the result always tokenizes and
    /// parses back to an equal tree.
    pub fn to_source_text(&self) -> String {
        self.to_string()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in self.terminals() {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Self::Terminal(token)
    }
}

/// An iterator over the terminal tokens of a tree, in source order.
pub struct Terminals<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Terminals<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Terminal(token) => return Some(token),
                Node::NonTerminal { children, .. } => self.stack.extend(children.iter().rev()),
                Node::Empty => (),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TokenKind;
    use pretty_assertions::assert_eq;

    fn number(text: &str) -> Node {
        Token::new(TokenKind::Number, text).into()
    }

    fn op(kind: TokenKind) -> Node {
        Token::new(kind, kind.lexeme().unwrap_or_default()).into()
    }

    // -7*(2+30), as a term
    fn sample() -> Node {
        let inner = Node::non_terminal(
            Symbol::Expr,
            vec![
                Node::non_terminal(
                    Symbol::Term,
                    vec![
                        Node::non_terminal(Symbol::Factor, vec![number("2")]),
                        Node::non_terminal(Symbol::TermTail, vec![Node::Empty]),
                    ],
                ),
                Node::non_terminal(
                    Symbol::ExprTail,
                    vec![
                        op(TokenKind::Plus),
                        Node::non_terminal(
                            Symbol::Term,
                            vec![
                                Node::non_terminal(Symbol::Factor, vec![number("30")]),
                                Node::non_terminal(Symbol::TermTail, vec![Node::Empty]),
                            ],
                        ),
                        Node::non_terminal(Symbol::ExprTail, vec![Node::Empty]),
                    ],
                ),
            ],
        );

        Node::non_terminal(
            Symbol::Term,
            vec![
                Node::non_terminal(
                    Symbol::Factor,
                    vec![
                        op(TokenKind::Minus),
                        Node::non_terminal(Symbol::Factor, vec![number("7")]),
                    ],
                ),
                Node::non_terminal(
                    Symbol::TermTail,
                    vec![
                        op(TokenKind::Star),
                        Node::non_terminal(
                            Symbol::Factor,
                            vec![op(TokenKind::LeftParen), inner, op(TokenKind::RightParen)],
                        ),
                        Node::non_terminal(Symbol::TermTail, vec![Node::Empty]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn source_text_concatenates_terminals() {
        assert_eq!(sample().to_source_text(), "-7*(2+30)");
        assert_eq!(Node::Empty.to_source_text(), "");
    }

    #[test]
    fn terminals_in_source_order() {
        let texts: Vec<_> = sample().terminals().map(|t| t.text.clone()).collect();
        assert_eq!(texts, vec!["-", "7", "*", "(", "2", "+", "30", ")"]);
    }

    #[test]
    fn tags() {
        assert_eq!(sample().tag(), "T");
        assert_eq!(number("1").tag(), "TERM");
        assert_eq!(Node::Empty.tag(), "EPS");
        assert_eq!(sample().symbol(), Some(Symbol::Term));
        assert_eq!(Node::Empty.symbol(), None);
    }

    #[test]
    fn depth_counts_levels() {
        assert_eq!(Node::Empty.depth(), 1);
        assert_eq!(
            Node::non_terminal(Symbol::Factor, vec![number("1")]).depth(),
            2
        );
        // T > Y > F > E > X > T > F > TERM
        assert_eq!(sample().depth(), 8);
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(sample(), sample());
        assert_ne!(
            Node::non_terminal(Symbol::Factor, vec![number("1")]),
            Node::non_terminal(Symbol::Factor, vec![number("2")])
        );
        assert_ne!(
            Node::non_terminal(Symbol::TermTail, vec![Node::Empty]),
            Node::non_terminal(Symbol::ExprTail, vec![Node::Empty])
        );
        assert_ne!(number("1"), Node::Empty);
    }
}
