//! Implements a tokenizer and an LL(1) recursive-descent parser for integer arithmetic
//! expressions built from `+`, `-` (binary and unary), `*` and parentheses, producing a
//! parse tree that mirrors the grammar derivation.

pub mod ast;
pub mod document;

mod error;
mod parser;
mod tokenizer;

#[cfg(test)]
mod round_trip_tests;

pub use error::{Error, LexError, SyntaxError, SyntaxErrorKind};
pub use parser::{MAX_NESTING_DEPTH, parse_bytes, parse_str, parse_tokens};
pub use tokenizer::{Token, TokenKind, tokenize_bytes, tokenize_str};
