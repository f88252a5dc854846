use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::error::LexError;

/// Identifies the lexical class of a [`Token`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    /// An opening parenthesis: `(`.
    LeftParen,
    /// A closing parenthesis: `)`.
    RightParen,
    /// The addition operator: `+`.
    Plus,
    /// The subtraction or negation operator: `-`.
    Minus,
    /// The multiplication operator: `*`.
    Star,
    /// A run of ASCII decimal digits.
    Number,
    /// The end of the input; always the last token of a sequence.
    EndOfInput,
}

impl TokenKind {
    /// Returns the kind of single-character operator token spelled by `c`, if any.
    pub const fn for_operator(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::LeftParen),
            ')' => Some(Self::RightParen),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Star),
            _ => None,
        }
    }

    /// Returns the fixed lexeme for this kind, or `None` for kinds whose text varies
    /// (numbers) or is empty (end of input).
    pub const fn lexeme(self) -> Option<&'static str> {
        match self {
            Self::LeftParen => Some("("),
            Self::RightParen => Some(")"),
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Star => Some("*"),
            Self::Number | Self::EndOfInput => None,
        }
    }

    /// Returns the upper-case identifier used when listing tokens.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Star => "MUL",
            Self::Number => "NUMBER",
            Self::EndOfInput => "END",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.lexeme() {
            Some(lexeme) => write!(f, "'{lexeme}'"),
            None if matches!(self, Self::Number) => write!(f, "number"),
            None => write!(f, "end of input"),
        }
    }
}

/// Represents a token extracted from an arithmetic expression.
///
/// Equality and hashing consider only the kind and the text; `start` is positional
/// metadata used for diagnostics.
#[derive(Clone, Debug)]
pub struct Token {
    /// The lexical class of the token.
    pub kind: TokenKind,
    /// The exact lexeme; empty for [`TokenKind::EndOfInput`].
    pub text: String,
    /// The 0-based byte offset of the lexeme in the input.
    pub start: usize,
}

impl Token {
    /// Returns a new token at offset 0.
    ///
    /// # Arguments
    ///
    /// * `kind` - The kind of the token.
    /// * `text` - The lexeme.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            start: 0,
        }
    }

    /// Returns a new end-of-input token.
    pub fn end_of_input() -> Self {
        Self::new(TokenKind::EndOfInput, "")
    }

    /// Returns a copy of this token positioned at the given byte offset.
    #[must_use]
    pub fn at(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Returns the byte range the token occupies in its input.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.text.len()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.text.hash(state);
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.name(), self.text)
    }
}

/// Single-pass scanner producing the token sequence of one input.
struct Tokenizer<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    /// Byte offset at which the digit run being accumulated started.
    pending_number: Option<usize>,
}

impl<'a> Tokenizer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: Vec::new(),
            pending_number: None,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        for (offset, c) in self.input.char_indices() {
            if c.is_ascii_digit() {
                self.pending_number.get_or_insert(offset);
            } else if is_blank(c) {
                self.flush_number(offset);
            } else if let Some(kind) = TokenKind::for_operator(c) {
                self.flush_number(offset);
                self.push(Token::new(kind, c).at(offset));
            } else {
                return Err(LexError::new(self.input, offset, c));
            }
        }

        self.flush_number(self.input.len());
        self.push(Token::end_of_input().at(self.input.len()));

        Ok(self.tokens)
    }

    fn flush_number(&mut self, end: usize) {
        if let Some(start) = self.pending_number.take() {
            // Digit runs are ASCII, so the range always falls on char boundaries.
            let text = self.input.get(start..end).unwrap_or_default();
            self.push(Token::new(TokenKind::Number, text).at(start));
        }
    }

    fn push(&mut self, token: Token) {
        tracing::debug!(target: "tokenize", "TOKEN {}: {:?} @ {}", self.tokens.len(), token, token.start);
        self.tokens.push(token);
    }
}

/// Returns true for the characters that separate tokens without producing one.
const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Breaks the given expression into tokens, returning the tokens. The returned sequence
/// always ends with exactly one [`TokenKind::EndOfInput`] token.
///
/// # Arguments
///
/// * `input` - The expression to tokenize.
pub fn tokenize_str(input: &str) -> Result<Vec<Token>, LexError> {
    tracing::debug!(target: "tokenize", "Tokenizing {} byte(s)...", input.len());

    let tokens = Tokenizer::new(input).tokenize()?;

    tracing::debug!(target: "tokenize", "  => {} token(s)", tokens.len());

    Ok(tokens)
}

/// Breaks the given byte stream into tokens. Bytes outside the ASCII range are never
/// valid. The stream is decoded lossily before scanning, so a byte sequence that is not
/// UTF-8 is reported as [`char::REPLACEMENT_CHARACTER`] at the offset of its first byte.
///
/// # Arguments
///
/// * `input` - The bytes to tokenize.
pub fn tokenize_bytes(input: &[u8]) -> Result<Vec<Token>, LexError> {
    // Every recognized character is ASCII, so the first offending offset is the same
    // in the lossy decoding as in the raw bytes.
    tokenize_str(&String::from_utf8_lossy(input))
}
