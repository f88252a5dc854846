use std::fmt::Display;

use crate::tokenizer::{Token, TokenKind};

/// Represents an unrecognized character encountered while tokenizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    /// The 0-based byte offset of the offending character.
    pub offset: usize,
    /// The offending character. Input given as bytes is decoded lossily first, so a
    /// byte that is not valid UTF-8 is reported as `U+FFFD REPLACEMENT CHARACTER`; the
    /// offset still points at the raw byte.
    pub found: char,
    /// The full input text, used to render the diagnostic.
    pub input: String,
}

impl LexError {
    pub(crate) fn new(input: &str, offset: usize, found: char) -> Self {
        Self {
            offset,
            found,
            input: input.to_owned(),
        }
    }

    /// Returns the one-line summary of the error, without the source snippet.
    pub fn summary(&self) -> String {
        std::format!(
            "unexpected character {:?} at position {}",
            self.found,
            self.offset
        )
    }

    /// Returns the byte range of the offending character.
    pub const fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.found.len_utf8()
    }

    /// Replays the line holding the offending character, up to and including it, with a
    /// caret underneath.
    fn snippet(&self) -> (String, String) {
        let before = self.input.get(..self.offset).unwrap_or_default();
        let line = before.rsplit('\n').next().unwrap_or_default();

        let mut replay = line.to_owned();
        replay.push(self.found);

        (replay, caret_line(line, 1))
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (replay, carets) = self.snippet();
        write!(f, "{}:\n{replay}\n{carets}", self.summary())
    }
}

impl std::error::Error for LexError {}

/// Describes why the parser stopped at a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// No production of the grammar accepts the token at its position.
    Unexpected,
    /// Parsing on from the token would grow the parse tree beyond `limit` levels.
    TooDeep {
        /// The maximum parse tree depth.
        limit: usize,
    },
}

/// Represents a token the parser could not accept at its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    /// Why the token was rejected.
    pub kind: SyntaxErrorKind,
    /// The index of the offending token in the token sequence.
    pub position: usize,
    /// The offending token.
    pub token: Token,
    /// The token kinds the grammar would have accepted at this position; empty when the
    /// nesting limit was hit.
    pub expected: Vec<TokenKind>,
    /// The lexemes of all tokens before the offending one, concatenated.
    pub preceding: String,
}

impl SyntaxError {
    pub(crate) fn new(tokens: &[Token], position: usize, expected: &[TokenKind]) -> Self {
        let token = tokens
            .get(position)
            .cloned()
            .unwrap_or_else(Token::end_of_input);

        let preceding = tokens
            .iter()
            .take(position)
            .map(|t| t.text.as_str())
            .collect();

        Self {
            kind: SyntaxErrorKind::Unexpected,
            position,
            token,
            expected: expected.to_vec(),
            preceding,
        }
    }

    pub(crate) fn too_deep(tokens: &[Token], position: usize, limit: usize) -> Self {
        Self {
            kind: SyntaxErrorKind::TooDeep { limit },
            ..Self::new(tokens, position, &[])
        }
    }

    /// Returns the one-line summary of the error.
    pub fn summary(&self) -> String {
        if let SyntaxErrorKind::TooDeep { .. } = self.kind {
            return std::format!("expression nested too deeply at token {}", self.position);
        }

        match self.token.kind {
            TokenKind::Number => std::format!(
                "unexpected number {} at token {}",
                self.token.text,
                self.position
            ),
            kind => std::format!("unexpected {kind} at token {}", self.position),
        }
    }

    /// Describes the set of token kinds that would have been accepted, or the limit that
    /// was exceeded.
    pub fn expectation(&self) -> String {
        if let SyntaxErrorKind::TooDeep { limit } = self.kind {
            return std::format!("parse trees are limited to {limit} levels");
        }

        match self.expected.as_slice() {
            [only] => std::format!("expected {only}"),
            kinds => {
                let listed = kinds
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                std::format!("expected one of: {listed}")
            }
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.token.text.chars().count().max(1);
        writeln!(f, "{}:", self.summary())?;
        writeln!(f, "{}{}", self.preceding, self.token.text)?;
        writeln!(f, "{}", caret_line(&self.preceding, width))?;
        write!(f, "{}", self.expectation())
    }
}

impl std::error::Error for SyntaxError {}

/// Represents an error produced while turning text into a parse tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input contained a character outside the expression alphabet.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The token sequence did not match the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// Returns true if the error was raised by the tokenizer.
    pub const fn is_lexical(&self) -> bool {
        matches!(self, Self::Lex(_))
    }

    /// Converts the error into a [`miette::Report`] labelling the offending span of
    /// `source`.
    ///
    /// # Arguments
    ///
    /// * `source` - The text that was parsed.
    #[cfg(feature = "diagnostics")]
    pub fn to_pretty_error(&self, source: impl Into<String>) -> miette::Report {
        let (summary, span, label) = match self {
            Self::Lex(e) => (e.summary(), e.span(), String::from("not part of an expression")),
            Self::Syntax(e) => (e.summary(), e.token.span(), e.expectation()),
        };

        miette::miette!(
            labels = vec![miette::LabeledSpan::at(span, label)],
            "{summary}"
        )
        .with_source_code(source.into())
    }
}

/// Builds the marker line placed under a replayed snippet: one blank per character of
/// `prefix` (tabs are kept so the caret stays aligned), then `^` followed by a `~` for
/// each further character of the marked lexeme.
fn caret_line(prefix: &str, width: usize) -> String {
    let mut line: String = prefix
        .chars()
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();

    line.push('^');
    line.extend(std::iter::repeat_n('~', width.saturating_sub(1)));
    line
}
