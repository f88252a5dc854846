use crate::ast::{Node, Symbol};
use crate::error::{self, SyntaxError};
use crate::tokenizer::{self, Token, TokenKind};

//
// Grammar, selected by one token of lookahead:
//
//   E -> T X
//   X -> '+' T X | '-' T X | eps
//   T -> F Y
//   Y -> '*' F Y | eps
//   F -> NUMBER | '-' F | '(' E ')'
//
// The empty tails are only chosen on a token that may legally follow them. At the top
// level that is the end of input alone; inside parentheses a ')' may also follow, and
// the end of input is admitted so that an unterminated group is reported by the
// closing-parenthesis check in F.
//
// Every production method also receives the level of the node it builds (the root is
// at level 0) and refuses to build one that would push the tree past
// `MAX_NESTING_DEPTH`. Any nesting in the input deepens the tree, so the limit bounds
// the recursion of the parser and of every walk over the trees it returns.
//

/// The maximum height, as counted by [`Node::depth`], of a tree returned by the parser.
/// A parenthesized group adds three levels, a unary minus or a further operand of a
/// chain of `+`, `-` or `*` adds one.
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Tokens that may begin an `E` or `T`.
const STARTS_TERM: &[TokenKind] = &[TokenKind::LeftParen, TokenKind::Minus, TokenKind::Number];

/// Tokens that may begin an `F`.
const STARTS_FACTOR: &[TokenKind] = &[TokenKind::Number, TokenKind::Minus, TokenKind::LeftParen];

/// A parsed node together with the cursor just past the tokens it consumed.
type Step = Result<(Node, usize), SyntaxError>;

/// Returns the tokens that may follow a complete expression at the given parenthesis
/// nesting depth.
const fn closers(depth: usize) -> &'static [TokenKind] {
    if depth == 0 {
        &[TokenKind::EndOfInput]
    } else {
        &[TokenKind::RightParen, TokenKind::EndOfInput]
    }
}

/// Predictive recursive-descent parser over one token sequence. Each production method
/// takes the cursor by value and returns the advanced cursor alongside its node.
struct TokenParser<'a> {
    tokens: &'a [Token],
}

impl TokenParser<'_> {
    /// Returns the kind of the token under the cursor. A sequence that is missing its
    /// trailing end-of-input token behaves as if it had one.
    fn peek(&self, pos: usize) -> TokenKind {
        self.tokens
            .get(pos)
            .map_or(TokenKind::EndOfInput, |token| token.kind)
    }

    /// Consumes the token under the cursor as a terminal node. Lookahead dispatch must
    /// already have established that the token is of the given kind.
    fn expect_terminal(&self, pos: usize, kind: TokenKind) -> (Node, usize) {
        debug_assert_eq!(self.peek(pos), kind, "terminal matched without lookahead");

        let token = self
            .tokens
            .get(pos)
            .cloned()
            .unwrap_or_else(Token::end_of_input);

        (Node::Terminal(token), pos + 1)
    }

    fn error(&self, pos: usize, expected: &[TokenKind]) -> SyntaxError {
        let err = SyntaxError::new(self.tokens, pos, expected);
        tracing::debug!(target: "parse", "Parse error: {:?}", err);
        err
    }

    /// Admits a non-terminal at `level` whose first token is under the cursor. Each
    /// non-terminal has at least one child, so one at `level` makes the tree at least
    /// `level + 2` high.
    fn enter(&self, pos: usize, level: usize) -> Result<(), SyntaxError> {
        if level + 2 > MAX_NESTING_DEPTH {
            let err = SyntaxError::too_deep(self.tokens, pos, MAX_NESTING_DEPTH);
            tracing::debug!(target: "parse", "Parse error: {:?}", err);
            return Err(err);
        }
        Ok(())
    }

    /// `E -> T X`
    fn expr(&self, pos: usize, depth: usize, level: usize) -> Step {
        self.enter(pos, level)?;
        if !STARTS_TERM.contains(&self.peek(pos)) {
            return Err(self.error(pos, STARTS_TERM));
        }

        let (term, pos) = self.term(pos, depth, level + 1)?;
        let (tail, pos) = self.expr_tail(pos, depth, level + 1)?;

        Ok((Node::non_terminal(Symbol::Expr, vec![term, tail]), pos))
    }

    /// `X -> '+' T X | '-' T X | eps`
    fn expr_tail(&self, pos: usize, depth: usize, level: usize) -> Step {
        self.enter(pos, level)?;
        match self.peek(pos) {
            kind @ (TokenKind::Plus | TokenKind::Minus) => {
                let (operator, pos) = self.expect_terminal(pos, kind);
                let (term, pos) = self.term(pos, depth, level + 1)?;
                let (tail, pos) = self.expr_tail(pos, depth, level + 1)?;

                Ok((
                    Node::non_terminal(Symbol::ExprTail, vec![operator, term, tail]),
                    pos,
                ))
            }
            kind if closers(depth).contains(&kind) => Ok((
                Node::non_terminal(Symbol::ExprTail, vec![Node::Empty]),
                pos,
            )),
            _ => {
                let expected =
                    [&[TokenKind::Plus, TokenKind::Minus][..], closers(depth)].concat();
                Err(self.error(pos, &expected))
            }
        }
    }

    /// `T -> F Y`
    fn term(&self, pos: usize, depth: usize, level: usize) -> Step {
        self.enter(pos, level)?;
        if !STARTS_TERM.contains(&self.peek(pos)) {
            return Err(self.error(pos, STARTS_TERM));
        }

        let (factor, pos) = self.factor(pos, depth, level + 1)?;
        let (tail, pos) = self.term_tail(pos, depth, level + 1)?;

        Ok((Node::non_terminal(Symbol::Term, vec![factor, tail]), pos))
    }

    /// `Y -> '*' F Y | eps`
    fn term_tail(&self, pos: usize, depth: usize, level: usize) -> Step {
        self.enter(pos, level)?;
        match self.peek(pos) {
            TokenKind::Star => {
                let (operator, pos) = self.expect_terminal(pos, TokenKind::Star);
                let (factor, pos) = self.factor(pos, depth, level + 1)?;
                let (tail, pos) = self.term_tail(pos, depth, level + 1)?;

                Ok((
                    Node::non_terminal(Symbol::TermTail, vec![operator, factor, tail]),
                    pos,
                ))
            }
            TokenKind::Plus | TokenKind::Minus => Ok((
                Node::non_terminal(Symbol::TermTail, vec![Node::Empty]),
                pos,
            )),
            kind if closers(depth).contains(&kind) => Ok((
                Node::non_terminal(Symbol::TermTail, vec![Node::Empty]),
                pos,
            )),
            _ => {
                let expected = [
                    &[TokenKind::Star, TokenKind::Plus, TokenKind::Minus][..],
                    closers(depth),
                ]
                .concat();
                Err(self.error(pos, &expected))
            }
        }
    }

    /// `F -> NUMBER | '-' F | '(' E ')'`
    fn factor(&self, pos: usize, depth: usize, level: usize) -> Step {
        self.enter(pos, level)?;
        match self.peek(pos) {
            TokenKind::Number => {
                let (number, pos) = self.expect_terminal(pos, TokenKind::Number);
                Ok((Node::non_terminal(Symbol::Factor, vec![number]), pos))
            }
            TokenKind::Minus => {
                let (minus, pos) = self.expect_terminal(pos, TokenKind::Minus);
                let (operand, pos) = self.factor(pos, depth, level + 1)?;
                Ok((Node::non_terminal(Symbol::Factor, vec![minus, operand]), pos))
            }
            TokenKind::LeftParen => {
                let (open, pos) = self.expect_terminal(pos, TokenKind::LeftParen);
                let (inner, pos) = self.expr(pos, depth + 1, level + 1)?;

                if self.peek(pos) != TokenKind::RightParen {
                    return Err(self.error(pos, &[TokenKind::RightParen]));
                }

                let (close, pos) = self.expect_terminal(pos, TokenKind::RightParen);
                Ok((
                    Node::non_terminal(Symbol::Factor, vec![open, inner, close]),
                    pos,
                ))
            }
            _ => Err(self.error(pos, STARTS_FACTOR)),
        }
    }
}

/// Parses a sequence of tokens into the parse tree of one expression.
///
/// The sequence is expected to be the output of [`tokenizer::tokenize_str`]: terminated by
/// exactly one end-of-input token. The first token that no production accepts fails the
/// whole parse; there is no recovery. Input whose tree would be higher than
/// [`MAX_NESTING_DEPTH`] fails with [`SyntaxErrorKind::TooDeep`](crate::SyntaxErrorKind).
///
/// # Arguments
///
/// * `tokens` - The tokens to parse.
pub fn parse_tokens(tokens: &[Token]) -> Result<Node, SyntaxError> {
    tracing::debug!(target: "parse", "Parsing {} token(s)...", tokens.len());

    let parser = TokenParser { tokens };
    let (tree, end) = parser.expr(0, 0, 0)?;

    debug_assert_eq!(parser.peek(end), TokenKind::EndOfInput);
    tracing::debug!(target: "parse", "TREE: {}", tree);

    Ok(tree)
}

/// Tokenizes and parses the given expression.
///
/// # Arguments
///
/// * `input` - The expression to parse.
pub fn parse_str(input: &str) -> Result<Node, error::Error> {
    let tokens = tokenizer::tokenize_str(input)?;
    Ok(parse_tokens(&tokens)?)
}

/// Tokenizes and parses the given byte stream.
///
/// # Arguments
///
/// * `input` - The bytes to parse; see [`tokenizer::tokenize_bytes`].
pub fn parse_bytes(input: &[u8]) -> Result<Node, error::Error> {
    let tokens = tokenizer::tokenize_bytes(input)?;
    Ok(parse_tokens(&tokens)?)
}
