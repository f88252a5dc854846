//! Property-based tests for the tokenizer and parser.
//!
//! These tests use `proptest` to check:
//!
//! 1. **Round trip**: a tree generated from the grammar, rendered with
//!    `to_source_text`, tokenizes and parses back to an equal tree.
//! 2. **Whitespace is insignificant** between tokens.
//! 3. **No panics**: arbitrary strings over the expression alphabet yield a tree or an
//!    error, and any tree they yield is itself stable under a round trip.
//! 4. **Lexical errors** point at a character outside the alphabet.

use proptest::prelude::*;

use crate::ast::{Node, Symbol};
use crate::{Token, TokenKind, parse_str, tokenize_str};

/// Shape of a factor, generated first and then expanded into grammar nodes.
#[derive(Clone, Debug)]
enum FactorShape {
    Number(u64),
    Negate(Box<FactorShape>),
    Group(Box<ExprShape>),
}

/// A first factor followed by the factors it is multiplied with.
type TermShape = (FactorShape, Vec<FactorShape>);

/// A first term followed by terms that are added (`true`) or subtracted.
type ExprShape = (TermShape, Vec<(bool, TermShape)>);

fn factor_shape() -> impl Strategy<Value = FactorShape> {
    let leaf = any::<u64>().prop_map(FactorShape::Number);
    leaf.prop_recursive(6, 64, 4, |inner| {
        let term = (inner.clone(), prop::collection::vec(inner.clone(), 0..3));
        let expr = (
            term.clone(),
            prop::collection::vec((any::<bool>(), term), 0..3),
        );

        prop_oneof![
            inner.prop_map(|f| FactorShape::Negate(Box::new(f))),
            expr.prop_map(|e| FactorShape::Group(Box::new(e))),
        ]
    })
}

fn expr_shape() -> impl Strategy<Value = ExprShape> {
    let factor = factor_shape().boxed();
    let term = (factor.clone(), prop::collection::vec(factor, 0..3));
    (
        term.clone(),
        prop::collection::vec((any::<bool>(), term), 0..3),
    )
}

fn terminal(kind: TokenKind, text: impl Into<String>) -> Node {
    Node::Terminal(Token::new(kind, text))
}

fn build_expr((first, rest): &ExprShape) -> Node {
    Node::non_terminal(Symbol::Expr, vec![build_term(first), build_expr_tail(rest)])
}

fn build_expr_tail(rest: &[(bool, TermShape)]) -> Node {
    match rest.split_first() {
        None => Node::non_terminal(Symbol::ExprTail, vec![Node::Empty]),
        Some(((add, term), rest)) => {
            let operator = if *add {
                terminal(TokenKind::Plus, "+")
            } else {
                terminal(TokenKind::Minus, "-")
            };
            Node::non_terminal(
                Symbol::ExprTail,
                vec![operator, build_term(term), build_expr_tail(rest)],
            )
        }
    }
}

fn build_term((first, rest): &TermShape) -> Node {
    Node::non_terminal(Symbol::Term, vec![build_factor(first), build_term_tail(rest)])
}

fn build_term_tail(rest: &[FactorShape]) -> Node {
    match rest.split_first() {
        None => Node::non_terminal(Symbol::TermTail, vec![Node::Empty]),
        Some((factor, rest)) => Node::non_terminal(
            Symbol::TermTail,
            vec![
                terminal(TokenKind::Star, "*"),
                build_factor(factor),
                build_term_tail(rest),
            ],
        ),
    }
}

fn build_factor(shape: &FactorShape) -> Node {
    match shape {
        FactorShape::Number(n) => Node::non_terminal(
            Symbol::Factor,
            vec![terminal(TokenKind::Number, n.to_string())],
        ),
        FactorShape::Negate(operand) => Node::non_terminal(
            Symbol::Factor,
            vec![terminal(TokenKind::Minus, "-"), build_factor(operand)],
        ),
        FactorShape::Group(expr) => Node::non_terminal(
            Symbol::Factor,
            vec![
                terminal(TokenKind::LeftParen, "("),
                build_expr(expr),
                terminal(TokenKind::RightParen, ")"),
            ],
        ),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn generated_trees_round_trip(shape in expr_shape()) {
        let tree = build_expr(&shape);
        let text = tree.to_source_text();
        prop_assert_eq!(parse_str(&text), Ok(tree));
    }

    #[test]
    fn whitespace_between_tokens_is_insignificant(shape in expr_shape()) {
        let tree = build_expr(&shape);
        let text = tree
            .terminals()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" \t\n");
        prop_assert_eq!(parse_str(&text), Ok(tree));
    }
}

proptest! {
    #[test]
    fn arbitrary_alphabet_never_panics(input in "[0-9+*() \\-]{0,40}") {
        if let Ok(tree) = parse_str(&input) {
            let text = tree.to_source_text();
            prop_assert_eq!(parse_str(&text), Ok(tree));
        }
    }

    #[test]
    fn whitespace_only_yields_end_of_input(input in "[ \t\n\r]{0,20}") {
        prop_assert_eq!(tokenize_str(&input), Ok(vec![Token::end_of_input()]));
    }

    #[test]
    fn lex_errors_point_at_offending_character(input in "[ -~]{0,30}") {
        if let Err(err) = tokenize_str(&input) {
            let at_offset = input.get(err.offset..).and_then(|s| s.chars().next());
            prop_assert_eq!(at_offset, Some(err.found));
            prop_assert!(!"0123456789+-*() ".contains(err.found));
        }
    }
}
