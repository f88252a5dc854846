//! Benchmarks for the exprtree-parser crate.
//!
//! Measures the two stages separately and together:
//! 1. Tokenization of expression text
//! 2. Parsing of an already-tokenized expression
//! 3. The full pipeline from text to tree

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::Criterion;
use exprtree_parser::{Token, ast::Node, parse_str, parse_tokens, tokenize_str};

const SIMPLE_EXPR: &str = "1 + 2 * 4";

const NESTED_EXPR: &str = "-(3 * (4 - (5 + 6)) * --7) - ((((8))))";

fn tokenize(content: &str) -> Vec<Token> {
    tokenize_str(content).unwrap()
}

fn parse(tokens: &[Token]) -> Node {
    parse_tokens(tokens).unwrap()
}

/// Builds a long flat sum of products, e.g. `0 * 1 + 1 * 2 + ...`.
fn long_expr(terms: usize) -> String {
    (0..terms)
        .map(|i| std::format!("{i} * {}", i + 1))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Builds an expression nested `depth` parentheses deep.
fn deep_expr(depth: usize) -> String {
    std::format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

fn criterion_benchmark(c: &mut Criterion) {
    let long = long_expr(500);
    let deep = deep_expr(200);

    let samples = [
        ("simple", SIMPLE_EXPR),
        ("nested", NESTED_EXPR),
        ("long", long.as_str()),
        ("deep", deep.as_str()),
    ];

    for (name, content) in samples {
        c.bench_function(std::format!("tokenize_{name}").as_str(), |b| {
            b.iter(|| tokenize(content));
        });

        let tokens = tokenize(content);
        c.bench_function(std::format!("parse_{name}").as_str(), |b| {
            b.iter(|| parse(&tokens));
        });

        c.bench_function(std::format!("full_{name}").as_str(), |b| {
            b.iter(|| parse_str(content).unwrap());
        });
    }
}

criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default();
    targets = criterion_benchmark
}

criterion::criterion_main!(benches);
