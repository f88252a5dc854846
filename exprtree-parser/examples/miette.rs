//! Simple example of miette usage
//!
//! Run with: `cargo run --package exprtree-parser --example miette --features diagnostics -- '(1 + 2'`

use exprtree_parser::parse_str;
use miette::miette;

fn main() -> miette::Result<()> {
    let source = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("Please provide an expression"))?;

    let tree = parse_str(&source).map_err(|e| e.to_pretty_error(source.as_str()))?;

    println!("{tree:#?}");

    Ok(())
}
