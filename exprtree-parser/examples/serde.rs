//! Example demonstrating parse tree serialization.
//!
//! Run with: `cargo run --package exprtree-parser --example serde`

use exprtree_parser::{document, parse_str};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = "-(1 + 2) * 3";
    let tree = parse_str(input)?;

    // Serialize the tree to JSON
    let json = document::to_pretty_string(&tree)?;
    println!("Parsed tree:");
    println!("{json}");

    // Any serde format works, since the tree implements `Serialize`
    let yaml = serde_yaml::to_string(&tree)?;
    println!("As YAML:");
    println!("{yaml}");

    Ok(())
}
