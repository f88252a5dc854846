//! Command-line front end for exprtree: reads an arithmetic expression, parses it, and
//! prints the resulting parse tree in the selected format.

pub mod args;
pub mod config;
pub mod entry;
mod error;
mod error_formatter;
pub mod events;
mod output;
mod productinfo;

pub use error::ShellError;
