//! Implements the `exprtree` command-line tool.

/// Main entry point for the `exprtree` tool.
fn main() {
    exprtree_shell::entry::run();
}
