//! Command-line arguments for exprtree.

use clap::{Parser, builder::styling};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::{events, productinfo};

const SHORT_DESCRIPTION: &str = "Parse arithmetic expressions into grammar-shaped trees";

const LONG_DESCRIPTION: &str = r"
exprtree tokenizes an integer arithmetic expression built from +, -, * and parentheses,
parses it with an LL(1) recursive-descent parser, and prints the resulting parse tree.

The expression is taken from -c, from FILE, or from standard input.
";

/// Format used to print the result of a successful run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON document of the parse tree.
    #[default]
    Json,
    /// YAML document of the parse tree.
    Yaml,
    /// Expression text reconstructed from the parse tree.
    Source,
    /// One line per token, as produced by the tokenizer.
    Tokens,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Source => write!(f, "source"),
            Self::Tokens => write!(f, "tokens"),
        }
    }
}

/// Style used to report lexical and syntax errors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticStyle {
    /// The error message with a caret line under the offending input.
    #[default]
    Plain,
    /// A labeled source snippet rendered by miette.
    Fancy,
}

/// Where the expression is read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputSource<'a> {
    /// The expression given with `-c`.
    Command(&'a str),
    /// A file holding the expression.
    File(&'a Path),
    /// Standard input.
    Stdin,
}

/// Parsed command-line arguments for exprtree.
#[derive(Parser)]
#[clap(name = productinfo::PRODUCT_NAME,
       version = productinfo::PRODUCT_VERSION,
       about = SHORT_DESCRIPTION,
       long_about = LONG_DESCRIPTION,
       author,
       styles = exprtree_help_styles())]
#[allow(clippy::module_name_repetitions)]
pub struct CommandLineArgs {
    /// Parse the provided expression instead of reading one.
    // `allow_hyphen_values`: expressions may start with a unary minus
    #[arg(
        short = 'c',
        long = "command",
        value_name = "EXPRESSION",
        allow_hyphen_values = true
    )]
    pub command: Option<String>,

    /// Output format [default: json].
    #[clap(short = 'f', long = "format", value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Error reporting style [default: plain].
    #[clap(long = "diagnostics", value_name = "STYLE")]
    pub diagnostics: Option<DiagnosticStyle>,

    /// Disable colorized output.
    #[clap(long = "disable-color")]
    pub disable_color: bool,

    /// Enable debug logging for classes of tracing events.
    #[clap(long = "debug", alias = "log-enable", value_name = "EVENT")]
    pub enabled_debug_events: Vec<events::TraceEvent>,

    /// Path to a configuration file to use instead of the default.
    #[clap(long = "config", value_name = "PATH", conflicts_with = "no_config")]
    pub config_file: Option<PathBuf>,

    /// Do not load any configuration file.
    #[clap(long = "no-config")]
    pub no_config: bool,

    /// Path to a file holding the expression; `-` reads standard input.
    #[clap(value_name = "FILE", conflicts_with = "command")]
    pub input_path: Option<PathBuf>,
}

impl CommandLineArgs {
    /// Returns where the expression should be read from.
    pub fn input_source(&self) -> InputSource<'_> {
        if let Some(command) = &self.command {
            InputSource::Command(command)
        } else if let Some(path) = &self.input_path {
            if path.as_os_str() == "-" {
                InputSource::Stdin
            } else {
                InputSource::File(path)
            }
        } else {
            InputSource::Stdin
        }
    }
}

/// Returns clap styling to be used for command-line help.
#[doc(hidden)]
fn exprtree_help_styles() -> clap::builder::Styles {
    styling::Styles::styled()
        .header(
            styling::AnsiColor::Yellow.on_default()
                | styling::Effects::BOLD
                | styling::Effects::UNDERLINE,
        )
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Magenta.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}
