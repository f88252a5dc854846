use crate::args::OutputFormat;
use crate::config::ConfigLoadError;

/// Represents an error encountered while running exprtree.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// An I/O error occurred while reading input or writing output.
    #[error("failed to {action}: {source}")]
    Io {
        /// What was being attempted.
        action: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An explicitly requested configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// The input is not a valid expression.
    #[error(transparent)]
    Parse(#[from] exprtree_parser::Error),

    /// A parse tree could not be rendered in the requested format.
    #[error("failed to render {format} output: {source}")]
    Serialize {
        /// The requested format.
        format: OutputFormat,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ShellError {
    pub(crate) fn io(action: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            action: action.into(),
            source,
        }
    }
}
