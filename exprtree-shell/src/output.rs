//! Rendering of parse results in the supported output formats.

use exprtree_parser::{Token, ast::Node, document};

use crate::ShellError;
use crate::args::OutputFormat;

/// Renders a parse tree in the given format. The result ends with a newline.
///
/// # Arguments
///
/// * `tree` - The tree to render.
/// * `format` - The output format.
pub(crate) fn render_tree(tree: &Node, format: OutputFormat) -> Result<String, ShellError> {
    tracing::debug!(target: "serialize", "rendering tree of depth {} as {format}", tree.depth());

    let rendered = match format {
        OutputFormat::Json => {
            let mut json =
                document::to_pretty_string(tree).map_err(|e| serialize_error(format, e))?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(tree).map_err(|e| serialize_error(format, e))?
        }
        OutputFormat::Source => std::format!("{}\n", tree.to_source_text()),
        OutputFormat::Tokens => {
            let end = Token::end_of_input();
            render_tokens(tree.terminals().chain(std::iter::once(&end)))
        }
    };

    tracing::debug!(target: "serialize", "  => {} byte(s)", rendered.len());

    Ok(rendered)
}

/// Renders a token sequence with one `KIND text` line per token; tokens without text
/// (the end-of-input marker) print their kind alone.
pub(crate) fn render_tokens<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    tokens.into_iter().fold(String::new(), |mut out, token| {
        if token.text.is_empty() {
            out.push_str(token.kind.name());
        } else {
            out.push_str(&token.to_string());
        }
        out.push('\n');
        out
    })
}

fn serialize_error(
    format: OutputFormat,
    source: impl std::error::Error + Send + Sync + 'static,
) -> ShellError {
    ShellError::Serialize {
        format,
        source: Box::new(source),
    }
}
