use exprtree_parser::Error;
use miette::{GraphicalReportHandler, GraphicalTheme};

use crate::args::DiagnosticStyle;
use crate::config::RunOptions;

/// Renders lexical and syntax errors for display on stderr.
#[derive(Debug, Default, Clone)]
pub(crate) struct Formatter {
    pub use_color: bool,
    pub style: DiagnosticStyle,
}

impl Formatter {
    pub const fn new(options: &RunOptions) -> Self {
        Self {
            use_color: options.use_color,
            style: options.diagnostics,
        }
    }

    /// Formats `err`, which was raised while processing `source`.
    pub fn format_error(&self, err: &Error, source: &str) -> String {
        let prefix = if self.use_color {
            color_print::cstr!("<red>error:</red> ")
        } else {
            "error: "
        };

        match self.style {
            DiagnosticStyle::Plain => std::format!("{prefix}{err}\n"),
            DiagnosticStyle::Fancy => {
                let mut rendered = String::new();
                if self.render_fancy(err, source, &mut rendered).is_ok() {
                    std::format!("{prefix}{rendered}")
                } else {
                    std::format!("{prefix}{err}\n")
                }
            }
        }
    }

    fn render_fancy(&self, err: &Error, source: &str, out: &mut String) -> std::fmt::Result {
        let theme = if self.use_color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };

        let report = err.to_pretty_error(source);
        GraphicalReportHandler::new_themed(theme).render_report(out, &*report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn formatter(style: DiagnosticStyle) -> Formatter {
        Formatter {
            use_color: false,
            style,
        }
    }

    #[test]
    fn plain_errors_keep_caret_diagnostic() {
        let source = "1 + ?";
        let err = exprtree_parser::parse_str(source).unwrap_err();

        let formatted = formatter(DiagnosticStyle::Plain).format_error(&err, source);
        assert_eq!(formatted, std::format!("error: {err}\n"));
        assert!(formatted.contains('^'));
    }

    #[test]
    fn fancy_errors_label_source() {
        let source = "(1 + 2";
        let err = exprtree_parser::parse_str(source).unwrap_err();

        let formatted = formatter(DiagnosticStyle::Fancy).format_error(&err, source);
        assert!(formatted.starts_with("error: "));
        assert!(formatted.contains("unexpected end of input at token 4"));
        assert!(formatted.contains("(1 + 2"));
    }

    #[test]
    fn colored_prefix() {
        let source = "1 +";
        let err = exprtree_parser::parse_str(source).unwrap_err();

        let formatted = Formatter {
            use_color: true,
            style: DiagnosticStyle::Plain,
        }
        .format_error(&err, source);
        assert!(formatted.starts_with('\u{1b}'));
    }
}
