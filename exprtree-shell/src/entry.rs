//! Implements the command-line interface for `exprtree`.

use clap::Parser;
use std::io::{IsTerminal, Read, Write};

use exprtree_parser::{parse_tokens, tokenize_bytes};

use crate::args::{CommandLineArgs, InputSource, OutputFormat};
use crate::config::{self, RunOptions};
use crate::{ShellError, error_formatter, events, output, productinfo};

/// Main entry point for `exprtree`.
pub fn run() {
    install_panic_handlers();

    //
    // Parse args. clap exits with status 2 on usage errors and 0 for `--help` and
    // `--version`.
    //
    let parsed_args = match CommandLineArgs::try_parse() {
        Ok(parsed_args) => parsed_args,
        Err(e) => e.exit(),
    };

    let exit_code = run_with_args(&parsed_args);

    std::process::exit(i32::from(exit_code));
}

/// Installs a panic handler that reports panics in a human-readable form.
fn install_panic_handlers() {
    //
    // On release builds, this captures panic details to a temporary .toml file and
    // reports a human-readable message to the screen.
    //
    human_panic::setup_panic!(
        human_panic::Metadata::new(productinfo::PRODUCT_NAME, productinfo::PRODUCT_VERSION)
            .homepage(productinfo::PRODUCT_DISPLAY_URI)
            .support(std::format!(
                "please post a GitHub issue at {}/issues/new",
                productinfo::PRODUCT_DISPLAY_URI
            ))
    );
}

/// Runs exprtree with already-parsed arguments. Returns the exit code.
///
/// # Arguments
///
/// * `args` - The parsed command-line arguments.
pub fn run_with_args(args: &CommandLineArgs) -> u8 {
    // Initializing tracing.
    let _event_config = events::TraceEventConfig::init(&args.enabled_debug_events);

    let options = match load_run_options(args) {
        Ok(options) => options,
        Err(err) => return report_error(&err),
    };

    let input = match read_input(args.input_source()) {
        Ok(input) => input,
        Err(err) => return report_error(&err),
    };

    let result = process(&input, options.format).and_then(|rendered| write_output(&rendered));

    match result {
        Ok(()) => 0,
        Err(ShellError::Parse(err)) => {
            let formatter = error_formatter::Formatter::new(&RunOptions {
                use_color: options.use_color && std::io::stderr().is_terminal(),
                ..options
            });

            let source = String::from_utf8_lossy(&input);
            eprint!("{}", formatter.format_error(&err, &source));
            1
        }
        Err(err) => report_error(&err),
    }
}

fn report_error(err: &ShellError) -> u8 {
    tracing::error!("error: {err:#}");
    1
}

/// Merges defaults, the configuration file and the arguments. A broken default
/// configuration file is reported and ignored; a broken explicit one is an error.
fn load_run_options(args: &CommandLineArgs) -> Result<RunOptions, ShellError> {
    let loaded = config::load_config(args.no_config, args.config_file.as_deref());

    if let Some(err) = loaded.error {
        if loaded.explicit_path {
            return Err(err.into());
        }
        tracing::warn!("{err}; using default configuration");
    }

    Ok(loaded.config.to_run_options(args))
}

fn read_input(source: InputSource<'_>) -> Result<Vec<u8>, ShellError> {
    match source {
        InputSource::Command(command) => Ok(command.as_bytes().to_vec()),
        InputSource::File(path) => std::fs::read(path)
            .map_err(|e| ShellError::io(std::format!("read {}", path.display()), e)),
        InputSource::Stdin => {
            let mut input = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut input)
                .map_err(|e| ShellError::io("read standard input", e))?;
            Ok(input)
        }
    }
}

/// Tokenizes and parses `input`, rendering the result in `format`. The `tokens` format
/// stops after tokenization.
fn process(input: &[u8], format: OutputFormat) -> Result<String, ShellError> {
    let tokens = tokenize_bytes(input).map_err(exprtree_parser::Error::from)?;
    if format == OutputFormat::Tokens {
        return Ok(output::render_tokens(&tokens));
    }

    let tree = parse_tokens(&tokens).map_err(exprtree_parser::Error::from)?;
    output::render_tree(&tree, format)
}

fn write_output(rendered: &str) -> Result<(), ShellError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| ShellError::io("write output", e))
}
