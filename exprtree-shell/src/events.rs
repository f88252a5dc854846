//! Selection of the tracing events that are raised to debug level.

use std::{collections::HashSet, fmt::Display};

use tracing_subscriber::{Layer, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

/// Type of event to trace.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum TraceEvent {
    /// Traces the process of parsing tokens into a parse tree.
    #[clap(name = "parse")]
    Parse,
    /// Traces rendering of parse trees into output documents.
    #[clap(name = "serialize")]
    Serialize,
    /// Traces the process of tokenizing input text.
    #[clap(name = "tokenize")]
    Tokenize,
}

impl TraceEvent {
    /// Returns the tracing target that events of this type are emitted under.
    pub const fn target(self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Serialize => "serialize",
            Self::Tokenize => "tokenize",
        }
    }
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.target())
    }
}

/// The set of enabled debug events.
#[derive(Debug, Default)]
pub struct TraceEventConfig {
    enabled_trace_events: HashSet<TraceEvent>,
}

impl TraceEventConfig {
    /// Installs a stderr subscriber filtered to the given events and returns the
    /// resulting configuration.
    ///
    /// # Arguments
    ///
    /// * `enabled_debug_events` - Events to raise to debug level.
    pub fn init(enabled_debug_events: &[TraceEvent]) -> Self {
        let config = Self::new(enabled_debug_events);

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .with_filter(config.compose_filter());

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            // Something went wrong; proceed on anyway but complain audibly.
            eprintln!("warning: failed to initialize tracing.");
        }

        config
    }

    fn new(enabled_debug_events: &[TraceEvent]) -> Self {
        Self {
            enabled_trace_events: enabled_debug_events.iter().copied().collect(),
        }
    }

    fn compose_filter(&self) -> Targets {
        let filter =
            Targets::new().with_default(tracing_subscriber::filter::LevelFilter::INFO);

        filter.with_targets(
            self.enabled_trace_events
                .iter()
                .map(|event| (event.target(), tracing::Level::DEBUG)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn default_filter_is_info() {
        let filter = TraceEventConfig::new(&[]).compose_filter();

        assert!(filter.would_enable("parse", &Level::INFO));
        assert!(filter.would_enable("parse", &Level::WARN));
        assert!(!filter.would_enable("parse", &Level::DEBUG));
        assert!(!filter.would_enable("tokenize", &Level::DEBUG));
    }

    #[test]
    fn enabled_events_raise_their_targets() {
        let config = TraceEventConfig::new(&[TraceEvent::Tokenize, TraceEvent::Serialize]);
        let filter = config.compose_filter();

        assert!(filter.would_enable("tokenize", &Level::DEBUG));
        assert!(filter.would_enable("serialize", &Level::DEBUG));
        assert!(!filter.would_enable("parse", &Level::DEBUG));
        assert!(!filter.would_enable("tokenize", &Level::TRACE));
    }

    #[test]
    fn event_names() {
        assert_eq!(TraceEvent::Parse.to_string(), "parse");
        assert_eq!(TraceEvent::Tokenize.target(), "tokenize");
    }
}
