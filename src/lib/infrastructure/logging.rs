//! Log output

use clap::{builder::FalseyValueParser, Parser};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct LoggingConfig {
    /// Log at debug level
    #[arg(long, env = "DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,
}

impl LoggingConfig {
    /// The most verbose level that will be logged
    pub fn max_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Installs the global subscriber, writing to `writer`.
    #[mutants::skip]
    pub fn init<W>(&self, writer: W)
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        tracing_subscriber::fmt()
            .with_max_level(self.max_level())
            .with_writer(writer)
            .init();
    }
}
