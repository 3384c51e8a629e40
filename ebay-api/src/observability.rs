//! Log subscriber setup for applications using this crate.
//!
//! The library itself only emits `tracing` events and spans. Binaries that
//! want them on stderr call [`init_logging`] once at startup.

use std::io;

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{ApiError, Result};

/// Variable selecting the output format.
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

impl LogFormat {
    /// Parses a format name. Anything other than `json` (any case) is
    /// [`LogFormat::Pretty`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") { Self::Json } else { Self::Pretty }
    }

    /// Reads `LOG_FORMAT`; unset means [`LogFormat::Pretty`].
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR).map_or(Self::Pretty, |value| Self::parse(&value))
    }
}

/// Installs a global subscriber writing to stderr.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Spans are reported
/// when they close, so each dispatched call logs its duration.
///
/// # Errors
///
/// Returns [`ApiError::Config`] if a global subscriber is already set.
///
/// # Examples
///
/// ```no_run
/// use ebay_api::observability::{LogFormat, init_logging};
///
/// init_logging(LogFormat::from_env()).expect("logging already initialized");
/// ```
pub fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Pretty => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(io::stderr),
            )
            .try_init(),
    };

    installed.map_err(|e| ApiError::Config(format!("failed to install log subscriber: {e}")))
}
