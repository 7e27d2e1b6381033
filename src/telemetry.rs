//! Structured logs for suite runs.
//!
//! Spans and events are written as bunyan JSON lines. The binary points the
//! sink at stderr so stdout only ever carries the report.

use tracing::Subscriber;
use tracing::subscriber::{SetGlobalDefaultError, set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_log::log::SetLoggerError;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

/// Used when `RUST_LOG` is unset. The HTTP stack is chatty below `warn`.
pub const DEFAULT_DIRECTIVES: &str = "info,reqwest=warn,hyper=warn";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter directives.")]
    Filter(#[from] ParseError),
    #[error("Failed to route `log` records into tracing.")]
    Log(#[from] SetLoggerError),
    #[error("A global tracing subscriber is already installed.")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Build the suite's subscriber: an env filter, span storage and a bunyan layer
/// writing to `sink`.
///
/// `RUST_LOG` takes precedence over `default_directives`.
pub fn get_subscriber<Sink>(
    name: &str,
    default_directives: &str,
    sink: Sink,
) -> Result<impl Subscriber + Send + Sync, TelemetryError>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives)?,
    };
    let formatting_layer = BunyanFormattingLayer::new(name.to_owned(), sink);
    Ok(Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer))
}

/// Install `subscriber` for the whole process. Fails if called twice.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), TelemetryError> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
