//! Setup for [tracing] subscribers.

use crate::settings::AppEnvironment;
use anyhow::Result;
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

/// Default log directives when `RUST_LOG` isn't set.
pub const DEFAULT_LOG_FILTER: &str = "mailcode_server=info,tower_http=info";

/// Setup all [tracing][tracing] layers for logging.
///
/// Logs are human readable in the local environment and JSON everywhere
/// else.
pub fn setup_tracing(writer: NonBlocking, environment: AppEnvironment) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let format_layer: Box<dyn Layer<Registry> + Send + Sync> =
        if environment == AppEnvironment::Local {
            fmt::layer().with_writer(writer).with_target(true).boxed()
        } else {
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .with_current_span(true)
                .boxed()
        };

    let registry = tracing_subscriber::registry().with(format_layer.with_filter(filter));

    #[cfg(all(feature = "console", tokio_unstable))]
    #[cfg_attr(docsrs, doc(cfg(feature = "console")))]
    {
        let console_layer = console_subscriber::ConsoleLayer::builder()
            .retention(std::time::Duration::from_secs(60))
            .spawn();

        registry.with(console_layer).try_init()?;
    }

    #[cfg(any(not(feature = "console"), not(tokio_unstable)))]
    {
        registry.try_init()?;
    }

    Ok(())
}
