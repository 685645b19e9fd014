use crate::config::Config;
use std::{fs::File, io, sync::Arc};
use tracing::info;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured logging.
///
/// The terminal UI owns stdout, so logs go to `--log-file` when given, to
/// stderr in headless mode and nowhere otherwise. `RUST_LOG` sets the level
/// (default: info).
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match &config.log_file {
        Some(path) => BoxMakeWriter::new(Arc::new(File::create(path)?)),
        None if config.headless => BoxMakeWriter::new(io::stderr),
        None => BoxMakeWriter::new(io::sink),
    };
    let ansi = config.log_file.is_none() && config.headless;

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.trace_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_writer(writer),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(ansi)
                    .with_writer(writer)
                    .compact(),
            )
            .try_init()?;
    }

    info!(json = config.trace_json, "Tracing initialized");
    Ok(())
}
