use std::str::FromStr;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log level: {0}")]
    InvalidLevel(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to init logger: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

pub fn init(level: &str) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::from_str(level)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;

    Ok(())
}
