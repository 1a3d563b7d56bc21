//! Process-wide logging setup for rebound binaries.
//!
//! Library crates only emit `tracing` events; an application picks the output
//! once at startup with [`init_logging`].

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
pub use config::LogConfig;

mod error;
pub use error::{LogError, LogResult};

mod format;
pub use format::LogFormat;

mod level;
pub use level::LogLevel;

mod timezone;
pub use timezone::{LogTimeZone, LogTimer, init_local_offset};

/// Installs the global `tracing` subscriber described by `cfg`.
///
/// Fails with [`LogError::AlreadyInitialized`] if a global subscriber exists.
/// When `cfg.tz` is [`LogTimeZone::Local`], call [`init_local_offset`] before
/// spawning threads.
///
/// # Examples
/// ```no_run
/// use rebound_observe::{LogConfig, init_logging};
///
/// init_logging(&LogConfig::default()).expect("logger");
/// tracing::info!("ready");
/// ```
pub fn init_logging(cfg: &LogConfig) -> LogResult<()> {
    let filter = cfg.level.to_env_filter();
    let timer = LogTimer::new(cfg.tz);

    match cfg.format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_ansi(cfg.should_use_color())
                .with_target(cfg.with_targets)
                .with_timer(timer);
            install(tracing_subscriber::registry().with(filter).with(layer))
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(cfg.with_targets)
                .with_timer(timer);
            install(tracing_subscriber::registry().with(filter).with(layer))
        }
        LogFormat::Journald => journald(filter),
    }
}

#[cfg(target_os = "linux")]
fn journald(filter: tracing_subscriber::EnvFilter) -> LogResult<()> {
    let layer =
        tracing_journald::layer().map_err(|e| LogError::JournaldInitFailed(e.to_string()))?;
    install(tracing_subscriber::registry().with(filter).with(layer))
}

#[cfg(not(target_os = "linux"))]
fn journald(_filter: tracing_subscriber::EnvFilter) -> LogResult<()> {
    Err(LogError::JournaldNotSupported)
}

fn install<S>(subscriber: S) -> LogResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}
