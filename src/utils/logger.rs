//! Logging setup.
//!
//! Builds the slog drain stack (terminal, syslog and journald drains behind
//! cargo features), installs it as the global logger and bridges the `log`
//! facade macros used throughout the core onto it.

use slog::{o, Drain, Logger};
use slog_scope::GlobalLoggerGuard;

#[cfg(feature = "syslog")]
use slog_syslog::Facility;

#[cfg(all(feature = "journald", target_os = "linux"))]
use slog_journald::JournaldDrain;

use super::error::{Error, Result};

/// Installs the global logger and the `log` crate bridge. The returned guard
/// must stay alive for the lifetime of the program.
pub fn setup_logging() -> Result<GlobalLoggerGuard> {
    let guard = slog_scope::set_global_logger(default_root_logger()?);
    slog_stdlog::init().map_err(|e| Error::with_source("Cannot wire log facade", Box::new(e)))?;
    Ok(guard)
}

/// Composes the drains selected at compile time into the root logger.
pub fn default_root_logger() -> Result<Logger> {
    let drain = slog::Duplicate(default_discard_drain(), default_discard_drain()).fuse();

    #[cfg(all(feature = "journald", target_os = "linux"))]
    let drain = slog::Duplicate(default_journald_drain(), drain).fuse();

    #[cfg(feature = "syslog")]
    let drain = slog::Duplicate(default_syslog_drain()?, drain).fuse();

    #[cfg(feature = "termlog")]
    let drain = slog::Duplicate(default_term_drain(), drain).fuse();

    Ok(Logger::root(drain.ignore_res(), o!("who" => "approvalbot")))
}

fn default_discard_drain() -> slog_async::Async {
    slog_async::Async::default(slog::Discard)
}

#[cfg(feature = "termlog")]
fn default_term_drain() -> slog_async::Async {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let term = slog_term::FullFormat::new(decorator);
    slog_async::Async::default(term.build().fuse())
}

#[cfg(feature = "syslog")]
fn default_syslog_drain() -> Result<slog_async::Async> {
    let syslog = slog_syslog::unix_3164(Facility::LOG_USER)
        .map_err(|e| Error::with_source("Cannot connect to syslog", Box::new(e)))?;
    Ok(slog_async::Async::default(syslog.fuse()))
}

#[cfg(all(feature = "journald", target_os = "linux"))]
fn default_journald_drain() -> slog_async::Async {
    slog_async::Async::default(JournaldDrain.ignore_res())
}
