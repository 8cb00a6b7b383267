//! Logging hooks for the proxy layer.
//!
//! Construction and dispatch paths emit structured key-value events through the
//! `log` facade using [`log_event!`]. Nothing is printed unless the embedding
//! application installs a logger, or calls [`enable_verbose_logging`].

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Once;

use colored::Colorize;
use log::{Level, LevelFilter};

/// Logs a structured key-value event at `debug` level.
///
/// # Example
/// ```
/// use arrow_host::log_event;
/// let length = 4;
/// log_event!("event" = "make_proxy", "class" = "arrow.array.proxy.Int32Array", "length" = length);
/// ```
#[macro_export]
macro_rules! log_event {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if $crate::__log::log_enabled!($crate::__log::Level::Debug) {
            let mut parts = Vec::new();
            $(
                parts.push(format!("{}={}", $key, $value));
            )+
            $crate::__log::debug!("{}", parts.join(" "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs a process-wide `env_logger` at `Debug` level.
///
/// Only the first call has any effect; later calls do not touch `log_file`.
/// When `log_file` is given, records are appended to that file instead of stderr.
pub fn enable_verbose_logging(log_file: Option<&str>) -> Result<(), crate::error::ArrowHostError> {
    let mut result = Ok(());

    INIT_LOGGER.call_once(|| {
        let target = match log_file.map(open_log_file).transpose() {
            Ok(target) => target,
            Err(e) => {
                result = Err(e);
                return;
            }
        };

        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Just the level and the message.
        builder.format(|buf, record| {
            let level = match record.level() {
                Level::Error => "ERROR".red(),
                Level::Warn => "WARN".yellow(),
                Level::Info => "INFO".green(),
                Level::Debug => "DEBUG".cyan(),
                Level::Trace => "TRACE".dimmed(),
            };
            writeln!(buf, "[{}] {}", level, record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = target {
            // Escape codes don't belong in a log file.
            colored::control::set_override(false);
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });

    result
}

fn open_log_file(path: &str) -> Result<File, crate::error::ArrowHostError> {
    Ok(OpenOptions::new().append(true).create(true).open(path)?)
}
