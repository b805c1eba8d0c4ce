use std::path::Path;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use log::Level;

/// Verbosity of the process wide logging sinks.
#[derive(Debug, Default, PartialOrd, Ord, PartialEq, Eq, Copy, Clone)]
pub enum LogLevel {
    /// No output at all ([`log::LevelFilter::Off`]).
    Silent,
    /// Only errors ([`log::LevelFilter::Error`]).
    Quiet,
    /// All user-facing output ([`log::LevelFilter::Info`]).
    #[default]
    Default,
    /// Everything the front-end does ([`log::LevelFilter::Trace`]).
    Verbose,
}

impl LogLevel {
    const fn level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Silent => log::LevelFilter::Off,
            LogLevel::Quiet => log::LevelFilter::Error,
            LogLevel::Default => log::LevelFilter::Info,
            LogLevel::Verbose => log::LevelFilter::Trace,
        }
    }
}

fn colorized_level(level: Level) -> ColoredString {
    let text = format!("{:<5}", level);
    match level {
        Level::Error => text.red().bold(),
        Level::Warn => text.yellow(),
        Level::Info => text.green(),
        Level::Debug => text.cyan(),
        Level::Trace => text.bright_blue(),
    }
}

/// Install the stderr sink. Records render as
/// `HH:MM:SS LEVEL file:line: message`.
pub fn set_up_logging(level: &LogLevel) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {} {}:{}: {}",
                chrono::Local::now().format("%H:%M:%S"),
                colorized_level(record.level()),
                record.file().unwrap_or("<unknown>"),
                record.line().unwrap_or(0),
                message
            ));
        })
        .level(level.level_filter())
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

/// Install the stderr sink plus a file sink. The file sink renders records
/// as `YYYY-MM-DD HH:MM:SS LEVEL file:line: message` without colors.
pub fn set_up_logging_with_file(level: &LogLevel, path: &Path) -> Result<()> {
    fern::Dispatch::new()
        .level(level.level_filter())
        .chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} {} {}:{}: {}",
                        chrono::Local::now().format("%H:%M:%S"),
                        colorized_level(record.level()),
                        record.file().unwrap_or("<unknown>"),
                        record.line().unwrap_or(0),
                        message
                    ));
                })
                .chain(std::io::stderr()),
        )
        .chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} {:<5} {}:{}: {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        record.file().unwrap_or("<unknown>"),
                        record.line().unwrap_or(0),
                        message
                    ));
                })
                .chain(fern::log_file(path)?),
        )
        .apply()?;
    Ok(())
}
