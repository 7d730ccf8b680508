use std::io::Write;

use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle, Record};

/// Starts console logging. The level comes from `RUST_LOG`, falling back to
/// `default_spec`. Keep the returned handle alive for the life of the program.
pub fn setup(default_spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    let handle = Logger::try_with_env_or_str(default_spec)?
        .format(console_format)
        .start()?;

    log::debug!("logging started (default spec '{default_spec}', override with RUST_LOG)");
    Ok(handle)
}

pub fn console_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {:<5} [{}] {}",
        now.now().format("%H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        record.args()
    )
}
