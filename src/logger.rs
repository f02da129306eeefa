//! Process-wide `log` setup for binaries embedding the crate.

use flexi_logger::{
    Cleanup, Criterion, DeferredNow, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};
use log::Record;
use std::path::Path;

fn line_format(
    writer: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        writer,
        "[{}][{}][{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.line().unwrap_or(0),
        &record.args()
    )
}

/// Route `log` output to stdout, or to rotating files under `log_dir`.
///
/// Keep the returned handle alive for as long as logging is needed.
pub fn init_logger(log_level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_str(log_level)?.format(line_format);
    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("face-overlay"))
            .rotate(
                Criterion::Size(3_000_000),
                Naming::Numbers,
                Cleanup::KeepLogFiles(15),
            )
            .start(),
        None => logger.log_to_stdout().start(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_level_spec() {
        assert!(init_logger("face_overlay=notalevel", None).is_err());
    }
}
