use flexi_logger::{
    colored_default_format, detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger,
    LoggerHandle, Naming,
};
use std::path::Path;

/// Starts the global logger. `RUST_LOG` overrides `level` when set.
///
/// With a `log_dir`, records go to rotating files in that directory and
/// info and above are still echoed to stderr. Keep the returned handle alive
/// until the program exits so buffered records get flushed.
pub fn setup_logging(level: &str, log_dir: Option<&Path>) -> crate::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(level)?;

    let handle = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("hex_skirmish"))
            .format_for_files(detailed_format)
            .format_for_stderr(colored_default_format)
            .duplicate_to_stderr(Duplicate::Info)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // 10 MB per file
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .start()?,
        None => logger.format(colored_default_format).start()?,
    };
    Ok(handle)
}
