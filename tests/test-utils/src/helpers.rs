//! Test helper functions and utilities

use std::io::Write;
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

/// Initialize test logging with environment-based configuration.
///
/// Safe to call multiple times; later calls are ignored.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write `contents` to a temp file whose name ends in `suffix` (e.g. `.csv`)
pub fn temp_file_with(contents: &str, suffix: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("journal-")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
