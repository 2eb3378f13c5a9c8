use env_logger::Target;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default log location when neither the CLI nor the config names one.
pub fn default_log_path() -> PathBuf {
    std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .map(|dir| dir.join("ocfs2-format").join("ocfs2-format.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("ocfs2-format.log"))
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Initialise env_logger.
///
/// The TUI owns the terminal, so records go to `log_file`. If the file cannot be
/// opened (permissions, readonly FS, etc.) we fall back to stderr. `RUST_LOG`
/// still overrides the level.
pub fn init_with(log_file: &Path, verbose: bool) {
    let target = match open_log_file(log_file) {
        Ok(file) => Target::Pipe(Box::new(file)),
        Err(_) => Target::Stderr,
    };

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(target)
        .try_init();
}
