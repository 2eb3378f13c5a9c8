//! Helpers related to block devices.

use std::fs;
use std::os::unix::fs::FileTypeExt;
use std::path::Path;

pub fn device_basename(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_string())
}

/// True if `path` exists and is a block special file.
pub fn is_block_device(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_block_device())
        .unwrap_or(false)
}

pub fn should_skip_block_device(name: &str) -> bool {
    // Ephemeral or read-only devices are never format targets.
    name.starts_with("loop")
        || name.starts_with("ram")
        || name.starts_with("zram")
        || name.starts_with("sr")
}
