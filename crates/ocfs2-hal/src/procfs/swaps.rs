//! Parsing helpers for `/proc/swaps`.

use std::path::PathBuf;

/// Return the device (or file) paths of active swap areas.
pub fn parse_swaps(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(|path| PathBuf::from(super::mountinfo::unescape_mount_path(path)))
        .collect()
}
