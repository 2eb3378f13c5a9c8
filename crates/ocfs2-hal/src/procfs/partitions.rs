//! Parsing helpers for `/proc/partitions`.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Extract device names from `/proc/partitions`.
///
/// Lines look like `   8        1   52428800 sda1`; the header and blank lines
/// do not start with three integers and are skipped.
pub fn parse_partitions(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            for _ in 0..3 {
                fields.next()?.parse::<u64>().ok()?;
            }
            fields.next().map(str::to_string)
        })
        .collect()
}

/// Get base disk from partition path.
///
/// Examples:
/// - `/dev/sda1` -> `/dev/sda`
/// - `/dev/nvme0n1p2` -> `/dev/nvme0n1`
/// - `/dev/mmcblk0p2` -> `/dev/mmcblk0`
pub fn base_disk(dev: &str) -> String {
    let mut s = dev.to_string();
    if s.contains("nvme") || s.contains("mmcblk") {
        if let Some(pos) = s.rfind('p') {
            let tail = &s[pos + 1..];
            if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
                s.truncate(pos);
            }
        }
        return s;
    }
    while s.ends_with(|c: char| c.is_ascii_digit()) {
        s.pop();
    }
    s
}

/// Turn device names into the devices worth probing.
///
/// A disk that carries partitions contributes only its partitions; a disk
/// without any contributes itself. Output is grouped by disk.
pub fn candidate_devices<S: AsRef<str>>(names: &[S]) -> Vec<PathBuf> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in names {
        let dev = format!("/dev/{}", name.as_ref());
        let disk = base_disk(&dev);
        let members = groups.entry(disk.clone()).or_default();
        if dev == disk {
            if members.is_empty() {
                members.push(dev);
            }
        } else {
            members.retain(|d| d != &disk);
            members.push(dev);
        }
    }
    groups.into_values().flatten().map(PathBuf::from).collect()
}
