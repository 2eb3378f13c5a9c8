//! Linux HAL implementation using real system calls.

use super::{
    CommandOutcome, FormatOps, FormatOptions, PartitionCandidate, ProbeOps, ProcessOps,
};
use crate::procfs::{mountinfo, partitions, swaps};
use crate::sysfs::block;
use crate::{HalError, HalResult};
use nix::fcntl::OFlag;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Filesystem types that are in use even when nothing is mounted.
const USED_UNMOUNTED_FSTYPES: &[&str] = &["oracleasm"];

const UNKNOWN_FSTYPE: &str = "unknown";

/// Real HAL implementation for Linux systems.
#[derive(Debug, Clone)]
pub struct LinuxHal {
    proc_root: PathBuf,
}

impl Default for LinuxHal {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxHal {
    pub fn new() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
        }
    }

    /// Read procfs files from `root` instead of `/proc`.
    pub fn with_proc_root(root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: root.into(),
        }
    }

    fn read_proc(&self, rel: &str) -> HalResult<String> {
        Ok(fs::read_to_string(self.proc_root.join(rel))?)
    }

    fn blkid_fstype(&self, device: &Path) -> String {
        let args = [
            "-o".to_string(),
            "value".to_string(),
            "-s".to_string(),
            "TYPE".to_string(),
            device.display().to_string(),
        ];
        match self.run_combined("blkid", &args) {
            Ok(out) if out.success => {
                let fstype = out.output.trim();
                if fstype.is_empty() {
                    UNKNOWN_FSTYPE.to_string()
                } else {
                    fstype.to_string()
                }
            }
            // blkid exits 2 when it finds no signature.
            Ok(_) => UNKNOWN_FSTYPE.to_string(),
            Err(err) => {
                log::debug!("blkid failed for {}: {}", device.display(), err);
                UNKNOWN_FSTYPE.to_string()
            }
        }
    }
}

fn map_command_err(program: &str, err: io::Error) -> HalError {
    if err.kind() == io::ErrorKind::NotFound {
        return HalError::CommandNotFound(program.to_string());
    }
    HalError::Io(err)
}

/// Open the device exclusively; the kernel refuses with EBUSY while anything
/// (a mount, swap, device-mapper, md) holds it.
fn is_exclusively_openable(device: &Path) -> bool {
    match OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_EXCL)
        .open(device)
    {
        Ok(_) => true,
        Err(err) => {
            if err.raw_os_error() == Some(libc::EBUSY) {
                log::debug!("{} is busy", device.display());
            } else {
                log::debug!("cannot open {}: {}", device.display(), err);
            }
            false
        }
    }
}

impl ProcessOps for LinuxHal {
    fn run_combined(&self, program: &str, args: &[String]) -> HalResult<CommandOutcome> {
        log::debug!("exec: {} {}", program, args.join(" "));

        // One pipe for both streams keeps the child's output in write order.
        // Close-on-exec so only the dup'ed stdout/stderr reach the child.
        let (reader, writer) = nix::unistd::pipe2(OFlag::O_CLOEXEC)?;
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer.try_clone()?))
            .stderr(Stdio::from(writer));
        let spawned = cmd.spawn();
        // The Command owns our copies of the write end; drop them so the read sees EOF.
        drop(cmd);
        let mut child = spawned.map_err(|e| map_command_err(program, e))?;

        let mut buf = Vec::new();
        File::from(reader).read_to_end(&mut buf)?;
        let status = child.wait()?;

        Ok(CommandOutcome {
            success: status.success(),
            output: String::from_utf8_lossy(&buf).into_owned(),
            code: status.code(),
            signal: status.signal(),
        })
    }
}

impl ProbeOps for LinuxHal {
    fn unmounted_partitions(&self) -> HalResult<Vec<PartitionCandidate>> {
        let names = partitions::parse_partitions(&self.read_proc("partitions")?);
        let mounts = mountinfo::parse_mountinfo(&self.read_proc("self/mountinfo")?);
        // Not every kernel exposes /proc/swaps (CONFIG_SWAP=n).
        let swap_devices = self
            .read_proc("swaps")
            .map(|s| swaps::parse_swaps(&s))
            .unwrap_or_default();

        let mut out = Vec::new();
        for device in partitions::candidate_devices(&names) {
            let Some(name) = block::device_basename(&device) else {
                log::warn!("skipping device with empty path");
                continue;
            };
            if block::should_skip_block_device(&name) || !block::is_block_device(&device) {
                continue;
            }
            if let Some(mount) = mountinfo::find_device_mount(&device, &mounts) {
                log::debug!(
                    "{} is mounted on {} ({})",
                    device.display(),
                    mount.mount_point.display(),
                    mount.fstype
                );
                continue;
            }
            if swap_devices.contains(&device) {
                log::debug!("{} is in use as swap", device.display());
                continue;
            }
            if !is_exclusively_openable(&device) {
                continue;
            }

            let fstype = self.blkid_fstype(&device);
            if USED_UNMOUNTED_FSTYPES.contains(&fstype.as_str()) {
                log::debug!("{} is claimed by {}", device.display(), fstype);
                continue;
            }
            out.push(PartitionCandidate::new(device, fstype));
        }

        log::debug!("found {} unmounted partition(s)", out.len());
        Ok(out)
    }
}

impl FormatOps for LinuxHal {
    fn mkfs(
        &self,
        program: &str,
        args: &[String],
        opts: &FormatOptions,
    ) -> HalResult<CommandOutcome> {
        if !opts.confirmed {
            return Err(HalError::SafetyLock);
        }

        if opts.dry_run {
            log::info!("DRY RUN: {} {}", program, args.join(" "));
            return Ok(CommandOutcome::succeeded(String::new()));
        }

        log::info!("Formatting: {} {}", program, args.join(" "));
        let outcome = self.run_combined(program, args)?;
        if outcome.success {
            log::info!("{} completed", program);
        } else {
            log::warn!(
                "{} failed (exit={:?}, signal={:?})",
                program,
                outcome.code,
                outcome.signal
            );
        }
        Ok(outcome)
    }
}
