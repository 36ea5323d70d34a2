//! SCP archive transfer
//!
//! Copies staged image archives to the remote image directory. scp is
//! the only transport: archives are single large files, so rsync-style
//! incremental transfer buys nothing here.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{DockhandError, DockhandResult};

/// Transfer of staged archives over scp
pub struct ScpTransfer {
    bin: String,
}

impl ScpTransfer {
    pub fn new(bin: &str) -> Self {
        Self {
            bin: bin.to_string(),
        }
    }

    /// Check if scp is installed and available
    pub fn check_available(&self) -> bool {
        // scp without args returns non-zero, but if we can spawn it, it's available
        Command::new(&self.bin)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// Argument vector for the transfer (separated for dry-run display)
    pub fn transfer_args(archives: &[PathBuf], host: &str, image_dir: &str) -> Vec<String> {
        let mut args: Vec<String> = archives
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        args.push(format!("{}:{}", host, image_dir));
        args
    }

    /// Verify every archive exists locally before invoking scp
    pub fn verify_archives(archives: &[PathBuf]) -> DockhandResult<()> {
        for archive in archives {
            if !archive.is_file() {
                return Err(DockhandError::ArchiveMissing {
                    path: archive.clone(),
                });
            }
        }
        Ok(())
    }

    /// Copy the archives to `<host>:<image_dir>` in one scp invocation
    pub fn transfer(
        &self,
        archives: &[PathBuf],
        host: &str,
        image_dir: &str,
    ) -> DockhandResult<()> {
        let status = Command::new(&self.bin)
            .args(Self::transfer_args(archives, host, image_dir))
            .stdin(Stdio::inherit()) // allow password input
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| DockhandError::ToolNotFound {
                tool: self.bin.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(DockhandError::CommandFailed {
                tool: "scp".to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}
