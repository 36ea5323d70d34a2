//! Docker CLI invocation
//!
//! Builds images and serializes them to tarball archives by shelling out
//! to the docker CLI. dockhand never talks to the daemon API directly;
//! the process boundary is the installed `docker` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::ServiceConfig;
use crate::error::{DockhandError, DockhandResult};

/// Thin wrapper over the docker binary
pub struct DockerCli {
    bin: String,
}

impl DockerCli {
    pub fn new(bin: &str) -> Self {
        Self {
            bin: bin.to_string(),
        }
    }

    /// Check if docker is installed and available
    pub fn check_available(&self) -> bool {
        Command::new(&self.bin)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Argument vector for `docker build` (separated for dry-run display)
    pub fn build_args(service: &ServiceConfig) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "-t".to_string(),
            service.image.clone(),
        ];
        if let Some(dockerfile) = &service.dockerfile {
            args.push("-f".to_string());
            args.push(dockerfile.display().to_string());
        }
        args.push(service.context.display().to_string());
        args
    }

    /// Argument vector for `docker save`
    pub fn save_args(service: &ServiceConfig, staging_dir: &Path) -> Vec<String> {
        vec![
            "save".to_string(),
            "-o".to_string(),
            staging_dir.join(service.archive_name()).display().to_string(),
            service.image.clone(),
        ]
    }

    /// Build the image for a service. Build output is inherited so the
    /// usual docker progress reaches the user directly.
    pub fn build(&self, service: &ServiceConfig) -> DockhandResult<()> {
        self.run("docker build", &Self::build_args(service))
    }

    /// Serialize a built image into `<staging_dir>/<archive>`
    pub fn save(&self, service: &ServiceConfig, staging_dir: &Path) -> DockhandResult<PathBuf> {
        fs::create_dir_all(staging_dir)?;
        self.run("docker save", &Self::save_args(service, staging_dir))?;
        Ok(staging_dir.join(service.archive_name()))
    }

    fn run(&self, what: &str, args: &[String]) -> DockhandResult<()> {
        let status = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| DockhandError::ToolNotFound {
                tool: self.bin.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(DockhandError::CommandFailed {
                tool: what.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}
