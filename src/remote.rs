//! Remote reload over ssh
//!
//! One ssh session loads whatever archives made it to the remote image
//! directory and bounces the compose stack. The load step is tolerant:
//! a partial deploy (`dockhand auth`) leaves the other archives absent
//! on the remote, and that must not abort the session.

use std::process::{Command, Stdio};

use crate::config::Config;
use crate::error::{DockhandError, DockhandResult};
use crate::shell;

/// Compose stack reload over a single ssh session
pub struct RemoteReload {
    bin: String,
}

impl RemoteReload {
    pub fn new(bin: &str) -> Self {
        Self {
            bin: bin.to_string(),
        }
    }

    /// Shell script executed on the remote host.
    ///
    /// Covers EVERY configured service, not just the selected ones: the
    /// stack restart always recreates all containers, picking up any
    /// archive that was shipped. Absent archives are skipped, and a
    /// failing load is suppressed so the restart still happens.
    pub fn reload_script(config: &Config) -> String {
        let mut lines = Vec::new();

        for service in config.services.values() {
            let archive = format!(
                "{}/{}",
                config.remote.image_dir.trim_end_matches('/'),
                service.archive_name()
            );
            let quoted = shell::quote(&archive);
            lines.push(format!(
                "if [ -f {quoted} ]; then docker load -i {quoted} || true; fi"
            ));
        }

        lines.push(format!(
            "cd {} && docker compose down && docker compose up -d",
            shell::quote(&config.remote.stack_dir)
        ));

        lines.join("\n")
    }

    /// Run the reload script on the configured host
    pub fn reload(&self, config: &Config) -> DockhandResult<()> {
        let script = Self::reload_script(config);

        let status = Command::new(&self.bin)
            .arg(&config.remote.host)
            .arg(&script)
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
                tool: "ssh".to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}
