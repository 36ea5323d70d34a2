//! Common test utilities for dockhand acceptance tests.
//!
//! `TestEnv` gives every test an isolated project directory plus fake
//! `docker`/`scp`/`ssh` binaries that record their invocations to a log
//! file, so the pipeline can be asserted end to end without a daemon or
//! a remote host.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a dockhand CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated test environment with fake external tools.
pub struct TestEnv {
    /// Temporary directory acting as the project root (and cwd)
    pub project_root: TempDir,
    /// Temporary directory for HOME (so no user config leaks in)
    pub home_dir: TempDir,
    tool_log: PathBuf,
    fake_bins: Vec<(&'static str, PathBuf)>,
    dockhand_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let project_root = TempDir::new().expect("create project tempdir");
        let home_dir = TempDir::new().expect("create home tempdir");
        let bin_dir = project_root.path().join("fake-bin");
        std::fs::create_dir_all(&bin_dir).expect("create fake bin dir");

        let tool_log = project_root.path().join("tool.log");

        let mut fake_bins = Vec::new();
        for tool in ["docker", "scp", "ssh"] {
            let path = write_fake_tool(&bin_dir, tool, &tool_log);
            fake_bins.push((tool, path));
        }

        Self {
            project_root,
            home_dir,
            tool_log,
            fake_bins,
            dockhand_bin: PathBuf::from(env!("CARGO_BIN_EXE_dockhand")),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Make one fake tool exit 1, either always (`None`) or only when
    /// its first argument matches (e.g. `Some("build")`). The failing
    /// invocation is still logged.
    pub fn fail_tool(&self, tool: &str, on_subcommand: Option<&str>) {
        let (_, path) = self
            .fake_bins
            .iter()
            .find(|(name, _)| *name == tool)
            .expect("unknown fake tool");
        let guard = match on_subcommand {
            Some(sub) => format!("if [ \"$1\" = '{sub}' ]; then exit 1; fi\n"),
            None => "exit 1\n".to_string(),
        };
        let script = format!(
            "#!/bin/sh\n\
             {{ printf '%s %s' '{tool}' \"$*\" | tr '\\n' ';'; printf '\\n'; }} >> '{log}'\n\
             {guard}\
             exit 0\n",
            tool = tool,
            log = self.tool_log.display(),
            guard = guard,
        );
        std::fs::write(path, script).expect("rewrite fake tool");
    }

    /// Pre-create a staged archive (for `ship` tests)
    pub fn stage_archive(&self, name: &str) {
        let staging = self.project_path("images");
        std::fs::create_dir_all(&staging).expect("create staging dir");
        std::fs::write(staging.join(name), b"fake image tar").expect("write archive");
    }

    /// Run dockhand in this environment from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run dockhand with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.dockhand_bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("DOCKHAND_NO_COLOR", "1");

        for (tool, path) in &self.fake_bins {
            let key = format!("DOCKHAND_{}", tool.to_uppercase());
            cmd.env(key, path);
        }

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute dockhand");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Everything the fake tools recorded, one invocation per line
    pub fn tool_log(&self) -> String {
        std::fs::read_to_string(&self.tool_log).unwrap_or_default()
    }

    /// Recorded invocations of one tool, in order.
    ///
    /// Availability checks (`docker --version`, bare `scp`) are not
    /// counted; only invocations that do real work.
    pub fn tool_calls(&self, tool: &str) -> Vec<String> {
        self.tool_log()
            .lines()
            .filter(|line| line.starts_with(&format!("{tool} ")))
            .filter(|line| line.trim_end() != tool && !line.contains("--version"))
            .map(|line| line.to_string())
            .collect()
    }
}

/// Write a fake tool script that logs its argv and exits 0.
///
/// The fake docker also honors `save -o <path>` by creating the output
/// file, so a full pipeline leaves real staged archives behind.
fn write_fake_tool(bin_dir: &Path, tool: &str, log: &Path) -> PathBuf {
    let path = bin_dir.join(tool);
    // Newlines in arguments (the ssh reload script) are folded into ';'
    // so the log stays one line per invocation.
    let script = format!(
        "#!/bin/sh\n\
         {{ printf '%s %s' '{tool}' \"$*\" | tr '\\n' ';'; printf '\\n'; }} >> '{log}'\n\
         if [ \"$1\" = save ] && [ \"$2\" = -o ]; then\n\
         \tmkdir -p \"$(dirname \"$3\")\"\n\
         \t: > \"$3\"\n\
         fi\n\
         exit 0\n",
        tool = tool,
        log = log.display(),
    );
    std::fs::write(&path, script).expect("write fake tool");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&path).expect("stat fake tool").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod fake tool");
    }

    path
}
