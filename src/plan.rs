//! Deployment plan
//!
//! A plan is the ordered list of steps a run will perform, resolved from
//! the service selection and the requested phases. Building the plan is
//! pure (and unit-tested); executing it spawns the external tools one
//! step at a time, strictly in order.

use std::path::PathBuf;

use crate::config::Config;
use crate::docker::DockerCli;
use crate::error::{DockhandError, DockhandResult};
use crate::output;
use crate::remote::RemoteReload;
use crate::shell;
use crate::transfer::ScpTransfer;

/// Which services a run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every configured service
    All,
    /// A single named service
    One(String),
}

/// Which pipeline phases a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// build + save + transfer + reload
    Full,
    /// build + save only
    BuildOnly,
    /// transfer + reload only
    ShipOnly,
}

/// One pipeline step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `docker build` one service
    Build { service: String },
    /// `docker save` one service into the staging dir
    Save { service: String },
    /// One scp invocation covering all selected archives
    Transfer { services: Vec<String>, verify: bool },
    /// One ssh session: load archives, restart the stack
    Reload,
}

/// Ordered, resolved deployment plan
#[derive(Debug)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    /// Resolve (selection, phase) against the configuration.
    ///
    /// Step order is the contract the original deploy flow promises:
    /// every selected build and save completes before the single
    /// transfer, and the transfer precedes the single reload.
    pub fn new(config: &Config, selection: &Selection, phase: Phase) -> DockhandResult<Self> {
        let selected = Self::select(config, selection)?;
        let mut steps = Vec::new();

        if matches!(phase, Phase::Full | Phase::BuildOnly) {
            for name in &selected {
                steps.push(Step::Build {
                    service: name.clone(),
                });
                steps.push(Step::Save {
                    service: name.clone(),
                });
            }
        }

        if matches!(phase, Phase::Full | Phase::ShipOnly) {
            steps.push(Step::Transfer {
                services: selected,
                // the full pipeline just wrote the archives itself
                verify: phase == Phase::ShipOnly,
            });
            steps.push(Step::Reload);
        }

        Ok(Self { steps })
    }

    fn select(config: &Config, selection: &Selection) -> DockhandResult<Vec<String>> {
        match selection {
            Selection::All => Ok(config.services.keys().cloned().collect()),
            Selection::One(name) => {
                if config.services.contains_key(name) {
                    Ok(vec![name.clone()])
                } else {
                    Err(DockhandError::UnknownService {
                        name: name.clone(),
                        available: config.service_names(),
                    })
                }
            }
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn archives(config: &Config, services: &[String]) -> Vec<PathBuf> {
        services
            .iter()
            .filter_map(|name| config.services.get(name))
            .map(|service| config.build.staging_dir.join(service.archive_name()))
            .collect()
    }

    /// Human-readable command lines, one per step (dry-run display)
    pub fn describe(&self, config: &Config) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Build { service } => {
                    let args = DockerCli::build_args(&config.services[service]);
                    format!("{} {}", config.tools.docker, args.join(" "))
                }
                Step::Save { service } => {
                    let args =
                        DockerCli::save_args(&config.services[service], &config.build.staging_dir);
                    format!("{} {}", config.tools.docker, args.join(" "))
                }
                Step::Transfer { services, .. } => {
                    let args = ScpTransfer::transfer_args(
                        &Self::archives(config, services),
                        &config.remote.host,
                        &config.remote.image_dir,
                    );
                    format!("{} {}", config.tools.scp, args.join(" "))
                }
                Step::Reload => format!(
                    "{} {} {}",
                    config.tools.ssh,
                    config.remote.host,
                    shell::quote(&RemoteReload::reload_script(config))
                ),
            })
            .collect()
    }

    /// Verify the external tools this plan needs are runnable.
    ///
    /// Runs before the first step so a missing tool fails the run
    /// up front, not halfway through with images already built.
    fn preflight(&self, config: &Config) -> DockhandResult<()> {
        let needs_docker = self
            .steps
            .iter()
            .any(|s| matches!(s, Step::Build { .. } | Step::Save { .. }));
        if needs_docker && !DockerCli::new(&config.tools.docker).check_available() {
            return Err(DockhandError::ToolNotFound {
                tool: config.tools.docker.clone(),
                message: "not found".to_string(),
            });
        }

        let needs_scp = self
            .steps
            .iter()
            .any(|s| matches!(s, Step::Transfer { .. }));
        if needs_scp && !ScpTransfer::new(&config.tools.scp).check_available() {
            return Err(DockhandError::ToolNotFound {
                tool: config.tools.scp.clone(),
                message: "not found".to_string(),
            });
        }

        Ok(())
    }

    /// Run every step in order, stopping at the first failure
    pub fn execute(&self, config: &Config) -> DockhandResult<()> {
        self.preflight(config)?;

        for step in &self.steps {
            match step {
                Step::Build { service } => {
                    output::step("🔨", &format!("Building {service}"));
                    DockerCli::new(&config.tools.docker).build(&config.services[service])?;
                }
                Step::Save { service } => {
                    output::step("📦", &format!("Saving {service}"));
                    DockerCli::new(&config.tools.docker)
                        .save(&config.services[service], &config.build.staging_dir)?;
                }
                Step::Transfer { services, verify } => {
                    let archives = Self::archives(config, services);
                    if *verify {
                        ScpTransfer::verify_archives(&archives)?;
                    }
                    output::step(
                        "🚚",
                        &format!(
                            "Shipping {} archive(s) to {}",
                            archives.len(),
                            config.remote.host
                        ),
                    );
                    ScpTransfer::new(&config.tools.scp).transfer(
                        &archives,
                        &config.remote.host,
                        &config.remote.image_dir,
                    )?;
                }
                Step::Reload => {
                    output::step(
                        "🔁",
                        &format!("Reloading compose stack on {}", config.remote.host),
                    );
                    RemoteReload::new(&config.tools.ssh).reload(config)?;
                }
            }
        }

        Ok(())
    }
}
