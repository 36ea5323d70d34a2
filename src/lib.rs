//! dockhand - build, ship and reload docker compose stacks on a remote host
//!
//! dockhand turns the usual "build two images, save them to tarballs,
//! scp them over, ssh in and bounce compose" routine into one command.
//! It orchestrates the installed `docker`, `scp` and `ssh` binaries;
//! nothing here speaks the daemon or SSH protocols directly.

pub mod config;
pub mod docker;
pub mod error;
pub mod output;
pub mod plan;
pub mod remote;
pub mod shell;
pub mod transfer;

// Re-exports for convenience
pub use config::{Config, ConfigWarning, ServiceConfig};
pub use docker::DockerCli;
pub use error::{DockhandError, DockhandResult};
pub use plan::{Phase, Plan, Selection, Step};
pub use remote::RemoteReload;
pub use transfer::ScpTransfer;
