//! Ship phase only: transfer staged archives, then the remote reload.
//!
//! Unlike the full pipeline this run did not just produce the archives,
//! so they are verified to exist before scp is invoked.

use anyhow::Result;

use dockhand::plan::Phase;

use crate::cli::{Cli, SelectionArgs};

pub fn run(cli: &Cli, args: &SelectionArgs) -> Result<()> {
    super::run(cli, args, Phase::ShipOnly)
}
