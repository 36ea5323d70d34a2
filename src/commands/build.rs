//! Build phase only: docker build + docker save into the staging dir.

use anyhow::Result;

use dockhand::plan::Phase;

use crate::cli::{Cli, SelectionArgs};

pub fn run(cli: &Cli, args: &SelectionArgs) -> Result<()> {
    super::run(cli, args, Phase::BuildOnly)
}
