//! dockhand CLI - build, ship and reload docker compose stacks
//!
//! Usage: dockhand [-a | -m | SERVICE] [COMMAND]
//!
//! Commands:
//!   build   Build images and save them to the staging directory
//!   ship    Transfer staged archives and reload the remote stack
//!
//! Without a command, dockhand runs the whole pipeline: build + save
//! the selected services, scp the archives over, then restart the
//! remote compose stack in one ssh session.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Build { selection }) => commands::build::run(&cli, selection),
        Some(Commands::Ship { selection }) => commands::ship::run(&cli, selection),
        None => commands::deploy::run(&cli, &cli.selection),
    }
}
