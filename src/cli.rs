use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// dockhand - build, ship and reload docker compose stacks on a remote host
#[derive(Parser, Debug)]
#[command(name = "dockhand")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "Run 'dockhand' without arguments to deploy every configured service.")]
pub struct Cli {
    /// Print each command without executing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./dockhand.toml, then ~/.config/dockhand/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Service selection shared by every command.
///
/// `-a` and `-m` are kept for muscle memory from the old deploy script;
/// the positional form takes any name configured under `[services]`.
#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Only the auth service (same as 'auth')
    #[arg(short = 'a', conflicts_with_all = ["main_only", "service"])]
    pub auth_only: bool,

    /// Only the main service (same as 'main')
    #[arg(short = 'm', conflicts_with = "service")]
    pub main_only: bool,

    /// Service to deploy (defaults to every configured service)
    pub service: Option<String>,
}

impl SelectionArgs {
    /// Named service this invocation asked for, if any
    pub fn service_name(&self) -> Option<String> {
        if self.auth_only {
            Some("auth".to_string())
        } else if self.main_only {
            Some("main".to_string())
        } else {
            self.service.clone()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build images and save them to the staging directory
    Build {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Transfer staged archives and reload the remote stack
    Ship {
        #[command(flatten)]
        selection: SelectionArgs,
    },
}
