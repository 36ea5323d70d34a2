//! Command orchestration: resolve config and selection, run the plan.

pub mod build;
pub mod deploy;
pub mod ship;

use anyhow::Result;
use clap::CommandFactory;

use dockhand::plan::{Phase, Plan, Selection};
use dockhand::{output, Config, DockhandError};

use crate::cli::{Cli, SelectionArgs};

/// Load config (explicit path, project, user, defaults) and surface
/// unknown-key warnings.
fn load_config(cli: &Cli) -> Result<Config> {
    let (config, warnings) = Config::load_or_default(cli.config.as_deref())?;
    if !warnings.is_empty() {
        let file = warnings[0].file.clone();
        output::print_config_warnings(&file, &warnings);
    }
    Ok(config)
}

fn selection(args: &SelectionArgs) -> Selection {
    match args.service_name() {
        Some(name) => Selection::One(name),
        None => Selection::All,
    }
}

/// Shared run path for every command: build the plan, then either print
/// it (dry run) or execute it.
pub fn run(cli: &Cli, args: &SelectionArgs, phase: Phase) -> Result<()> {
    let config = load_config(cli)?;

    let plan = match Plan::new(&config, &selection(args), phase) {
        Ok(plan) => plan,
        Err(err @ DockhandError::UnknownService { .. }) => {
            // Bad service names get usage guidance, like any other bad argument
            eprintln!("{}", Cli::command().render_usage());
            eprintln!();
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    if cli.verbose > 0 && !cli.dry_run {
        for line in plan.describe(&config) {
            eprintln!("+ {line}");
        }
    }

    if cli.dry_run {
        for line in plan.describe(&config) {
            println!("{line}");
        }
        return Ok(());
    }

    plan.execute(&config)?;
    output::done("Done!");
    Ok(())
}
