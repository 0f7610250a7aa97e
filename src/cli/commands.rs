//! Subcommand dispatch.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::{input, output};
use crate::engine;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Compute { file }) => compute(file),
        Some(Commands::Tree { file }) => tree(file),
        Some(Commands::Check { file }) => check(file),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

#[instrument(level = "debug")]
fn compute(file: &Path) -> CliResult<()> {
    debug!("family file: {:?}", file);
    let tree = input::load_family_file(file)?;
    let division = engine::divide(&tree)?;
    output::print_division(&tree, &division);
    Ok(())
}

#[instrument(level = "debug")]
fn tree(file: &Path) -> CliResult<()> {
    debug!("family file: {:?}", file);
    let tree = input::load_family_file(file)?;
    if let Some(rendered) = output::render_tree(&tree) {
        println!("{}", rendered);
    }
    Ok(())
}

#[instrument(level = "debug")]
fn check(file: &Path) -> CliResult<()> {
    debug!("family file: {:?}", file);
    let tree = input::load_family_file(file)?;
    let classification = engine::classify(&tree)?;
    let summary = classification
        .by_category()
        .iter()
        .map(|(category, members)| format!("{} ×{}", category, members.len()))
        .join(", ");
    output::success(&format!(
        "{} persons, {} potential heirs: {}",
        tree.len(),
        classification.entries().len(),
        summary
    ));
    Ok(())
}
