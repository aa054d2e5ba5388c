//! `check` subcommand.

use crate::{ctx::RfdContext, errors::RfdResult, git::RepositoryExt};
use clap::Args;
use git2::Repository;
use nu_ansi_term::Color;

/// CLI arguments for the `check` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct CheckCmd;

impl CheckCmd {
    /// Run the `check` subcommand.
    pub fn run(self, ctx: RfdContext<'_>) -> RfdResult<()> {
        report_worktree_status(ctx.repository)?;
        Ok(())
    }
}

/// Prints the working tree status and returns whether it is clean.
///
/// Shared with `new`, which refuses to run against a dirty tree.
pub(crate) fn report_worktree_status(repository: &Repository) -> RfdResult<bool> {
    println!();
    if repository.is_working_tree_clean()? {
        println!("Nothing to commit, working tree clean.");
        return Ok(true);
    }

    println!("There are changes present in the repository.");
    println!();
    for (path, label) in repository.worktree_report()? {
        println!("{} is {}", path.display(), Color::Yellow.paint(label));
    }
    println!();

    Ok(false)
}
