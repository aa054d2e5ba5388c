//! `new` subcommand.

use super::check::report_worktree_status;
use crate::{
    ctx::RfdContext,
    errors::{RfdError, RfdResult},
    template::RfdMetadata,
};
use clap::Args;
use nu_ansi_term::Color::{Blue, Green};

/// CLI arguments for the `new` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct NewCmd;

impl NewCmd {
    /// Run the `new` subcommand.
    pub fn run(self, ctx: RfdContext<'_>) -> RfdResult<()> {
        // Creating an RFD switches branches; refuse to touch a dirty tree.
        if !report_worktree_status(ctx.repository)? {
            return Err(RfdError::WorkingTreeDirty);
        }

        tracing::info!("creating a new RFD");
        let number = ctx.next_rfd_number()?;
        println!("New RFD number: {}", Green.paint(number.to_string()));

        let title = inquire::Text::new("Title of the RFD:").prompt()?;
        let authors = inquire::Text::new("Authors, comma delimited:").prompt()?;
        let state = ctx.states.default_state()?.to_string();

        let metadata = RfdMetadata {
            number,
            title,
            authors,
            state,
            link: String::new(),
        };
        ctx.create_rfd(&metadata)?;

        println!(
            "Created RFD `{}` on branch `{}`, published to `origin`.",
            Blue.paint(metadata.title),
            Blue.paint(number.to_string())
        );
        Ok(())
    }
}
