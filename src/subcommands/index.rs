//! `index` subcommand.

use crate::{ctx::RfdContext, errors::RfdResult, index::IndexBuilder};
use clap::Args;
use nu_ansi_term::Color::Blue;

/// CLI arguments for the `index` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct IndexCmd;

impl IndexCmd {
    /// Run the `index` subcommand.
    pub fn run(self, ctx: RfdContext<'_>) -> RfdResult<()> {
        tracing::info!("creating index file");
        let path = IndexBuilder::new(&ctx.config).write()?;
        println!("Wrote {}", Blue.paint(path.display().to_string()));
        Ok(())
    }
}
