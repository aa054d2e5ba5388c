//! `merge` subcommand.

use crate::errors::RfdResult;
use clap::Args;

/// CLI arguments for the `merge` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct MergeCmd;

impl MergeCmd {
    /// Run the `merge` subcommand.
    ///
    /// Declared but not implemented: transitioning an RFD to accepted and
    /// merging its branch into the trunk remains a manual process.
    pub fn run(self) -> RfdResult<()> {
        println!(
            "`merge` is not implemented. Set the RFD's state to accepted in its readme and merge the branch into the trunk manually."
        );
        Ok(())
    }
}
