//! The subcommands for the `rfd` application.

use clap::Subcommand;

mod check;
mod environment;
mod index;
mod init;
mod merge;
mod new;

pub use check::CheckCmd;
pub use environment::EnvironmentCmd;
pub use index::IndexCmd;
pub use init::InitCmd;
pub use merge::MergeCmd;
pub use new::NewCmd;

#[derive(Debug, Clone, Eq, PartialEq, Subcommand)]
pub enum Subcommands {
    /// Initialise an RFD repository and its bootstrap RFD 0001.
    Init(InitCmd),
    /// Create the next RFD on its own numbered branch.
    #[clap(alias = "n")]
    New(NewCmd),
    /// Rebuild index.md from the front matter of every RFD readme.
    #[clap(alias = "i")]
    Index(IndexCmd),
    /// Report whether the working tree is clean enough to create a new RFD.
    #[clap(alias = "status")]
    Check(CheckCmd),
    /// Display the resolved configuration and SSH key details.
    #[clap(alias = "env")]
    Environment(EnvironmentCmd),
    /// Transition an accepted RFD into the trunk (not implemented).
    Merge(MergeCmd),
}
