//! Error types for the `rfd` application.

use nu_ansi_term::Color;
use thiserror::Error;

/// Errors that can occur while operating on an RFD repository.
#[derive(Error, Debug)]
pub enum RfdError {
    /// The current working directory is not within a git repository.
    #[error("Not in a git repository.")]
    NotAGitRepository,
    /// No configuration file was found in the working directory.
    #[error(
        "No `{}` found in the current directory. Run `rfd init` from the root of your RFD repository.",
        Color::Blue.paint(.0)
    )]
    ConfigNotFound(String),
    /// The states file is missing from the templates directory.
    #[error("States file `{}` not found. Check the templates directory in your configuration.", Color::Blue.paint(.0))]
    StatesFileNotFound(String),
    /// No state with id `1` is defined in the states file.
    #[error("No default state (id `1`) is defined in the states file.")]
    DefaultStateMissing,
    /// The ordinal does not fit the 4-digit `nnnn` format.
    #[error("RFD number `{0}` overflows the 4-digit `nnnn` format.")]
    IdOverflow(u32),
    /// The working tree has staged, unstaged, or untracked changes.
    #[error("Creating a new RFD creates and switches to a new branch. Commit (or otherwise) unstaged and/or uncommitted work first.")]
    WorkingTreeDirty,
    /// A directory supplied during initialisation does not exist.
    #[error("The directory `{}` does not exist.", Color::Blue.paint(.0))]
    DirectoryNotFound(String),
    /// The home directory could not be resolved for SSH key lookup.
    #[error("Could not resolve the home directory for SSH key lookup.")]
    HomeDirNotFound,
    /// A branch reference exists but carries no valid UTF-8 name.
    #[error("Branch name is not valid UTF-8.")]
    BranchNameInvalid,
    /// A [git2::Error] occurred.
    #[error("libgit2 error: {0}")]
    Git(#[from] git2::Error),
    /// An [inquire::InquireError] occurred.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// An I/O error occurred.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A YAML (de)serialization error occurred.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The global tracing subscriber could not be installed.
    #[error("tracing error: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// A short-hand [Result] type for [RfdError].
pub type RfdResult<T> = Result<T, RfdError>;
