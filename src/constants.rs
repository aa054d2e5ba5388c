//! Constants for the `rfd` application.

/// Name of the YAML configuration file, read from the working directory.
pub(crate) const CONFIG_FILE_NAME: &str = "config.yml";

/// Name of the YAML states file, read from the templates directory.
pub(crate) const STATES_FILE_NAME: &str = "states.yml";

/// Name of the readme file within each RFD directory.
pub(crate) const README_FILE_NAME: &str = "readme.md";

/// Name of the generated markdown index file.
pub(crate) const INDEX_FILE_NAME: &str = "index.md";

/// The remote every RFD branch is published to.
pub(crate) const DEFAULT_REMOTE: &str = "origin";

/// Width of the zero-padded `nnnn` identifier.
pub(crate) const RFD_ID_WIDTH: usize = 4;

/// Greatest ordinal representable in the `nnnn` format.
pub(crate) const MAX_RFD_NUMBER: u32 = 9999;

/// The identifier reserved for the bootstrap RFD created by `rfd init`.
pub(crate) const BOOTSTRAP_RFD_ID: &str = "0001";

/// Commit message used when earmarking a new RFD branch.
pub(crate) const EARMARK_COMMIT_MESSAGE: &str = "Earmark branch";

/// Commit message used when initialising a repository.
pub(crate) const INIT_COMMIT_MESSAGE: &str = "Initialising repository";
