//! The maximum-ID resolver: computes the next free RFD number from local
//! branches, trunk directories, and remote branches.

use super::RfdContext;
use crate::{
    constants::DEFAULT_REMOTE,
    errors::RfdResult,
    git::RepositoryExt,
    id::{parse_leading_id, RfdNumber},
};

/// Returns the greatest RFD ordinal among the given names, and 0 when none
/// match the identifier pattern.
fn max_id<I, S>(names: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| parse_leading_id(name.as_ref()))
        .max()
        .unwrap_or(0)
}

impl RfdContext<'_> {
    /// Computes the next available RFD number.
    ///
    /// The maximum identifier is resolved across three independent sources:
    /// local branch names, directories in the repository root, and branch
    /// names on `origin`. Uniqueness is advisory only; nothing guards against
    /// a concurrent invocation claiming the same number.
    ///
    /// Listing the remote requires reachable, authenticated transport; any
    /// failure there fails the whole resolution.
    pub fn next_rfd_number(&self) -> RfdResult<RfdNumber> {
        let local = self.max_local_branch_id()?;
        tracing::debug!(max = local, "local branch max id");

        let directory = self.max_directory_id()?;
        tracing::debug!(max = directory, "directory max id");

        let remote = self.max_remote_branch_id()?;
        tracing::debug!(max = remote, "remote branch max id");

        RfdNumber::new(local.max(directory).max(remote) + 1)
    }

    /// Greatest identifier among local branch names.
    fn max_local_branch_id(&self) -> RfdResult<u32> {
        Ok(max_id(self.repository.local_branch_names()?))
    }

    /// Greatest identifier among directory entries in the repository root.
    /// Non-directory entries are ignored even when their names match.
    fn max_directory_id(&self) -> RfdResult<u32> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.config.root_directory)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(max_id(names))
    }

    /// Greatest identifier among branch names on `origin`.
    fn max_remote_branch_id(&self) -> RfdResult<u32> {
        let key = self.config.ssh_key_path()?;
        Ok(max_id(
            self.repository.remote_branch_names(DEFAULT_REMOTE, &key)?,
        ))
    }
}
