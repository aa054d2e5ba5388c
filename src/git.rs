//! Utilities for interacting with `git` repositories for the `rfd` application.

use crate::errors::{RfdError, RfdResult};
use git2::{
    build::CheckoutBuilder, Branch, BranchType, Direction, ErrorCode, IndexAddOption, Oid,
    PushOptions, RemoteCallbacks, Repository, Status, StatusOptions,
};
use std::{
    env,
    path::{Path, PathBuf},
};

/// Returns the repository for the current working directory, and [None] if
/// the current working directory is not within a git repository or an error
/// occurs.
pub fn active_repository() -> Option<Repository> {
    Repository::discover(env::current_dir().ok()?).ok()
}

/// Builds the [RemoteCallbacks] that authenticate SSH transports with the
/// private key at `key_path`. Local and anonymous transports never invoke the
/// credential callback.
fn ssh_callbacks<'a>(key_path: &Path) -> RemoteCallbacks<'a> {
    let key_path = key_path.to_path_buf();
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |_url, username_from_url, _allowed| {
        git2::Cred::ssh_key(username_from_url.unwrap_or("git"), None, &key_path, None)
    });
    callbacks
}

/// Extension trait for the [Repository] type to expose helper functions related
/// to the RFD branch lifecycle.
pub trait RepositoryExt {
    /// Returns the current branch.
    fn current_branch(&self) -> RfdResult<Branch<'_>>;

    /// Returns the name of the current branch.
    fn current_branch_name(&self) -> RfdResult<String>;

    /// Checks out a branch with the given `branch_name`.
    fn checkout_branch(
        &self,
        branch_name: &str,
        opts: Option<&mut CheckoutBuilder<'_>>,
    ) -> RfdResult<()>;

    /// Returns `true` if the working tree has no staged, unstaged, or
    /// untracked changes (ignored files excluded).
    fn is_working_tree_clean(&self) -> RfdResult<bool>;

    /// Returns the paths of pending changes, each paired with a category label.
    fn worktree_report(&self) -> RfdResult<Vec<(PathBuf, &'static str)>>;

    /// Enumerates the names of all local branches.
    fn local_branch_names(&self) -> RfdResult<Vec<String>>;

    /// Lists the branch names present on the given remote, with the
    /// `refs/heads/` prefix stripped.
    fn remote_branch_names(&self, remote_name: &str, ssh_key: &Path) -> RfdResult<Vec<String>>;

    /// Creates a branch named `branch_name` pointing at the current HEAD commit.
    fn create_branch_at_head(&self, branch_name: &str) -> RfdResult<()>;

    /// Stages the given pathspecs into the index and writes it out.
    fn stage(&self, pathspecs: &[&str]) -> RfdResult<()>;

    /// Commits the staged index with the given message, parented on HEAD.
    /// When HEAD is unborn the staged index becomes the root commit.
    fn commit_staged(&self, message: &str) -> RfdResult<Oid>;

    /// Pushes the given branch to the remote. With `force`, the refspec
    /// overwrites remote history at that ref unconditionally.
    fn push_branch(
        &self,
        branch_name: &str,
        remote_name: &str,
        ssh_key: &Path,
        force: bool,
    ) -> RfdResult<()>;

    /// Records `branch.<name>.remote` / `branch.<name>.merge` tracking
    /// metadata in the repository config.
    fn set_upstream(&self, branch_name: &str, remote_name: &str) -> RfdResult<()>;
}

impl RepositoryExt for Repository {
    fn current_branch(&self) -> RfdResult<Branch<'_>> {
        let head = self.head()?;
        let branch = self.find_branch(
            head.name()
                .map_err(|_| RfdError::BranchNameInvalid)?
                .trim_start_matches("refs/heads/"),
            BranchType::Local,
        )?;
        Ok(branch)
    }

    fn current_branch_name(&self) -> RfdResult<String> {
        match self.current_branch() {
            Ok(branch) => {
                let name = branch.name()?.ok_or(RfdError::BranchNameInvalid)?;
                Ok(name.to_string())
            }
            // Before the first commit HEAD points at a branch that does not
            // exist yet; its name is still the symbolic target.
            Err(RfdError::Git(e))
                if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) =>
            {
                let head = self.find_reference("HEAD")?;
                let target = head
                    .symbolic_target()
                    .ok()
                    .flatten()
                    .ok_or(RfdError::BranchNameInvalid)?;
                Ok(target.trim_start_matches("refs/heads/").to_string())
            }
            Err(e) => Err(e),
        }
    }

    fn checkout_branch(
        &self,
        branch_name: &str,
        opts: Option<&mut CheckoutBuilder<'_>>,
    ) -> RfdResult<()> {
        self.set_head(format!("refs/heads/{}", branch_name).as_str())?;
        self.checkout_head(opts)?;

        Ok(())
    }

    fn is_working_tree_clean(&self) -> RfdResult<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.statuses(Some(&mut opts))?;
        Ok(statuses.is_empty())
    }

    fn worktree_report(&self) -> RfdResult<Vec<(PathBuf, &'static str)>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.statuses(Some(&mut opts))?;

        let report = statuses
            .iter()
            .filter_map(|entry| {
                let path = PathBuf::from(entry.path().ok()?);
                Some((path, status_label(entry.status())))
            })
            .collect();
        Ok(report)
    }

    fn local_branch_names(&self) -> RfdResult<Vec<String>> {
        self.branches(Some(BranchType::Local))?
            .map(|branch| {
                let (branch, _) = branch?;
                branch
                    .name()?
                    .map(ToOwned::to_owned)
                    .ok_or(RfdError::BranchNameInvalid)
            })
            .collect()
    }

    fn remote_branch_names(&self, remote_name: &str, ssh_key: &Path) -> RfdResult<Vec<String>> {
        let mut remote = self.find_remote(remote_name)?;
        let connection =
            remote.connect_auth(Direction::Fetch, Some(ssh_callbacks(ssh_key)), None)?;

        let names = connection
            .list()?
            .iter()
            .filter_map(|head| head.name().strip_prefix("refs/heads/"))
            .map(ToOwned::to_owned)
            .collect();
        Ok(names)
    }

    fn create_branch_at_head(&self, branch_name: &str) -> RfdResult<()> {
        let head_commit = self.head()?.peel_to_commit()?;
        self.branch(branch_name, &head_commit, false)?;
        Ok(())
    }

    fn stage(&self, pathspecs: &[&str]) -> RfdResult<()> {
        let mut index = self.index()?;
        index.add_all(pathspecs.iter().copied(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    fn commit_staged(&self, message: &str) -> RfdResult<Oid> {
        let mut index = self.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.find_tree(tree_id)?;

        let signature = self.signature()?;

        // An unborn HEAD means this is the root commit.
        let parent = match self.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(oid)
    }

    fn push_branch(
        &self,
        branch_name: &str,
        remote_name: &str,
        ssh_key: &Path,
        force: bool,
    ) -> RfdResult<()> {
        let mut remote = self.find_remote(remote_name)?;

        let refspec = if force {
            format!("+refs/heads/{0}:refs/heads/{0}", branch_name)
        } else {
            format!("refs/heads/{0}:refs/heads/{0}", branch_name)
        };

        let mut opts = PushOptions::new();
        opts.remote_callbacks(ssh_callbacks(ssh_key));
        remote.push(&[refspec.as_str()], Some(&mut opts))?;

        Ok(())
    }

    fn set_upstream(&self, branch_name: &str, remote_name: &str) -> RfdResult<()> {
        let mut config = self.config()?;
        config.set_str(&format!("branch.{}.remote", branch_name), remote_name)?;
        config.set_str(
            &format!("branch.{}.merge", branch_name),
            &format!("refs/heads/{}", branch_name),
        )?;
        Ok(())
    }
}

/// Maps a [Status] to the category label printed by `rfd check`.
fn status_label(status: Status) -> &'static str {
    if status.intersects(Status::INDEX_NEW | Status::WT_NEW) {
        if status.contains(Status::WT_NEW) {
            "Untracked"
        } else {
            "==== Added ===="
        }
    } else if status.intersects(Status::INDEX_MODIFIED | Status::WT_MODIFIED) {
        "==== Modified ===="
    } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
        "==== Deleted ===="
    } else if status.intersects(Status::INDEX_RENAMED | Status::WT_RENAMED) {
        "==== Renamed ===="
    } else if status.intersects(Status::INDEX_TYPECHANGE | Status::WT_TYPECHANGE) {
        "==== Typechange ===="
    } else if status.contains(Status::CONFLICTED) {
        "==== Unmerged ===="
    } else {
        "Unmodified"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ctx::fixtures::{init_empty_repo, init_repo};

    #[test]
    fn commits_the_root_commit_when_head_is_unborn() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_empty_repo(dir.path());

        // The trunk name resolves even before anything exists at it.
        let trunk = repo.current_branch_name().unwrap();

        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        repo.stage(&["a.txt"]).unwrap();
        let oid = repo.commit_staged("initial").unwrap();

        let commit = repo.find_commit(oid).unwrap();
        assert_eq!(commit.parent_count(), 0);
        assert_eq!(commit.message().unwrap(), "initial");
        assert_eq!(repo.current_branch_name().unwrap(), trunk);
    }

    #[test]
    fn fresh_commit_leaves_a_clean_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path());
        assert!(repo.is_working_tree_clean().unwrap());
    }

    #[test]
    fn untracked_and_modified_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path());

        std::fs::write(dir.path().join("scratch.txt"), "scratch").unwrap();
        std::fs::write(dir.path().join(".gitkeep"), "changed").unwrap();

        assert!(!repo.is_working_tree_clean().unwrap());

        let report = repo.worktree_report().unwrap();
        assert!(report
            .iter()
            .any(|(path, label)| path.ends_with("scratch.txt") && *label == "Untracked"));
        assert!(report
            .iter()
            .any(|(path, label)| path.ends_with(".gitkeep") && *label == "==== Modified ===="));
    }

    #[test]
    fn current_branch_name_follows_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path());

        repo.create_branch_at_head("0002").unwrap();
        repo.checkout_branch("0002", None).unwrap();
        assert_eq!(repo.current_branch_name().unwrap(), "0002");
    }

    #[test]
    fn set_upstream_writes_tracking_config() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path());

        repo.create_branch_at_head("0002").unwrap();
        repo.set_upstream("0002", "origin").unwrap();

        let config = repo.config().unwrap().snapshot().unwrap();
        assert_eq!(config.get_string("branch.0002.remote").unwrap(), "origin");
        assert_eq!(
            config.get_string("branch.0002.merge").unwrap(),
            "refs/heads/0002"
        );
    }
}
