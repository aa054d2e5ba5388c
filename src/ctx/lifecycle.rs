//! The branch lifecycle driver: establishes a new RFD as a branch+directory
//! pair and publishes it.

use super::RfdContext;
use crate::{
    constants::{
        BOOTSTRAP_RFD_ID, DEFAULT_REMOTE, EARMARK_COMMIT_MESSAGE, INDEX_FILE_NAME,
        INIT_COMMIT_MESSAGE, README_FILE_NAME,
    },
    errors::RfdResult,
    git::RepositoryExt,
    index::IndexBuilder,
    template::{render_readme, RfdMetadata},
};
use git2::{build::CheckoutBuilder, BranchType};

/// Compensating actions for the reversible lifecycle steps.
///
/// An undo is registered immediately after its step succeeds. On failure the
/// guard drops armed and runs the undos in reverse order; [Rollback::disarm]
/// marks the lifecycle complete. Undo failures are logged, not propagated.
struct Rollback<'a> {
    undos: Vec<(&'static str, Box<dyn FnOnce() + 'a>)>,
    armed: bool,
}

impl<'a> Rollback<'a> {
    fn new() -> Self {
        Self {
            undos: Vec::new(),
            armed: true,
        }
    }

    fn register(&mut self, step: &'static str, undo: impl FnOnce() + 'a) {
        self.undos.push((step, Box::new(undo)));
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for Rollback<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        for (step, undo) in std::mem::take(&mut self.undos).into_iter().rev() {
            tracing::warn!(step, "rolling back");
            undo();
        }
    }
}

impl RfdContext<'_> {
    /// Runs the full creation sequence for a new RFD:
    ///
    /// create branch at HEAD -> checkout -> write templated readme ->
    /// regenerate index -> stage -> commit -> push -> set upstream.
    ///
    /// The caller is responsible for checking working tree cleanliness before
    /// invoking this. A failure up to and including the push undoes the
    /// branch, readme, and commit. Once the push has succeeded the remote
    /// holds the ref, so a failed upstream update leaves the local branch and
    /// commit in place rather than diverging from `origin`.
    pub fn create_rfd(&self, metadata: &RfdMetadata) -> RfdResult<()> {
        let id = metadata.number.to_string();
        let previous_branch = self.repository.current_branch_name()?;
        let mut rollback = Rollback::new();

        // BRANCH_CREATED
        tracing::info!(rfd = %id, "creating branch");
        self.repository.create_branch_at_head(&id)?;
        self.repository.checkout_branch(&id, None)?;
        {
            let repository = self.repository;
            let branch = id.clone();
            rollback.register("create branch", move || {
                let mut checkout = CheckoutBuilder::new();
                checkout.force();
                if let Err(e) = repository.checkout_branch(&previous_branch, Some(&mut checkout)) {
                    tracing::warn!(error = %e, "could not restore previous checkout");
                    return;
                }
                match repository.find_branch(&branch, BranchType::Local) {
                    Ok(mut b) => {
                        if let Err(e) = b.delete() {
                            tracing::warn!(error = %e, "could not delete branch");
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "could not find branch to delete"),
                }
            });
        }

        // README_WRITTEN
        tracing::info!(rfd = %id, "writing readme");
        let template = std::fs::read_to_string(self.config.template_path())?;
        let rfd_dir = self.config.rfd_dir(&id);
        std::fs::create_dir_all(&rfd_dir)?;
        let readme_path = rfd_dir.join(README_FILE_NAME);
        std::fs::write(&readme_path, render_readme(&template, metadata))?;
        {
            let config = &self.config;
            rollback.register("write readme", move || {
                let _ = std::fs::remove_file(&readme_path);
                let _ = std::fs::remove_dir(&rfd_dir);
                if let Err(e) = IndexBuilder::new(config).write() {
                    tracing::warn!(error = %e, "could not regenerate index");
                }
            });
        }

        // Regenerate the index so the new RFD is listed before staging.
        IndexBuilder::new(&self.config).write()?;

        // STAGED
        tracing::info!("staging");
        self.repository.stage(&[id.as_str(), INDEX_FILE_NAME])?;

        // COMMITTED
        tracing::info!("committing");
        self.repository.commit_staged(EARMARK_COMMIT_MESSAGE)?;

        // PUSHED
        tracing::info!("pushing to origin");
        let key = self.config.ssh_key_path()?;
        self.repository
            .push_branch(&id, DEFAULT_REMOTE, &key, self.config.force_push)?;

        // The ref is on the remote now; nothing past this point rolls back.
        rollback.disarm();

        // UPSTREAM_SET
        tracing::info!(rfd = %id, "setting upstream");
        self.repository.set_upstream(&id, DEFAULT_REMOTE)?;

        Ok(())
    }

    /// Writes the bootstrap RFD `0001` readme on the trunk, replacing any
    /// existing `0001` directory, and copies the rendered document to the
    /// repository root `readme.md`.
    pub fn write_bootstrap_readme(&self) -> RfdResult<()> {
        let metadata = RfdMetadata {
            number: crate::id::RfdNumber::new(1)?,
            title: format!(
                "The {} Request for Discussion Process",
                self.config.organisation
            ),
            authors: self.config.initial_author.clone(),
            state: "discussion".to_string(),
            link: String::new(),
        };

        let rfd_dir = self.config.rfd_dir(BOOTSTRAP_RFD_ID);
        if rfd_dir.exists() {
            std::fs::remove_dir_all(&rfd_dir)?;
        }
        std::fs::create_dir_all(&rfd_dir)?;

        let template = std::fs::read_to_string(self.config.bootstrap_template_path())?;
        let rendered = render_readme(&template, &metadata);
        std::fs::write(rfd_dir.join(README_FILE_NAME), &rendered)?;

        // The bootstrap document doubles as the repository's front page.
        std::fs::write(self.config.root_directory.join(README_FILE_NAME), rendered)?;
        Ok(())
    }

    /// The reduced bootstrap lifecycle: stage `0001` and the root readme,
    /// commit, and push the trunk. No branch is created and no upstream is
    /// set, since `0001` lives directly on the trunk.
    pub fn publish_bootstrap(&self) -> RfdResult<()> {
        tracing::info!("staging");
        self.repository
            .stage(&[BOOTSTRAP_RFD_ID, README_FILE_NAME])?;

        tracing::info!("committing");
        self.repository.commit_staged(INIT_COMMIT_MESSAGE)?;

        tracing::info!("pushing to origin");
        let trunk = self.repository.current_branch_name()?;
        let key = self.config.ssh_key_path()?;
        self.repository
            .push_branch(&trunk, DEFAULT_REMOTE, &key, self.config.force_push)?;
        Ok(())
    }
}
