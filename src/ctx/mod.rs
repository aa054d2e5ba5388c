//! The in-memory context of the `rfd` application.

use crate::config::{RfdConfig, States};
use git2::Repository;

mod lifecycle;
mod number;

/// The in-memory context for one invocation of `rfd`.
///
/// Carries the repository handle plus the loaded configuration and states, so
/// every operation receives explicit inputs rather than reading process-wide
/// globals.
pub struct RfdContext<'a> {
    /// The repository the tool operates on.
    pub repository: &'a Repository,
    /// The persisted configuration, loaded from `config.yml`.
    pub config: RfdConfig,
    /// The state definitions, loaded from the templates directory.
    pub states: States,
}

impl<'a> RfdContext<'a> {
    /// Creates a new [RfdContext] over the given repository, configuration,
    /// and states.
    pub fn new(repository: &'a Repository, config: RfdConfig, states: States) -> Self {
        Self {
            repository,
            config,
            states,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::config::StateEntry;
    use std::{collections::BTreeMap, path::Path};

    pub(crate) const TEST_TEMPLATE: &str = "---\ntitle: {{.Title}}\nauthors: {{.Authors}}\nstate: {{.State}}\nlink: {{.Link}}\n---\n\n# [{{.RFDID}}] {{.Title}}\n";

    /// Initialises a git repository at `dir` with a repo-local committer
    /// identity and no commits, as `git init` leaves it.
    pub(crate) fn init_empty_repo(dir: &Path) -> Repository {
        let repo = Repository::init(dir).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "test").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        repo
    }

    /// Initialises a git repository at `dir` with a committed `.gitkeep` and a
    /// repo-local committer identity.
    pub(crate) fn init_repo(dir: &Path) -> Repository {
        let repo = init_empty_repo(dir);

        std::fs::write(dir.join(".gitkeep"), "").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(".gitkeep")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        {
            let tree = repo.find_tree(tree_id).unwrap();
            let signature = repo.signature().unwrap();
            repo.commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
                .unwrap();
        }

        repo
    }

    /// Creates a bare repository at `dir` and registers it as `origin`.
    pub(crate) fn add_bare_origin(repo: &Repository, dir: &Path) -> Repository {
        let bare = Repository::init_bare(dir).unwrap();
        repo.remote("origin", dir.to_str().unwrap()).unwrap();
        bare
    }

    /// Builds a configuration rooted at `root`, with template files written
    /// under `<root>/template`.
    pub(crate) fn test_config(root: &Path) -> RfdConfig {
        let templates = root.join("template");
        std::fs::create_dir_all(templates.join("0001")).unwrap();
        std::fs::write(templates.join("readme.md"), TEST_TEMPLATE).unwrap();
        std::fs::write(templates.join("0001").join("readme.md"), TEST_TEMPLATE).unwrap();

        RfdConfig {
            root_directory: root.to_path_buf(),
            templates_directory: templates,
            private_key_file_name: "id_rsa".to_string(),
            initial_author: "gwright".to_string(),
            organisation: "MyOrg".to_string(),
            instigation_date: "2026-08-23".to_string(),
            force_push: false,
        }
    }

    /// A minimal states list whose default (id `"1"`) is `prediscussion`.
    pub(crate) fn test_states() -> States {
        let entry = |id: &str, name: &str| {
            BTreeMap::from([(
                name.to_string(),
                StateEntry {
                    id: id.to_string(),
                    name: name.to_string(),
                },
            )])
        };
        States {
            rfd_states: vec![entry("1", "prediscussion"), entry("2", "discussion")],
        }
    }
}
