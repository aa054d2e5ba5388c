//! Persisted configuration for an RFD repository.

use crate::{
    constants::{BOOTSTRAP_RFD_ID, CONFIG_FILE_NAME, README_FILE_NAME, STATES_FILE_NAME},
    errors::{RfdError, RfdResult},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// The configuration record persisted as `config.yml` in the repository root.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RfdConfig {
    /// Root directory of the RFD repository.
    pub root_directory: PathBuf,
    /// Directory holding the readme templates and the states file.
    pub templates_directory: PathBuf,
    /// File name of the SSH private key within `<home>/.ssh`.
    pub private_key_file_name: String,
    /// Author recorded on the bootstrap RFD.
    pub initial_author: String,
    /// Organisation name substituted into the bootstrap RFD title.
    pub organisation: String,
    /// Date the repository was initialised, `YYYY-MM-DD`.
    pub instigation_date: String,
    /// Whether pushes may overwrite remote history. Off unless opted into.
    #[serde(default)]
    pub force_push: bool,
}

impl RfdConfig {
    /// Loads the configuration from `config.yml` in the given directory.
    pub fn load(dir: &Path) -> RfdResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Err(RfdError::ConfigNotFound(CONFIG_FILE_NAME.to_string()));
        }
        Ok(serde_yaml::from_str(&std::fs::read_to_string(path)?)?)
    }

    /// Persists the configuration as `config.yml` in the given directory.
    pub fn write(&self, dir: &Path) -> RfdResult<()> {
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Path to the SSH private key used to authenticate against `origin`.
    pub fn ssh_key_path(&self) -> RfdResult<PathBuf> {
        let home = home::home_dir().ok_or(RfdError::HomeDirNotFound)?;
        Ok(home.join(".ssh").join(&self.private_key_file_name))
    }

    /// Path to the readme template used for new RFDs.
    pub fn template_path(&self) -> PathBuf {
        self.templates_directory.join(README_FILE_NAME)
    }

    /// Path to the readme template used for the bootstrap RFD `0001`.
    pub fn bootstrap_template_path(&self) -> PathBuf {
        self.templates_directory
            .join(BOOTSTRAP_RFD_ID)
            .join(README_FILE_NAME)
    }

    /// Path to the directory of the RFD with the given formatted identifier.
    pub fn rfd_dir(&self, id: &str) -> PathBuf {
        self.root_directory.join(id)
    }
}

/// The ordered list of RFD state definitions, read from `states.yml` in the
/// templates directory.
///
/// Each entry maps a symbolic name to an `{id, name}` pair; the entry with
/// `id == "1"` is the default state stamped onto freshly scaffolded RFDs.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct States {
    /// The state definitions, in declaration order.
    #[serde(rename = "rfd-states")]
    pub rfd_states: Vec<BTreeMap<String, StateEntry>>,
}

/// A single state definition within the states file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    /// Ordinal of the state, as a string (`"1"` marks the default).
    pub id: String,
    /// Human-readable state name written into readme front matter.
    pub name: String,
}

impl States {
    /// Loads the states file from the given templates directory.
    pub fn load(templates_dir: &Path) -> RfdResult<Self> {
        let path = templates_dir.join(STATES_FILE_NAME);
        if !path.exists() {
            return Err(RfdError::StatesFileNotFound(path.display().to_string()));
        }
        Ok(serde_yaml::from_str(&std::fs::read_to_string(path)?)?)
    }

    /// Returns the name of the default state, i.e. the entry whose `id` is `"1"`.
    pub fn default_state(&self) -> RfdResult<&str> {
        self.rfd_states
            .iter()
            .flat_map(|entry| entry.values())
            .find(|state| state.id == "1")
            .map(|state| state.name.as_str())
            .ok_or(RfdError::DefaultStateMissing)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const STATES_YAML: &str = r#"
rfd-states:
  - prediscussion:
      id: "1"
      name: prediscussion
  - discussion:
      id: "2"
      name: discussion
  - accepted:
      id: "3"
      name: accepted
"#;

    #[test]
    fn default_state_is_entry_with_id_one() {
        let states: States = serde_yaml::from_str(STATES_YAML).unwrap();
        assert_eq!(states.default_state().unwrap(), "prediscussion");
    }

    #[test]
    fn missing_default_state_is_an_error() {
        let states = States { rfd_states: vec![] };
        assert!(matches!(
            states.default_state(),
            Err(RfdError::DefaultStateMissing)
        ));
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = RfdConfig {
            root_directory: PathBuf::from("/tmp/rfds"),
            templates_directory: PathBuf::from("/tmp/rfds/template"),
            private_key_file_name: "id_ed25519".to_string(),
            initial_author: "gwright".to_string(),
            organisation: "MyOrg".to_string(),
            instigation_date: "2026-08-23".to_string(),
            force_push: false,
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: RfdConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn force_push_defaults_off_for_older_configs() {
        let yaml = r#"
root-directory: /tmp/rfds
templates-directory: /tmp/rfds/template
private-key-file-name: id_rsa
initial-author: gwright
organisation: MyOrg
instigation-date: 2026-08-23
"#;
        let parsed: RfdConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!parsed.force_push);
    }
}
