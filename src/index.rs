//! Builds the markdown index summarising every RFD and its state.

use crate::{
    config::RfdConfig,
    constants::{INDEX_FILE_NAME, README_FILE_NAME},
    errors::RfdResult,
    id::is_rfd_id,
};
use serde::Deserialize;
use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

const INDEX_HEADER: &str = "**Index of Requests for Discussion**\n\n\
    | **RFD Id** | **Title** | **State** | **Author(s)** |\n\
    |------------|-----------|-----------|------------------------|\n";

/// Front matter embedded at the start of an RFD readme.
#[derive(Debug, Default, Clone, Eq, PartialEq, Deserialize)]
pub struct FrontMatter {
    /// Title of the RFD.
    #[serde(default, deserialize_with = "string_or_default")]
    pub title: String,
    /// Comma-delimited author list.
    #[serde(default, deserialize_with = "string_or_default")]
    pub authors: String,
    /// Current state name.
    #[serde(default, deserialize_with = "string_or_default")]
    pub state: String,
    /// Link to the discussion, if any.
    #[serde(default, deserialize_with = "string_or_default")]
    pub link: String,
}

/// Treats an explicit YAML null (`link:` with no value) as the empty string,
/// so a freshly scaffolded readme still indexes.
fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extracts the YAML front matter from a `---` fenced block at the start of a
/// markdown document. Returns [None] if no well-formed block is present.
pub fn front_matter(content: &str) -> Option<FrontMatter> {
    let rest = content.strip_prefix("---")?;
    let end = rest.find("\n---")?;
    serde_yaml::from_str(&rest[..end]).ok()
}

/// Builds and writes `index.md` for the RFD repository rooted at the
/// configured root directory.
pub struct IndexBuilder<'a> {
    config: &'a RfdConfig,
}

impl<'a> IndexBuilder<'a> {
    /// Creates a new [IndexBuilder] over the given configuration.
    pub fn new(config: &'a RfdConfig) -> Self {
        Self { config }
    }

    /// Renders the full index document.
    ///
    /// Directories are visited in name order, so unchanged readmes always
    /// produce byte-identical output.
    pub fn build(&self) -> RfdResult<String> {
        let mut out = String::from(INDEX_HEADER);

        for id in self.rfd_directories()? {
            let Some(readme) = find_readme(&self.config.rfd_dir(&id)) else {
                tracing::warn!(rfd = %id, "no readme found, skipping");
                continue;
            };

            let content = std::fs::read_to_string(&readme)?;
            let Some(metadata) = front_matter(&content) else {
                tracing::warn!(rfd = %id, "readme has no parseable front matter, skipping");
                continue;
            };

            // Infallible: writing to a String.
            let _ = writeln!(
                out,
                "|[{id}](./{id}/readme.md)|{}|{}|{}|",
                metadata.title, metadata.state, metadata.authors
            );
            tracing::debug!(rfd = %id, title = %metadata.title, "indexed");
        }

        Ok(out)
    }

    /// Renders the index and writes it to `<root>/index.md`, returning the
    /// path written.
    pub fn write(&self) -> RfdResult<PathBuf> {
        let index = self.build()?;
        let path = self.config.root_directory.join(INDEX_FILE_NAME);
        std::fs::write(&path, index)?;
        Ok(path)
    }

    /// Returns the names of root entries that are directories matching the
    /// RFD identifier pattern, sorted by name.
    fn rfd_directories(&self) -> RfdResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.config.root_directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_rfd_id(&name) {
                ids.push(name);
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Locates the readme within an RFD directory, matching the file name
/// case-insensitively.
fn find_readme(dir: &Path) -> Option<PathBuf> {
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().map(|t| t.is_file()).unwrap_or(false)
                && entry.file_name().to_string_lossy().to_lowercase() == README_FILE_NAME
        })
        .map(|entry| entry.path())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        id::RfdNumber,
        template::{render_readme, RfdMetadata},
    };

    fn write_rfd(root: &Path, id: &str, readme_name: &str, content: &str) {
        let dir = root.join(id);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(readme_name), content).unwrap();
    }

    fn config_for(root: &Path) -> RfdConfig {
        RfdConfig {
            root_directory: root.to_path_buf(),
            templates_directory: root.join("template"),
            private_key_file_name: "id_rsa".to_string(),
            initial_author: "gwright".to_string(),
            organisation: "MyOrg".to_string(),
            instigation_date: "2026-08-23".to_string(),
            force_push: false,
        }
    }

    #[test]
    fn builds_sorted_table_from_front_matter() {
        let root = tempfile::tempdir().unwrap();

        // Written out of order; the index must sort by identifier.
        write_rfd(
            root.path(),
            "0002",
            "readme.md",
            "---\ntitle: Second\nauthors: jdoe\nstate: discussion\n---\nbody\n",
        );
        write_rfd(
            root.path(),
            "0001",
            "README.md",
            "---\ntitle: First\nauthors: gwright\nstate: accepted\n---\nbody\n",
        );
        // Non-directory entries are ignored even when name-matching.
        std::fs::write(root.path().join("0003"), "not a directory").unwrap();
        // Non-matching directories are ignored.
        write_rfd(root.path(), "notes", "readme.md", "---\ntitle: x\n---\n");

        let config = config_for(root.path());
        let index = IndexBuilder::new(&config).build().unwrap();

        assert_eq!(
            index,
            "**Index of Requests for Discussion**\n\n\
             | **RFD Id** | **Title** | **State** | **Author(s)** |\n\
             |------------|-----------|-----------|------------------------|\n\
             |[0001](./0001/readme.md)|First|accepted|gwright|\n\
             |[0002](./0002/readme.md)|Second|discussion|jdoe|\n"
        );
    }

    #[test]
    fn building_twice_is_byte_identical() {
        let root = tempfile::tempdir().unwrap();
        write_rfd(
            root.path(),
            "0001",
            "readme.md",
            "---\ntitle: First\nauthors: gwright\nstate: accepted\n---\n",
        );

        let config = config_for(root.path());
        let builder = IndexBuilder::new(&config);
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn readme_without_front_matter_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        write_rfd(root.path(), "0001", "readme.md", "just a plain document\n");

        let config = config_for(root.path());
        let index = IndexBuilder::new(&config).build().unwrap();
        assert_eq!(index, INDEX_HEADER);
    }

    #[test]
    fn rendered_metadata_round_trips_through_front_matter() {
        let metadata = RfdMetadata {
            number: RfdNumber::new(12).unwrap(),
            title: "Adopt RFDs".to_string(),
            authors: "gwright, jdoe".to_string(),
            state: "prediscussion".to_string(),
            link: String::new(),
        };
        let rendered = render_readme(crate::template::test::TEMPLATE, &metadata);

        let parsed = front_matter(&rendered).unwrap();
        assert_eq!(parsed.title, metadata.title);
        assert_eq!(parsed.authors, metadata.authors);
        assert_eq!(parsed.state, metadata.state);
    }

    #[test]
    fn front_matter_requires_fenced_block() {
        assert!(front_matter("no fences here").is_none());
        assert!(front_matter("---\nunterminated: yes\n").is_none());
    }

    #[test]
    fn write_places_index_in_root() {
        let root = tempfile::tempdir().unwrap();
        let config = config_for(root.path());

        let path = IndexBuilder::new(&config).write().unwrap();
        assert_eq!(path, root.path().join("index.md"));
        assert!(path.exists());
    }
}
