//! Readme template rendering.
//!
//! Rendering is a pure substitution: the template text plus an [RfdMetadata]
//! produce the scaffolded document. The placeholder syntax matches the
//! template files already present in existing RFD repositories.

use crate::id::RfdNumber;

/// The metadata captured when an RFD is scaffolded.
///
/// Front matter mutations after creation (state transitions, link population)
/// happen through manual edits to the readme; the tool never re-opens an
/// existing readme except when `init` regenerates the bootstrap RFD.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RfdMetadata {
    /// The RFD's ordinal.
    pub number: RfdNumber,
    /// Title of the RFD.
    pub title: String,
    /// Comma-delimited author list.
    pub authors: String,
    /// Current state name, as defined in the states file.
    pub state: String,
    /// Link to the discussion, populated once one exists.
    pub link: String,
}

/// Renders a readme template, substituting the five metadata placeholders.
///
/// Every placeholder is supplied on every render; a template is free to use
/// any subset of them.
pub fn render_readme(template: &str, metadata: &RfdMetadata) -> String {
    template
        .replace("{{.RFDID}}", &metadata.number.to_string())
        .replace("{{.Title}}", &metadata.title)
        .replace("{{.Authors}}", &metadata.authors)
        .replace("{{.State}}", &metadata.state)
        .replace("{{.Link}}", &metadata.link)
}
