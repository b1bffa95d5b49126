//! Podspec version editing
//!
//! Locates the `<identifier>.version = '<major>.<minor>.<patch>'` assignment
//! in a podspec, bumps its patch component and writes the document back
//! with every other byte untouched, including the whitespace on both sides
//! of `=`.

pub mod locate;

pub use locate::locate_podspec;

use std::fs;
use std::ops::Range;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::domain::Version;
use crate::error::{PodPublishError, Result};

const VERSION_ASSIGNMENT: &str =
    r"\b(?P<ident>[A-Za-z_][A-Za-z0-9_]*)\.version(?P<before>\s*)=(?P<after>\s*)'(?P<literal>[^'\n]*)'";

/// A located version assignment inside a podspec
#[derive(Debug, Clone, PartialEq)]
pub struct VersionMatch {
    /// Byte range of the whole assignment within the document
    pub span: Range<usize>,
    /// Receiver of the assignment, usually `s` or `spec`
    pub identifier: String,
    pub space_before: String,
    pub space_after: String,
    /// The quoted value, without quotes
    pub literal: String,
}

impl VersionMatch {
    /// Render the assignment again with a different version literal
    pub fn render(&self, literal: &str) -> String {
        format!(
            "{}.version{}={}'{}'",
            self.identifier, self.space_before, self.space_after, literal
        )
    }

    pub fn version(&self) -> Result<Version> {
        Version::parse(&self.literal)
    }

    /// The literal with its patch digits replaced by `version.patch`.
    ///
    /// The `major.minor.` text is kept as written, leading zeros included.
    pub fn patched_literal(&self, version: &Version) -> String {
        let prefix = match self.literal.rfind('.') {
            Some(dot) => &self.literal[..=dot],
            None => "",
        };
        format!("{}{}", prefix, version.patch)
    }
}

/// Outcome of a successful patch bump
#[derive(Debug, Clone, PartialEq)]
pub struct VersionBump {
    pub previous: Version,
    pub current: Version,
    /// The version text as written into the document
    pub literal: String,
    /// The rewritten document
    pub content: String,
}

/// Finds and rewrites version assignments in podspec text.
pub struct PodspecEditor {
    pattern: Regex,
}

impl PodspecEditor {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(VERSION_ASSIGNMENT)
            .map_err(|e| PodPublishError::podspec(format!("Invalid version pattern: {}", e)))?;

        Ok(PodspecEditor { pattern })
    }

    /// Locate the first version assignment, if any.
    pub fn find_version(&self, content: &str) -> Option<VersionMatch> {
        let captures = self.pattern.captures(content)?;
        let whole = captures.get(0)?;

        Some(VersionMatch {
            span: whole.range(),
            identifier: captures["ident"].to_string(),
            space_before: captures["before"].to_string(),
            space_after: captures["after"].to_string(),
            literal: captures["literal"].to_string(),
        })
    }

    /// Bump the patch component of the version assignment.
    ///
    /// # Returns
    /// * `Ok(Some(VersionBump))` - The assignment was found and rewritten
    /// * `Ok(None)` - No version assignment exists; nothing to do
    /// * `Err(MalformedVersion)` - The quoted value is not `major.minor.patch`
    pub fn bump(&self, content: &str) -> Result<Option<VersionBump>> {
        let Some(found) = self.find_version(content) else {
            return Ok(None);
        };

        let previous = found.version()?;
        let current = previous.bump_patch()?;
        let literal = found.patched_literal(&current);

        let mut rewritten = String::with_capacity(content.len() + 1);
        rewritten.push_str(&content[..found.span.start]);
        rewritten.push_str(&found.render(&literal));
        rewritten.push_str(&content[found.span.end..]);

        debug!(%previous, %literal, offset = found.span.start, "rewrote version assignment");

        Ok(Some(VersionBump {
            previous,
            current,
            literal,
            content: rewritten,
        }))
    }
}

/// Bump the podspec at `path` in place.
///
/// The file is only written when a version assignment was found and parsed.
pub fn bump_file(path: &Path) -> Result<Option<VersionBump>> {
    let bump = preview_file(path)?;

    if let Some(ref bump) = bump {
        apply(path, bump)?;
    }

    Ok(bump)
}

/// Overwrite the podspec at `path` with a computed bump. No backup is kept.
pub fn apply(path: &Path, bump: &VersionBump) -> Result<()> {
    fs::write(path, &bump.content)?;
    debug!(path = %path.display(), version = %bump.current, "podspec written");
    Ok(())
}

/// Compute the bump for the podspec at `path` without writing it.
pub fn preview_file(path: &Path) -> Result<Option<VersionBump>> {
    let content = fs::read_to_string(path).map_err(|e| {
        PodPublishError::podspec(format!("Cannot read {}: {}", path.display(), e))
    })?;

    PodspecEditor::new()?.bump(&content)
}
