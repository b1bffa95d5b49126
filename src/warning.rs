use std::fmt;
use std::path::PathBuf;

/// Warnings found while checking the repository before publishing.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishWarning {
    /// The checked-out branch is not the branch being pushed
    BranchMismatch { current: String, target: String },
    /// HEAD is detached or the branch has no commits yet
    NoCurrentBranch { target: String },
    /// A tag with the new version's name already exists locally
    TagAlreadyExists { tag: String },
    /// The configured remote is not defined in the repository
    MissingRemote { remote: String },
    /// The podspec is not inside a git repository
    NotARepository { dir: PathBuf },
}

impl fmt::Display for PublishWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishWarning::BranchMismatch { current, target } => {
                write!(
                    f,
                    "Checked-out branch '{}' differs from target branch '{}'",
                    current, target
                )
            }
            PublishWarning::NoCurrentBranch { target } => {
                write!(
                    f,
                    "No branch is checked out; pushing '{}' may not include the release commit",
                    target
                )
            }
            PublishWarning::TagAlreadyExists { tag } => {
                write!(f, "Tag '{}' already exists; the tag step will fail", tag)
            }
            PublishWarning::MissingRemote { remote } => {
                write!(f, "Remote '{}' is not configured in this repository", remote)
            }
            PublishWarning::NotARepository { dir } => {
                write!(f, "'{}' is not inside a git repository", dir.display())
            }
        }
    }
}
