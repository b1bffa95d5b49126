//! Domain logic - pure rules independent of git, pod and the filesystem

pub mod version;

pub use version::Version;
