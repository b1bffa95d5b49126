pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod pipeline;
pub mod podspec;
pub mod process;
pub mod ui;
pub mod warning;

pub use error::{PodPublishError, Result};
