//! Remote-to-local file synchronization
//!
//! Two passes: [`build_file_tree`] discovers a remote folder hierarchy into
//! an in-memory tree, then the engine walks it and downloads only what is
//! missing or out of date.

pub mod engine;
pub mod tree;

pub use engine::{pull_course_files, pull_file_tree, PullOutcome};
pub use tree::{build_file_tree, FileTree};
