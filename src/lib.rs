//! coursepull - caching and incremental file-sync core for a course-management CLI
//!
//! The interactive shell, argument parsing, output formatting, and the
//! service's wire protocol live in outer layers; this crate owns the parts
//! with real coordination in them:
//!
//! - [`cache`]: a memoizing cache with per-key mutual exclusion, plus a
//!   background prefetcher that warms it right after login.
//! - [`remote`]: the typed seam to the course-management service.
//! - [`sync`]: recursive remote-tree discovery and incremental,
//!   modification-time-based downloads.
//! - [`Session`]: the post-login object tying the above together.

pub mod cache;
pub mod remote;
pub mod session;
pub mod sync;

pub use cache::{KeyedCache, PrefetchHandle};
pub use remote::{Course, Profile, RemoteError, RemoteFile, RemoteFolder, RemoteSource};
pub use session::Session;
pub use sync::{build_file_tree, pull_course_files, pull_file_tree, FileTree, PullOutcome};
