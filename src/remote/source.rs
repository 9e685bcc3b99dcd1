//! The RemoteSource trait, the crate's seam to the course-management service
//!
//! The wire protocol lives in an adapter crate; this core only sees the
//! capability set below. The CLI layer supplies an already-authenticated
//! handle.

use std::path::Path;

use super::errors::RemoteError;
use super::types::{Course, Profile, RemoteFile, RemoteFolder};

/// Data-access operations the core needs from the course-management service.
///
/// Handles are shared with background prefetch threads, so implementations
/// must be `Send + Sync`. All operations are idempotent reads; `download_file`
/// writes only to the local path it is given.
pub trait RemoteSource: Send + Sync {
    /// List the courses the authenticated user is enrolled in.
    fn list_courses(&self) -> Result<Vec<Course>, RemoteError>;

    /// Fetch the authenticated user's profile.
    fn current_user_profile(&self) -> Result<Profile, RemoteError>;

    /// List every folder of a course, flat. The root folder is the one
    /// whose `parent_id` is `None`.
    fn list_course_folders(&self, course: &Course) -> Result<Vec<RemoteFolder>, RemoteError>;

    /// List the immediate subfolders of a folder.
    fn list_folders(&self, folder: &RemoteFolder) -> Result<Vec<RemoteFolder>, RemoteError>;

    /// List the files directly inside a folder.
    fn list_files(&self, folder: &RemoteFolder) -> Result<Vec<RemoteFile>, RemoteError>;

    /// Download a file's content to `dest`, overwriting any existing file.
    fn download_file(&self, file: &RemoteFile, dest: &Path) -> Result<(), RemoteError>;
}
