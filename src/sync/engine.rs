//! Incremental remote-to-local file synchronization
//!
//! Walks a built [`FileTree`] depth-first and downloads only files that are
//! missing locally or remotely newer, stamping each download with the remote
//! modification time so repeated syncs of unchanged state perform no writes.

use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};
use tracing::{debug, info, trace, warn};

use super::tree::{build_file_tree, FileTree};
use crate::remote::{Course, RemoteError, RemoteFile, RemoteSource};

/// Result of a per-course pull.
#[derive(Debug, PartialEq, Eq)]
pub enum PullOutcome {
    /// Tree built and walked to completion.
    Completed {
        /// Files in the course tree, current ones included.
        files: usize,
    },
    /// The remote source denied access to the course's files. Reported and
    /// non-fatal; other courses remain usable.
    Unauthorized,
}

/// Local file mtime in whole Unix epoch seconds, or None if the file is
/// absent.
///
/// Whole seconds match the remote timestamps' granularity; comparing at
/// finer precision causes spurious re-downloads.
fn local_mtime_secs(path: &Path) -> Option<u64> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    modified
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

/// Whether `file` must be downloaded to `dest`.
fn needs_download(file: &RemoteFile, dest: &Path) -> bool {
    match local_mtime_secs(dest) {
        None => true,
        Some(local) => file.modified_at > local,
    }
}

/// Download `file` into `dest` and stamp it with the remote modification
/// time.
///
/// The content lands in a sibling tempfile and is persisted into place, so
/// an interrupted transfer never leaves a half-written file that a later
/// incremental pass would consider current. The access time is left as
/// observed after the write.
fn download_file(source: &dyn RemoteSource, file: &RemoteFile, dest: &Path) -> Result<()> {
    let parent = dest.parent().context("Destination path has no parent")?;
    let tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {:?}", parent))?;

    source.download_file(file, tmp.path())?;

    let written = tmp
        .persist(dest)
        .with_context(|| format!("Failed to persist download: {:?}", dest))?;
    written
        .set_modified(file.modified_time())
        .with_context(|| format!("Failed to set modification time: {:?}", dest))?;

    debug!(file = %file.filename, size = file.size, "Downloaded file");
    Ok(())
}

/// Ensure every file in `tree` is present and current under `root`.
///
/// Depth-first, pre-order: the node's directory is created first, its files
/// are brought up to date, then each subfolder is walked. Progress made
/// before a failure persists; there is no retry and no mid-run cancellation.
pub fn pull_file_tree(source: &dyn RemoteSource, root: &Path, tree: &FileTree) -> Result<()> {
    let dir = root.join(&tree.path);
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create directory: {:?}", dir))?;

    for file in &tree.files {
        let dest = dir.join(&file.filename);
        if needs_download(file, &dest) {
            download_file(source, file, &dest)?;
        } else {
            trace!(file = %file.filename, "Local copy is current, skipping");
        }
    }

    for subtree in &tree.folders {
        pull_file_tree(source, root, subtree)?;
    }

    Ok(())
}

/// Mirror a course's complete file tree under `root`.
///
/// Discovers the course's root folder, builds the tree, logs the detected
/// file count, and walks it. An authorization denial anywhere in the pull
/// becomes [`PullOutcome::Unauthorized`] instead of an error, so one
/// locked-down course cannot take down a multi-course session; every other
/// error propagates.
pub fn pull_course_files(
    source: &dyn RemoteSource,
    root: &Path,
    course: &Course,
) -> Result<PullOutcome> {
    match pull_course_inner(source, root, course) {
        Ok(files) => Ok(PullOutcome::Completed { files }),
        Err(e) if is_unauthorized(&e) => {
            warn!(
                course = %course.unique_code(),
                "Not authorized to access this course's files"
            );
            Ok(PullOutcome::Unauthorized)
        }
        Err(e) => Err(e),
    }
}

fn pull_course_inner(source: &dyn RemoteSource, root: &Path, course: &Course) -> Result<usize> {
    let folders = source.list_course_folders(course)?;
    let top = folders
        .into_iter()
        .find(|folder| folder.is_root())
        .with_context(|| format!("Course {} has no root folder", course.id))?;

    let tree = build_file_tree(source, Path::new(""), &top)?;
    let files = tree.file_count();
    info!(course = %course.unique_code(), files, "Detected files to sync");

    pull_file_tree(source, root, &tree)?;
    Ok(files)
}

/// Whether `RemoteError::Unauthorized` appears anywhere in the error chain.
fn is_unauthorized(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| {
        cause
            .downcast_ref::<RemoteError>()
            .map_or(false, RemoteError::is_unauthorized)
    })
}
