//! Recursive discovery of a remote folder hierarchy
//!
//! Materializes a remote folder's full subtree as an in-memory tree without
//! touching local disk; the sync engine consumes the result in a second pass.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::remote::{RemoteError, RemoteFile, RemoteFolder, RemoteSource};

/// In-memory mirror of a remote folder subtree.
///
/// `path` is relative to the synchronization target directory: the root node
/// carries the base path the build started from, and each child extends its
/// parent's path with the child folder's name. Immutable once built, and
/// alive only for the duration of one sync operation.
#[derive(Debug)]
pub struct FileTree {
    pub path: PathBuf,
    pub folders: Vec<FileTree>,
    pub files: Vec<RemoteFile>,
}

impl FileTree {
    /// Total number of files in this subtree, for progress reporting.
    pub fn file_count(&self) -> usize {
        self.folders.iter().map(FileTree::file_count).sum::<usize>() + self.files.len()
    }
}

/// Recursively fetch `folder`'s subtree from the remote source.
///
/// Fails fast: any listing error aborts the whole build and propagates,
/// partial trees are never returned. The remote hierarchy is assumed acyclic.
pub fn build_file_tree(
    source: &dyn RemoteSource,
    base: &Path,
    folder: &RemoteFolder,
) -> Result<FileTree, RemoteError> {
    let mut folders = Vec::new();
    for subfolder in source.list_folders(folder)? {
        let subtree = build_file_tree(source, &base.join(&subfolder.name), &subfolder)?;
        folders.push(subtree);
    }
    let files = source.list_files(folder)?;

    debug!(
        folder = %folder.name,
        subfolders = folders.len(),
        files = files.len(),
        "Listed remote folder"
    );

    Ok(FileTree {
        path: base.to_path_buf(),
        folders,
        files,
    })
}
