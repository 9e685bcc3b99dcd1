//! In-memory RemoteSource used by tests across the crate.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::errors::RemoteError;
use super::source::RemoteSource;
use super::types::{Course, Profile, RemoteFile, RemoteFolder};

pub fn course(id: u64, code: &str, name: &str, term: i64) -> Course {
    Course {
        id,
        name: name.to_string(),
        course_code: code.to_string(),
        enrollment_term_id: term,
    }
}

pub fn folder(id: u64, name: &str, parent_id: Option<u64>) -> RemoteFolder {
    RemoteFolder {
        id,
        name: name.to_string(),
        parent_id,
    }
}

pub fn file(id: u64, filename: &str, modified_at: u64) -> RemoteFile {
    RemoteFile {
        id,
        filename: filename.to_string(),
        size: 0,
        modified_at,
    }
}

/// Fixture source backed by hash maps, with switches for the failure modes
/// the core must handle.
#[derive(Default)]
pub struct FakeSource {
    pub courses: Vec<Course>,
    pub profile: Option<Profile>,
    /// course id -> every folder of the course, flat
    pub course_folders: HashMap<u64, Vec<RemoteFolder>>,
    /// folder id -> immediate children
    pub children: HashMap<u64, Vec<RemoteFolder>>,
    /// folder id -> files directly inside
    pub files: HashMap<u64, Vec<RemoteFile>>,
    /// file id -> content bytes
    pub contents: HashMap<u64, Vec<u8>>,
    /// courses whose folder listing raises Unauthorized
    pub denied_courses: HashSet<u64>,
    /// folders whose subfolder listing raises a network error
    pub failing_folders: HashSet<u64>,
    /// files whose download raises a network error
    pub failing_files: HashSet<u64>,
    pub course_list_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub downloads: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a folder under its course and, when it has one, its parent.
    pub fn add_folder(&mut self, course_id: u64, folder: RemoteFolder) {
        if let Some(parent) = folder.parent_id {
            self.children.entry(parent).or_default().push(folder.clone());
        }
        self.course_folders
            .entry(course_id)
            .or_default()
            .push(folder);
    }

    pub fn add_file(&mut self, folder_id: u64, file: RemoteFile, content: &[u8]) {
        self.contents.insert(file.id, content.to_vec());
        self.files.entry(folder_id).or_default().push(file);
    }

    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

impl RemoteSource for FakeSource {
    fn list_courses(&self) -> Result<Vec<Course>, RemoteError> {
        self.course_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.courses.clone())
    }

    fn current_user_profile(&self) -> Result<Profile, RemoteError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile
            .clone()
            .ok_or_else(|| RemoteError::NotFound("profile".to_string()))
    }

    fn list_course_folders(&self, course: &Course) -> Result<Vec<RemoteFolder>, RemoteError> {
        if self.denied_courses.contains(&course.id) {
            return Err(RemoteError::Unauthorized);
        }
        Ok(self
            .course_folders
            .get(&course.id)
            .cloned()
            .unwrap_or_default())
    }

    fn list_folders(&self, folder: &RemoteFolder) -> Result<Vec<RemoteFolder>, RemoteError> {
        if self.failing_folders.contains(&folder.id) {
            return Err(RemoteError::Network("folder listing failed".to_string()));
        }
        Ok(self.children.get(&folder.id).cloned().unwrap_or_default())
    }

    fn list_files(&self, folder: &RemoteFolder) -> Result<Vec<RemoteFile>, RemoteError> {
        Ok(self.files.get(&folder.id).cloned().unwrap_or_default())
    }

    fn download_file(&self, file: &RemoteFile, dest: &Path) -> Result<(), RemoteError> {
        if self.failing_files.contains(&file.id) {
            return Err(RemoteError::Network(format!(
                "download failed: {}",
                file.filename
            )));
        }
        let bytes = self
            .contents
            .get(&file.id)
            .ok_or_else(|| RemoteError::NotFound(file.filename.clone()))?;
        fs::write(dest, bytes)?;
        self.downloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
