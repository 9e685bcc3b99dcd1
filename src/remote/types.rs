//! Remote metadata types
//!
//! Course, folder, and file records as the course-management service reports
//! them. Timestamps arrive as Unix epoch seconds (UTC); some API versions
//! encode numeric fields as strings, so deserialization accepts both.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer};

/// Deserialize a u64 that might be encoded as a number, a string, or null.
fn deserialize_flexible_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Raw::Num(n)) => Ok(n),
        Some(Raw::Text(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// A course the authenticated user is enrolled in.
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub course_code: String,
    /// Enrollment term, larger means more recent.
    pub enrollment_term_id: i64,
}

impl Course {
    /// Identifier unique across terms: the course code stripped of spaces,
    /// joined to the course id. `"CS 101"` with id 42 becomes `"CS101-42"`.
    /// The CLI layer uses this for disambiguation and as the per-course
    /// pull subdirectory name.
    pub fn unique_code(&self) -> String {
        format!("{}-{}", self.course_code.replace(' ', ""), self.id)
    }
}

/// Profile of the logged-in user.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub login_id: String,
    #[serde(default)]
    pub primary_email: Option<String>,
}

/// A folder in a course's file hierarchy.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFolder {
    pub id: u64,
    /// Folder name, not a path.
    pub name: String,
    /// Parent folder id; `None` marks the course's root folder.
    #[serde(default)]
    pub parent_id: Option<u64>,
}

impl RemoteFolder {
    /// Whether this is a course's root folder
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A downloadable file inside a remote folder.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    pub id: u64,
    pub filename: String,
    /// File size in bytes
    #[serde(default, deserialize_with = "deserialize_flexible_u64")]
    pub size: u64,
    /// Last modification time, Unix epoch seconds (UTC).
    ///
    /// Whole-second precision is the contract: local mtimes are compared
    /// against this value at the same granularity to avoid spurious
    /// re-downloads.
    #[serde(deserialize_with = "deserialize_flexible_u64")]
    pub modified_at: u64,
}

impl RemoteFile {
    /// Modification time as a SystemTime, whole-second precision
    pub fn modified_time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.modified_at)
    }
}
