//! Post-login session state
//!
//! Owns the shared remote handle plus the memoized metadata accessors, and
//! wires the eager cache warming that runs right after authentication. The
//! interactive command layer calls into this; presentation stays out.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::cache::{prefetch, Accessor, KeyedCache, PrefetchHandle};
use crate::remote::{Course, Profile, RemoteError, RemoteSource};
use crate::sync::{self, PullOutcome};

/// Session-scoped state shared between the interactive command loop and
/// background prefetch threads.
///
/// The course list and the user profile back almost every command, so both
/// are memoized and warmed right after login.
pub struct Session {
    source: Arc<dyn RemoteSource>,
    courses: Arc<KeyedCache<(), Vec<Course>>>,
    profile: Arc<KeyedCache<(), Profile>>,
}

impl Session {
    pub fn new(source: Arc<dyn RemoteSource>) -> Self {
        Self {
            source,
            courses: Arc::new(KeyedCache::new()),
            profile: Arc::new(KeyedCache::new()),
        }
    }

    /// The user's courses, most recent enrollment term first, then by name.
    /// Cached after the first fetch; pass `invalidate` to force a refetch.
    pub fn courses(&self, invalidate: bool) -> Result<Vec<Course>> {
        let source = Arc::clone(&self.source);
        let compute = move || fetch_sorted_courses(source.as_ref());
        let courses = if invalidate {
            self.courses.refresh_with((), compute)?
        } else {
            self.courses.get_with((), compute)?
        };
        Ok(courses)
    }

    /// The logged-in user's profile, cached after the first fetch.
    pub fn profile(&self, invalidate: bool) -> Result<Profile> {
        let source = Arc::clone(&self.source);
        let compute = move || source.current_user_profile();
        let profile = if invalidate {
            self.profile.refresh_with((), compute)?
        } else {
            self.profile.get_with((), compute)?
        };
        Ok(profile)
    }

    /// Courses whose unique code contains `query`, ignoring case and spaces.
    pub fn find_courses(&self, query: &str) -> Result<Vec<Course>> {
        let needle = query.replace(' ', "").to_lowercase();
        let matches = self
            .courses(false)?
            .into_iter()
            .filter(|course| course.unique_code().to_lowercase().contains(&needle))
            .collect();
        Ok(matches)
    }

    /// Mirror `course`'s files under `root`. See [`sync::pull_course_files`].
    pub fn pull_course_files(&self, root: &Path, course: &Course) -> Result<PullOutcome> {
        sync::pull_course_files(self.source.as_ref(), root, course)
    }

    /// Start warming the caches on a background thread: the course list
    /// first, since nearly every command needs it, then the profile.
    ///
    /// The caller never waits on the result. A command issued before warming
    /// finishes simply blocks on the same key lock and shares the in-flight
    /// fetch instead of issuing a duplicate one.
    pub fn warm_caches(&self) -> PrefetchHandle {
        debug!("Warming session caches in the background");

        let courses = Arc::clone(&self.courses);
        let courses_source = Arc::clone(&self.source);
        let profile = Arc::clone(&self.profile);
        let profile_source = Arc::clone(&self.source);

        let accessors: Vec<Accessor> = vec![
            Box::new(move || {
                courses.get_with((), || fetch_sorted_courses(courses_source.as_ref()))?;
                Ok(())
            }),
            Box::new(move || {
                profile.get_with((), || profile_source.current_user_profile())?;
                Ok(())
            }),
        ];

        prefetch(accessors)
    }
}

fn fetch_sorted_courses(source: &dyn RemoteSource) -> Result<Vec<Course>, RemoteError> {
    let mut courses = source.list_courses()?;
    courses.sort_by(|a, b| {
        b.enrollment_term_id
            .cmp(&a.enrollment_term_id)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(courses)
}
