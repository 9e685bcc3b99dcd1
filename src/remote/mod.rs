//! Course-management service seam
//!
//! Metadata types, the error taxonomy, and the RemoteSource trait the caching
//! and sync layers are written against. The wire protocol itself lives in an
//! adapter outside this crate.

pub mod errors;
pub mod source;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use errors::RemoteError;
pub use source::RemoteSource;
pub use types::{Course, Profile, RemoteFile, RemoteFolder};
