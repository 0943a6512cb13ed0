//! Domain entities and business logic
//!
//! This module contains the core domain types for Code Depot:
//! - Newtypes for validated names, keys and content descriptors
//! - The namespace that scopes every remote path to one access key
//! - Language inference from file names
//! - Remote files and the in-memory file set
//! - Domain-specific error types

pub mod errors;
pub mod file_set;
pub mod language;
pub mod namespace;
pub mod newtypes;
pub mod remote_file;

// Re-export commonly used types
pub use errors::DomainError;
pub use file_set::FileSet;
pub use language::Language;
pub use namespace::{Namespace, RemotePath, DEFAULT_ROOT_FOLDER};
pub use newtypes::*;
pub use remote_file::{RemoteFile, SyncState};
