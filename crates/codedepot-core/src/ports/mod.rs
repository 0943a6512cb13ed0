//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IRemoteStore`] - Versioned remote file store (GitHub contents API)
//! - [`ISettingsStore`] - Key-value storage for token, repository and access key
//! - [`INotificationService`] - User-facing outcome messages

pub mod notification;
pub mod remote_store;
pub mod settings_store;

pub use notification::{INotificationService, Notification, NotificationLevel};
pub use remote_store::{
    DeleteRequest, DirectoryEntry, EntryKind, IRemoteStore, RemoteMetadata, RemoteStoreError,
    WriteRequest,
};
pub use settings_store::{
    load_access_key, Credentials, ISettingsStore, ACCESS_KEY_KEY, REPOSITORY_KEY, TOKEN_KEY,
};
