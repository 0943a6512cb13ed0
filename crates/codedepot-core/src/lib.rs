//! Code Depot Core - Domain logic and port definitions
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `RemoteFile`, `FileSet`, `Namespace` and the validated newtypes
//! - **Port definitions** - Traits for adapters: `IRemoteStore`, `ISettingsStore`, `INotificationService`
//! - **Configuration** - The YAML configuration file model
//!
//! # Architecture
//!
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement; the sync
//! engine drives the domain through those ports.

pub mod config;
pub mod domain;
pub mod ports;
