//! # loresmith-storage
//!
//! Filesystem storage for document content. Implements the
//! [`StorageProvider`](loresmith_core::traits::storage::StorageProvider)
//! trait from `loresmith-core` over a local directory and defines the
//! on-disk path layout for documents, versions, and encryption sidecars.

pub mod layout;
pub mod local;

pub use local::LocalStorageProvider;
