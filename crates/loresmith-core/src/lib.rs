//! # loresmith-core
//!
//! Core crate for LoreSmith. Contains configuration schemas, pagination
//! and filter types, the storage provider trait, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other LoreSmith crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
