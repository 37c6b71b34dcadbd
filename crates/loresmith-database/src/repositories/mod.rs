//! Repository implementations for LoreSmith entities.

pub mod document;
pub mod version;

pub use document::DocumentRepository;
pub use version::VersionRepository;
