//! Document services.

pub mod batch;
pub mod service;
pub mod upload;
pub mod validate;
pub mod version;

pub use batch::{BatchService, TagOperation};
pub use service::DocumentService;
pub use upload::UploadService;
pub use version::VersionService;
