//! # loresmith-service
//!
//! Business logic for LoreSmith. Services enforce the domain rules the
//! repositories do not know about: lifecycle/progress promotion,
//! metadata key validation, upload validation, append-only version
//! numbering, best-effort file cleanup, and batch semantics.

pub mod document;
