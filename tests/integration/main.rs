//! Integration tests for the LoreSmith HTTP API.
//!
//! These exercise the full router with an isolated state: a lazily
//! connected pool and a temporary storage directory. Only routes that
//! do not reach the database are asserted here; repository behavior is
//! covered by the crate-level unit tests.

mod helpers;

mod document_test;
mod health_test;
