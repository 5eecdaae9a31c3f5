//! Core types and trait definitions for the Docflow office document store.
//!
//! This crate has no HTTP or database dependencies.
//! All other crates depend on it.

pub mod employee;
pub mod error;
pub mod incoming;
pub mod memo;
pub mod order;
pub mod outgoing;
pub mod patch;
pub mod record;
pub mod report;
pub mod store;

pub use error::{Error, Result};
pub use record::{Record, RecordId};
