//! Core types and trait definitions for the studylog backend.
//!
//! This crate is deliberately free of HTTP and file-system dependencies.
//! Storage backends implement [`store::StudyStore`]; the API layer depends
//! only on that trait.

pub mod error;
pub mod event;
pub mod id;
pub mod iso;
pub mod level;
pub mod store;
pub mod subject;

pub use error::{Error, Result};
pub use id::{Record, RecordId};
