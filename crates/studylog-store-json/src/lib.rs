//! Flat-file JSON backend for the studylog store.
//!
//! Each collection lives in its own file holding a JSON array. Every
//! operation reads the whole file, applies the change in memory, and writes
//! the whole file back; nothing is cached between calls.

mod collection;
mod store;

pub mod error;

pub use collection::{ensure_initialized, load, load_raw, save};
pub use error::{Error, Result};
pub use store::{Collection, JsonStore};
