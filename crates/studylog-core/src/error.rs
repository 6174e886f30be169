//! Error types for `studylog-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was missing or a field had an unusable value.
  #[error("{0}")]
  Validation(String),
}

impl Error {
  pub(crate) fn missing_field(field: &str) -> Self {
    Self::Validation(format!("missing field `{field}`"))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
