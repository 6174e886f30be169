//! Whole-file load and save of a record collection.

use std::{
  ffi::OsString,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::fs;
use uuid::Uuid;

use crate::{Error, Result};

/// Read every record stored at `path`, in file order.
///
/// Never fails: a missing, unreadable, or non-array file yields an empty
/// collection, and array elements that do not decode as `T` are skipped.
/// Both corrupt cases are logged.
pub async fn load<T: DeserializeOwned>(path: &Path) -> Vec<T> {
  load_raw(path)
    .await
    .into_iter()
    .enumerate()
    .filter_map(|(index, value)| match serde_json::from_value(value) {
      Ok(record) => Some(record),
      Err(e) => {
        tracing::warn!(path = %path.display(), index, error = %e, "skipping undecodable record");
        None
      }
    })
    .collect()
}

/// Read the array stored at `path` without decoding its elements.
///
/// Write paths go through this so that elements they cannot decode are
/// written back untouched.
pub async fn load_raw(path: &Path) -> Vec<Value> {
  let raw = match fs::read(path).await {
    Ok(raw) => raw,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      tracing::debug!(path = %path.display(), "store file missing; treating as empty");
      return Vec::new();
    }
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "cannot read store file; treating as empty");
      return Vec::new();
    }
  };

  match serde_json::from_slice(&raw) {
    Ok(values) => values,
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "store file is not a JSON array; treating as empty");
      Vec::new()
    }
  }
}

/// Replace the contents of `path` with `records`, pretty-printed.
///
/// The data is written to a uniquely named sibling file which is then renamed
/// over `path`, so a failed write leaves the previous contents in place and
/// overlapping saves never share a temporary file.
pub async fn save<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
  let json = serde_json::to_vec_pretty(records)?;
  let tmp = temp_path(path);

  if let Err(source) = fs::write(&tmp, &json).await {
    let _ = fs::remove_file(&tmp).await;
    return Err(Error::Io { path: tmp, source });
  }
  if let Err(source) = fs::rename(&tmp, path).await {
    let _ = fs::remove_file(&tmp).await;
    return Err(Error::Io { path: path.to_path_buf(), source });
  }

  tracing::debug!(path = %path.display(), records = records.len(), "saved store file");
  Ok(())
}

/// Create each file (and its parent directory) as an empty collection if it
/// does not exist yet. Existing files are left untouched.
pub async fn ensure_initialized<I, P>(paths: I) -> Result<()>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  for path in paths {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).await.map_err(Error::io(parent))?;
    }

    if !fs::try_exists(path).await.map_err(Error::io(path))? {
      fs::write(path, b"[]").await.map_err(Error::io(path))?;
      tracing::info!(path = %path.display(), "created empty store file");
    }
  }
  Ok(())
}

/// `<dir>/.<file>.<uuid>.tmp`
fn temp_path(path: &Path) -> PathBuf {
  let mut name = OsString::from(".");
  if let Some(file) = path.file_name() {
    name.push(file);
  }
  name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
  path.with_file_name(name)
}
