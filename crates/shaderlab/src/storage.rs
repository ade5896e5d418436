//! Named-file shader store. Keys are sanitized shader names plus a fixed
//! extension inside one storage root; callers never hand raw paths across
//! this boundary. Listing reflects what is on disk, sorted by modification
//! time descending, so the newest save surfaces first.
//!
//! Types:
//!
//! - `StorageError` classifies missing-file lookups apart from plain I/O
//!   failures so the editor can report them differently.
//! - `FileMeta` is the external-facing descriptor (name, path, timestamps)
//!   whose lifecycle this store owns.
//!
//! Functions:
//!
//! - `ShaderStorage::save` / `load` / `list` / `delete` implement the store
//!   contract; `sanitize_file_name` is the storage-key law.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed extension appended to every storage key.
pub const SHADER_EXTENSION: &str = "glsl";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("shader '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Sanitized stem without the extension.
    pub name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_` before the name
/// is used as a storage key.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ShaderStorage {
    root: PathBuf,
}

impl ShaderStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn save(&self, name: &str, source: &str) -> Result<FileMeta, StorageError> {
        fs::create_dir_all(&self.root)?;
        let stem = sanitize_file_name(name);
        let path = self.root.join(format!("{stem}.{SHADER_EXTENSION}"));
        fs::write(&path, source)?;
        debug!(name = %stem, path = %path.display(), "saved shader");
        meta_for(&path, stem)
    }

    pub fn load(&self, meta: &FileMeta) -> Result<String, StorageError> {
        if !meta.path.exists() {
            return Err(StorageError::NotFound(meta.name.clone()));
        }
        let source = fs::read_to_string(&meta.path)?;
        debug!(name = %meta.name, "loaded shader");
        Ok(source)
    }

    /// Convenience lookup by name for callers that only know the key.
    pub fn find(&self, name: &str) -> Result<FileMeta, StorageError> {
        let stem = sanitize_file_name(name);
        let path = self.root.join(format!("{stem}.{SHADER_EXTENSION}"));
        if !path.exists() {
            return Err(StorageError::NotFound(stem));
        }
        meta_for(&path, stem)
    }

    pub fn list(&self) -> Result<Vec<FileMeta>, StorageError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(SHADER_EXTENSION)
            {
                continue;
            }
            let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => stem.to_string(),
                None => {
                    warn!(path = %path.display(), "skipping shader with unreadable stem");
                    continue;
                }
            };
            entries.push(meta_for(&path, stem)?);
        }
        entries.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        Ok(entries)
    }

    pub fn delete(&self, meta: &FileMeta) -> Result<(), StorageError> {
        if !meta.path.exists() {
            return Err(StorageError::NotFound(meta.name.clone()));
        }
        fs::remove_file(&meta.path)?;
        debug!(name = %meta.name, "deleted shader");
        Ok(())
    }
}

fn meta_for(path: &Path, name: String) -> Result<FileMeta, StorageError> {
    let metadata = fs::metadata(path)?;
    let modified_at: DateTime<Utc> = metadata.modified()?.into();
    // Creation time is unsupported on some filesystems; fall back to mtime.
    let created_at = metadata
        .created()
        .map(DateTime::<Utc>::from)
        .unwrap_or(modified_at);
    Ok(FileMeta {
        name,
        path: path.to_path_buf(),
        created_at,
        modified_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_everything_outside_the_allowed_set() {
        assert_eq!(sanitize_file_name("My Shader!#1"), "My_Shader__1");
        assert_eq!(sanitize_file_name("plain-name_3"), "plain-name_3");
        assert_eq!(sanitize_file_name("été/ünïcode"), "_t___n_code");
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let storage = ShaderStorage::new(temp.path().join("shaders"));

        let meta = storage.save("My Shader!#1", "void main() {}").unwrap();
        assert_eq!(meta.name, "My_Shader__1");
        assert!(meta.path.ends_with("My_Shader__1.glsl"));

        let source = storage.load(&meta).unwrap();
        assert_eq!(source, "void main() {}");
    }

    #[test]
    fn load_of_missing_file_reports_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let storage = ShaderStorage::new(temp.path());
        let meta = FileMeta {
            name: "ghost".into(),
            path: temp.path().join("ghost.glsl"),
            created_at: Utc::now(),
            modified_at: Utc::now(),
        };
        assert!(matches!(
            storage.load(&meta),
            Err(StorageError::NotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn list_sorts_by_modification_time_descending() {
        let temp = tempfile::tempdir().unwrap();
        let storage = ShaderStorage::new(temp.path());

        storage.save("older", "// a").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(30));
        storage.save("newer", "// b").unwrap();

        let listed = storage.list().unwrap();
        let names: Vec<&str> = listed.iter().map(|meta| meta.name.as_str()).collect();
        assert_eq!(names, vec!["newer", "older"]);
    }

    #[test]
    fn list_ignores_foreign_files() {
        let temp = tempfile::tempdir().unwrap();
        let storage = ShaderStorage::new(temp.path());
        storage.save("kept", "// kept").unwrap();
        fs::write(temp.path().join("notes.txt"), "skip me").unwrap();

        let listed = storage.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "kept");
    }

    #[test]
    fn delete_removes_file_and_missing_delete_fails() {
        let temp = tempfile::tempdir().unwrap();
        let storage = ShaderStorage::new(temp.path());
        let meta = storage.save("doomed", "// bye").unwrap();

        storage.delete(&meta).unwrap();
        assert!(!meta.path.exists());
        assert!(matches!(
            storage.delete(&meta),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn find_resolves_by_unsanitized_name() {
        let temp = tempfile::tempdir().unwrap();
        let storage = ShaderStorage::new(temp.path());
        storage.save("My Shader!#1", "// code").unwrap();
        let meta = storage.find("My Shader!#1").unwrap();
        assert_eq!(meta.name, "My_Shader__1");
    }
}
