// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Saving the document between sessions.
//!
//! The whole document is stored as one JSON value under a single key. There
//! is no versioning: a snapshot is read back exactly as it was written.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dom::Document;

pub const DEFAULT_STORAGE_KEY: &str = "content";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("`{0}` can't be used as a storage key")]
    InvalidKey(String),
    #[error("storage failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored content is not a document: {0}")]
    Format(#[from] serde_json::Error),
}

/// String values stored under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Use `directory`, creating it if needed.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, StoreError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Writes go to a temporary file first so a crash never leaves half a
    /// snapshot behind.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let temporary = path.with_extension("json.tmp");
        fs::write(&temporary, value)?;
        fs::rename(&temporary, &path)?;
        Ok(())
    }
}

pub fn save_document(
    store: &mut dyn KeyValueStore,
    key: &str,
    document: &Document,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(document)?;
    store.set(key, &json)?;
    Ok(())
}

pub fn load_document(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<Document>, PersistenceError> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
