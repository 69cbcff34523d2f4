//! Custom template persistence.
//!
//! [`TemplateRepository`] is the seam the catalog talks to. Built-in templates
//! never pass through it.
//!
//! ```text
//! TemplateRepository
//!   ├── MemoryTemplateStore      (tests, --template-store memory)
//!   ├── BlobTemplateStore<K>     (whole list under one key of a KeyValueStore)
//!   │     ├── MemoryKeyValue
//!   │     └── FileKeyValue       (one file per key in a directory)
//!   └── SqliteTemplateStore      (one row per template)
//! ```

use std::path::Path;

use async_trait::async_trait;

use lexfolio_types::{ProfileTemplate, TemplateId};

use crate::error::{BuilderError, Result};

pub mod blob;
pub mod memory;
pub mod sqlite;

pub use blob::{BlobTemplateStore, FileKeyValue, KeyValueStore, MemoryKeyValue, TEMPLATES_KEY};
pub use memory::MemoryTemplateStore;
pub use sqlite::SqliteTemplateStore;

/// Storage for user-created templates.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Every stored template, in insertion order.
    async fn list(&self) -> Result<Vec<ProfileTemplate>>;

    /// Insert, or replace the template with the same id in place.
    async fn save(&self, template: ProfileTemplate) -> Result<()>;

    /// Remove by id. Returns whether a template was removed.
    async fn delete(&self, id: &TemplateId) -> Result<bool>;

    async fn get(&self, id: &TemplateId) -> Result<Option<ProfileTemplate>> {
        Ok(self.list().await?.into_iter().find(|t| &t.id == id))
    }
}

#[async_trait]
impl<T: TemplateRepository + ?Sized> TemplateRepository for Box<T> {
    async fn list(&self) -> Result<Vec<ProfileTemplate>> {
        (**self).list().await
    }

    async fn save(&self, template: ProfileTemplate) -> Result<()> {
        (**self).save(template).await
    }

    async fn delete(&self, id: &TemplateId) -> Result<bool> {
        (**self).delete(id).await
    }

    async fn get(&self, id: &TemplateId) -> Result<Option<ProfileTemplate>> {
        (**self).get(id).await
    }
}

/// Replace the entry with the same id in place, or append.
pub(crate) fn upsert(list: &mut Vec<ProfileTemplate>, template: ProfileTemplate) {
    match list.iter_mut().find(|t| t.id == template.id) {
        Some(slot) => *slot = template,
        None => list.push(template),
    }
}

/// Reject keys that could escape a storage directory.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(BuilderError::InvalidKey(key.to_string()))
    }
}

/// Write through a sibling temp file and rename, so readers never see a
/// partial file.
pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Read a file, treating a missing file as absent.
pub(crate) async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
