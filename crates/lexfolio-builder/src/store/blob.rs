//! Template list stored as one JSON blob under a fixed key.
//!
//! Every mutation reads the whole list, edits it, and rewrites it. Entries
//! that no longer parse as templates are carried through rewrites untouched,
//! and a blob that is not a JSON array reads as empty.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::Mutex;

use lexfolio_types::{ProfileTemplate, TemplateId};

use super::{TemplateRepository, read_optional, validate_key, write_atomic};
use crate::error::Result;

/// Storage key for the custom template list.
pub const TEMPLATES_KEY: &str = "lexfolio_profile_templates";

/// Client-local string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryKeyValue {
    entries: DashMap<String, String>,
}

impl MemoryKeyValue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValue {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValue {
    dir: PathBuf,
}

impl FileKeyValue {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValue {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        read_optional(&self.path_for(key)?).await
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        write_atomic(&self.path_for(key)?, value.as_bytes()).await
    }
}

pub struct BlobTemplateStore<K> {
    kv: K,
    key: String,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl<K: KeyValueStore> BlobTemplateStore<K> {
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, TEMPLATES_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn read_raw(&self) -> Result<Vec<Value>> {
        let Some(blob) = self.kv.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Value>(&blob) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => {
                tracing::warn!(key = %self.key, "template blob is not a list, reading as empty");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "corrupt template blob, reading as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_raw(&self, entries: Vec<Value>) -> Result<()> {
        let blob = serde_json::to_string(&Value::Array(entries))?;
        self.kv.set(&self.key, blob).await
    }
}

fn raw_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

#[async_trait]
impl<K: KeyValueStore> TemplateRepository for BlobTemplateStore<K> {
    async fn list(&self) -> Result<Vec<ProfileTemplate>> {
        let entries = self.read_raw().await?;
        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(idx, entry)| match serde_json::from_value(entry) {
                Ok(template) => Some(template),
                Err(e) => {
                    tracing::warn!(idx, error = %e, "skipping unreadable stored template");
                    None
                }
            })
            .collect())
    }

    async fn save(&self, template: ProfileTemplate) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_raw().await?;
        let value = serde_json::to_value(&template)?;
        match entries
            .iter_mut()
            .find(|e| raw_id(e) == Some(template.id.as_str()))
        {
            Some(slot) => *slot = value,
            None => entries.push(value),
        }
        self.write_raw(entries).await?;
        tracing::info!(id = %template.id, name = %template.name, "template saved");
        Ok(())
    }

    async fn delete(&self, id: &TemplateId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_raw().await?;
        let before = entries.len();
        entries.retain(|e| raw_id(e) != Some(id.as_str()));
        if entries.len() == before {
            return Ok(false);
        }
        self.write_raw(entries).await?;
        tracing::info!(%id, "template deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexfolio_types::default_templates;
    use pretty_assertions::assert_eq;

    fn custom(name: &str) -> ProfileTemplate {
        let mut template = default_templates()[1].clone();
        template.id = TemplateId::new();
        template.name = name.to_string();
        template.is_default = false;
        template.created_by = Some("me@cabinet.fr".into());
        template
    }

    #[tokio::test]
    async fn test_blob_round_trip_under_fixed_key() {
        let store = BlobTemplateStore::new(MemoryKeyValue::new());
        let a = custom("A");
        let b = custom("B");
        store.save(a.clone()).await.unwrap();
        store.save(b.clone()).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![a.clone(), b.clone()]);

        let blob = store.kv.get(TEMPLATES_KEY).await.unwrap().unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&blob).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["name"], "A");

        assert!(store.delete(&a.id).await.unwrap());
        assert_eq!(store.list().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_upsert_keeps_position() {
        let store = BlobTemplateStore::new(MemoryKeyValue::new());
        let mut a = custom("A");
        let b = custom("B");
        store.save(a.clone()).await.unwrap();
        store.save(b).await.unwrap();
        a.name = "A2".into();
        store.save(a).await.unwrap();
        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["A2".to_string(), "B".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_blob_reads_empty() {
        let kv = MemoryKeyValue::new();
        kv.set(TEMPLATES_KEY, "{not json".into()).await.unwrap();
        let store = BlobTemplateStore::new(kv);
        assert!(store.list().await.unwrap().is_empty());

        store.save(custom("Fresh")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_entries_survive_rewrites() {
        let kv = MemoryKeyValue::new();
        kv.set(TEMPLATES_KEY, r#"[{"id": "old", "weird": true}]"#.into())
            .await
            .unwrap();
        let store = BlobTemplateStore::new(kv);
        assert!(store.list().await.unwrap().is_empty());

        store.save(custom("New")).await.unwrap();
        let blob = store.kv.get(TEMPLATES_KEY).await.unwrap().unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&blob).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["weird"], true);
    }

    #[tokio::test]
    async fn test_file_backend_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let template = custom("On disk");
        {
            let store = BlobTemplateStore::new(FileKeyValue::new(dir.path()));
            store.save(template.clone()).await.unwrap();
        }
        assert!(dir.path().join("lexfolio_profile_templates.json").exists());
        let store = BlobTemplateStore::new(FileKeyValue::new(dir.path()));
        assert_eq!(store.list().await.unwrap(), vec![template]);
    }

    #[tokio::test]
    async fn test_file_backend_rejects_bad_keys() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValue::new(dir.path());
        assert!(kv.set("../escape", "x".into()).await.is_err());
    }
}
