//! Stored profiles: one ordered record array per lawyer.
//!
//! Records travel as raw JSON values so a block this build cannot read is
//! still written back as it was. Saves overwrite the whole array.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use lexfolio_types::LawyerId;

use crate::error::{BuilderError, Result};
use crate::store::{read_optional, validate_key, write_atomic};

/// Where a lawyer's block configuration lives.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// The stored array, or `None` when nothing was ever saved.
    async fn load(&self, lawyer: &LawyerId) -> Result<Option<Vec<Value>>>;

    /// Overwrite the stored array.
    async fn save(&self, lawyer: &LawyerId, records: Vec<Value>) -> Result<()>;
}

#[async_trait]
impl<T: ProfileRepository + ?Sized> ProfileRepository for Box<T> {
    async fn load(&self, lawyer: &LawyerId) -> Result<Option<Vec<Value>>> {
        (**self).load(lawyer).await
    }

    async fn save(&self, lawyer: &LawyerId, records: Vec<Value>) -> Result<()> {
        (**self).save(lawyer, records).await
    }
}

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: DashMap<LawyerId, Vec<Value>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileStore {
    async fn load(&self, lawyer: &LawyerId) -> Result<Option<Vec<Value>>> {
        Ok(self.profiles.get(lawyer).map(|p| p.value().clone()))
    }

    async fn save(&self, lawyer: &LawyerId, records: Vec<Value>) -> Result<()> {
        self.profiles.insert(lawyer.clone(), records);
        Ok(())
    }
}

/// `<root>/<lawyer>.json`, one file per lawyer.
#[derive(Debug, Clone)]
pub struct FsProfileStore {
    root: PathBuf,
}

impl FsProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, lawyer: &LawyerId) -> Result<PathBuf> {
        validate_key(lawyer.as_str())?;
        Ok(self.root.join(format!("{lawyer}.json")))
    }
}

#[async_trait]
impl ProfileRepository for FsProfileStore {
    async fn load(&self, lawyer: &LawyerId) -> Result<Option<Vec<Value>>> {
        let path = self.path_for(lawyer)?;
        let Some(text) = read_optional(&path).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<Value>(&text)? {
            Value::Array(records) => Ok(Some(records)),
            Value::Null => Ok(None),
            _ => Err(BuilderError::Unavailable(format!(
                "{} does not hold a block list",
                path.display()
            ))),
        }
    }

    async fn save(&self, lawyer: &LawyerId, records: Vec<Value>) -> Result<()> {
        let path = self.path_for(lawyer)?;
        let count = records.len();
        let body = serde_json::to_vec_pretty(&Value::Array(records))?;
        write_atomic(&path, &body).await?;
        tracing::info!(%lawyer, blocks = count, "profile saved");
        Ok(())
    }
}
