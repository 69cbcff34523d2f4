//! In-memory template store.
//!
//! Used for tests and for sessions that should not persist anything.

use async_trait::async_trait;
use parking_lot::RwLock;

use lexfolio_types::{ProfileTemplate, TemplateId};

use super::{TemplateRepository, upsert};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    templates: RwLock<Vec<ProfileTemplate>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store.
    pub fn with_templates(templates: Vec<ProfileTemplate>) -> Self {
        Self {
            templates: RwLock::new(templates),
        }
    }
}

#[async_trait]
impl TemplateRepository for MemoryTemplateStore {
    async fn list(&self) -> Result<Vec<ProfileTemplate>> {
        Ok(self.templates.read().clone())
    }

    async fn save(&self, template: ProfileTemplate) -> Result<()> {
        upsert(&mut self.templates.write(), template);
        Ok(())
    }

    async fn delete(&self, id: &TemplateId) -> Result<bool> {
        let mut templates = self.templates.write();
        let before = templates.len();
        templates.retain(|t| &t.id != id);
        Ok(templates.len() != before)
    }
}
