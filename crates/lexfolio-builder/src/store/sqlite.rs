//! SQLite template store: one row per template.
//!
//! Metadata columns are kept for listing and ownership queries; the full
//! template travels as a JSON body so the row format follows the template
//! wire shape.

use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};

use lexfolio_types::{ProfileTemplate, TemplateId};

use super::TemplateRepository;
use crate::error::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS templates (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    created_by TEXT,
    created_at INTEGER,
    position INTEGER NOT NULL,
    body TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_templates_position ON templates(position);
"#;

pub struct SqliteTemplateStore {
    conn: Mutex<Connection>,
}

impl SqliteTemplateStore {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Templates created by `email`, case-insensitive.
    pub fn list_created_by(&self, email: &str) -> Result<Vec<ProfileTemplate>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, body FROM templates WHERE lower(created_by) = lower(?1) ORDER BY position",
        )?;
        let rows = stmt.query_map(params![email.trim()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, body) = row?;
            if let Some(template) = decode_row(&id, &body) {
                out.push(template);
            }
        }
        Ok(out)
    }
}

fn decode_row(id: &str, body: &str) -> Option<ProfileTemplate> {
    match serde_json::from_str(body) {
        Ok(template) => Some(template),
        Err(e) => {
            tracing::warn!(id, error = %e, "skipping unreadable template row");
            None
        }
    }
}

#[async_trait]
impl TemplateRepository for SqliteTemplateStore {
    async fn list(&self) -> Result<Vec<ProfileTemplate>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, body FROM templates ORDER BY position")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, body) = row?;
            if let Some(template) = decode_row(&id, &body) {
                out.push(template);
            }
        }
        Ok(out)
    }

    async fn save(&self, template: ProfileTemplate) -> Result<()> {
        let body = serde_json::to_string(&template)?;
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO templates (id, name, created_by, created_at, position, body)
             VALUES (?1, ?2, ?3, ?4, (SELECT COALESCE(MAX(position) + 1, 0) FROM templates), ?5)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 created_by = excluded.created_by,
                 created_at = excluded.created_at,
                 body = excluded.body",
            params![
                template.id.as_str(),
                template.name,
                template.created_by,
                template.created_at.map(|t| t as i64),
                body,
            ],
        )?;
        tracing::info!(id = %template.id, name = %template.name, "template saved");
        Ok(())
    }

    async fn delete(&self, id: &TemplateId) -> Result<bool> {
        let conn = self.conn.lock();
        let removed = conn.execute("DELETE FROM templates WHERE id = ?1", params![id.as_str()])?;
        if removed > 0 {
            tracing::info!(%id, "template deleted");
        }
        Ok(removed > 0)
    }

    async fn get(&self, id: &TemplateId) -> Result<Option<ProfileTemplate>> {
        let conn = self.conn.lock();
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM templates WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body.and_then(|b| decode_row(id.as_str(), &b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexfolio_types::default_templates;
    use pretty_assertions::assert_eq;

    fn custom(name: &str, creator: &str) -> ProfileTemplate {
        let mut template = default_templates()[0].clone();
        template.id = TemplateId::new();
        template.name = name.to_string();
        template.is_default = false;
        template.created_by = Some(creator.to_string());
        template.created_at = Some(1_700_000_000_000);
        template
    }

    #[tokio::test]
    async fn test_crud() {
        let store = SqliteTemplateStore::in_memory().unwrap();
        let a = custom("A", "a@cabinet.fr");
        let b = custom("B", "b@cabinet.fr");
        store.save(a.clone()).await.unwrap();
        store.save(b.clone()).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![a.clone(), b.clone()]);
        assert_eq!(store.get(&b.id).await.unwrap(), Some(b.clone()));

        let mut renamed = a.clone();
        renamed.name = "A2".into();
        store.save(renamed.clone()).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![renamed, b.clone()]);

        assert!(store.delete(&b.id).await.unwrap());
        assert!(!store.delete(&b.id).await.unwrap());
        assert_eq!(store.get(&b.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_created_by() {
        let store = SqliteTemplateStore::in_memory().unwrap();
        store.save(custom("Mine", "Me@Cabinet.fr")).await.unwrap();
        store.save(custom("Theirs", "other@cabinet.fr")).await.unwrap();
        let mine = store.list_created_by("me@cabinet.fr").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Mine");
    }

    #[tokio::test]
    async fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates.db");
        let template = custom("Kept", "a@cabinet.fr");
        {
            let store = SqliteTemplateStore::open(&path).unwrap();
            store.save(template.clone()).await.unwrap();
        }
        let store = SqliteTemplateStore::open(&path).unwrap();
        assert_eq!(store.list().await.unwrap(), vec![template]);
    }
}
