//! Builder configuration, read from RON.
//!
//! ```ron
//! (
//!     data_dir: Some("/srv/lexfolio"),
//!     template_store: Sqlite,
//!     delete_confirm_timeout_secs: Some(5),
//!     log_filter: Some("lexfolio=debug"),
//!     compact_layout: false,
//! )
//! ```
//!
//! Every field is optional. A missing config file yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use lexfolio_types::LayoutMode;

use crate::error::Result;
use crate::profile::FsProfileStore;
use crate::store::{
    BlobTemplateStore, FileKeyValue, MemoryTemplateStore, SqliteTemplateStore, TemplateRepository,
};

/// Backend for custom templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateStoreKind {
    /// Whole list as one JSON blob under a fixed key.
    #[default]
    Blob,
    Sqlite,
    /// Nothing persists past the process.
    Memory,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub data_dir: Option<PathBuf>,
    pub template_store: TemplateStoreKind,
    /// Armed delete resets after this long. `None` waits indefinitely.
    pub delete_confirm_timeout_secs: Option<u64>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    pub compact_layout: bool,
}

impl BuilderConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// `~/.config/lexfolio/config.ron` (platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lexfolio").join("config.ron"))
    }

    /// Load from `path`, or from [`BuilderConfig::default_path`] when `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Configured data directory, else `~/.local/share/lexfolio`, else `./lexfolio-data`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|p| p.join("lexfolio"))
                .unwrap_or_else(|| PathBuf::from("lexfolio-data"))
        })
    }

    pub fn delete_confirm_timeout(&self) -> Option<Duration> {
        self.delete_confirm_timeout_secs.map(Duration::from_secs)
    }

    pub fn layout_mode(&self) -> LayoutMode {
        if self.compact_layout {
            LayoutMode::Compact
        } else {
            LayoutMode::Viewer
        }
    }

    /// Profile store rooted at `<data_dir>/profiles`.
    pub fn profile_store(&self) -> FsProfileStore {
        FsProfileStore::new(self.data_dir().join("profiles"))
    }

    /// Open the configured template backend under the data directory.
    pub fn template_store(&self) -> Result<Box<dyn TemplateRepository>> {
        let dir = self.data_dir();
        Ok(match self.template_store {
            TemplateStoreKind::Blob => Box::new(BlobTemplateStore::new(FileKeyValue::new(dir))),
            TemplateStoreKind::Sqlite => {
                std::fs::create_dir_all(&dir)?;
                Box::new(SqliteTemplateStore::open(dir.join("templates.db"))?)
            }
            TemplateStoreKind::Memory => Box::new(MemoryTemplateStore::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuilderError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_from_empty_struct() {
        let config = BuilderConfig::parse("()").unwrap();
        assert_eq!(config, BuilderConfig::default());
        assert_eq!(config.template_store, TemplateStoreKind::Blob);
        assert_eq!(config.delete_confirm_timeout(), None);
        assert_eq!(config.layout_mode(), LayoutMode::Viewer);
    }

    #[test]
    fn test_parse_full() {
        let config = BuilderConfig::parse(
            r#"(
                data_dir: Some("/srv/lexfolio"),
                template_store: Sqlite,
                delete_confirm_timeout_secs: Some(5),
                log_filter: Some("lexfolio=debug"),
                compact_layout: true,
            )"#,
        )
        .unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/srv/lexfolio"));
        assert_eq!(config.template_store, TemplateStoreKind::Sqlite);
        assert_eq!(config.delete_confirm_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.log_filter.as_deref(), Some("lexfolio=debug"));
        assert_eq!(config.layout_mode(), LayoutMode::Compact);
        assert_eq!(
            config.profile_store().root(),
            Path::new("/srv/lexfolio/profiles")
        );
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = BuilderConfig::parse("(template_store: Carrier)").unwrap_err();
        assert!(matches!(err, BuilderError::Ron(_)));
        assert!(err.to_string().contains("1:"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuilderConfig::load(&dir.path().join("nope.ron")).unwrap();
        assert_eq!(config, BuilderConfig::default());
    }

    #[test]
    fn test_to_ron_reloads() {
        let config = BuilderConfig {
            data_dir: Some("/tmp/lf".into()),
            template_store: TemplateStoreKind::Memory,
            delete_confirm_timeout_secs: Some(3),
            log_filter: None,
            compact_layout: true,
        };
        let text = config.to_ron().unwrap();
        assert_eq!(BuilderConfig::parse(&text).unwrap(), config);
    }

    #[tokio::test]
    async fn test_template_store_backends() {
        let dir = tempfile::tempdir().unwrap();
        for kind in [
            TemplateStoreKind::Blob,
            TemplateStoreKind::Sqlite,
            TemplateStoreKind::Memory,
        ] {
            let config = BuilderConfig {
                data_dir: Some(dir.path().join(format!("{kind:?}"))),
                template_store: kind,
                ..BuilderConfig::default()
            };
            let store = config.template_store().unwrap();
            assert!(store.list().await.unwrap().is_empty());
        }
    }
}
