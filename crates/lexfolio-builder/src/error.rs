//! Error types for the profile builder.
//!
//! Rejections that stem from user input (blank template name, unknown block)
//! are distinct variants so hosts can show a message instead of a failure
//! banner. Storage failures wrap their source.

use thiserror::Error;

use lexfolio_types::{BlockId, BlockSize, BlockType, TemplateId, TypeError};

/// Errors that can occur while editing, templating, or persisting a profile.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// No block with this id on the canvas.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),

    /// A panel operation ran with no block selected.
    #[error("no block selected")]
    NothingSelected,

    /// The size exists but is not offered by the panel.
    #[error("size '{0}' is not selectable")]
    SizeNotSelectable(BlockSize),

    /// The selected block's content does not use this editor.
    #[error("{block_type} block has no {editor} editor")]
    WrongEditor {
        block_type: BlockType,
        editor: &'static str,
    },

    /// Content-level rejection (rating range, duplicate platform, unknown entry).
    #[error(transparent)]
    Content(#[from] TypeError),

    /// Template creation from an empty canvas.
    #[error("a template needs at least one block")]
    EmptyTemplate,

    /// Template creation with a blank name.
    #[error("template name is blank")]
    BlankTemplateName,

    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),

    /// Built-in templates cannot be saved over or deleted.
    #[error("built-in template {0} cannot be modified")]
    DefaultTemplate(TemplateId),

    /// Deletion requested by someone other than the creator.
    #[error("template {id} was created by another user")]
    NotTemplateOwner { id: TemplateId },

    /// Identifier unusable as a storage key.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("RON encode error: {0}")]
    RonEncode(#[from] ron::Error),

    /// Backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl BuilderError {
    pub fn wrong_editor(block_type: BlockType, editor: &'static str) -> Self {
        Self::WrongEditor { block_type, editor }
    }

    pub fn not_owner(id: &TemplateId) -> Self {
        Self::NotTemplateOwner { id: id.clone() }
    }

    /// Whether the caller should report this as invalid input rather than a fault.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyTemplate
                | Self::BlankTemplateName
                | Self::SizeNotSelectable(_)
                | Self::DefaultTemplate(_)
                | Self::NotTemplateOwner { .. }
                | Self::Content(_)
        )
    }

    /// Whether the failure came from a storage backend.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Json(_) | Self::Sqlite(_) | Self::Unavailable(_)
        )
    }
}

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, BuilderError>;
