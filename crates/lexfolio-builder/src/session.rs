//! One lawyer's editing session: canvas, edit panel, and the repository the
//! profile is saved to.
//!
//! Saves are wholesale. Two sessions on the same lawyer do not merge; the
//! last save wins.

use std::time::Duration;

use lexfolio_types::{
    BlockId, BlockSize, BlockType, LawyerId, ProfileBlock, ProfileTemplate, StylePreset,
};

use crate::canvas::Canvas;
use crate::error::Result;
use crate::panel::EditPanel;
use crate::profile::ProfileRepository;
use crate::store::TemplateRepository;
use crate::templates::TemplateCatalog;

/// Blocks shown to a lawyer with no saved profile.
pub fn starter_blocks() -> Vec<ProfileBlock> {
    vec![
        ProfileBlock::builder(BlockType::Text)
            .order(0)
            .size(BlockSize::Large)
            .title("My vision")
            .preset(StylePreset::Clean)
            .build(),
        ProfileBlock::builder(BlockType::Stats)
            .order(1)
            .size(BlockSize::Medium)
            .preset(StylePreset::Primary)
            .build(),
        ProfileBlock::builder(BlockType::Contact)
            .order(2)
            .size(BlockSize::Small)
            .title("Book an appointment")
            .preset(StylePreset::Clean)
            .build(),
    ]
}

pub struct ProfileSession<P> {
    lawyer: LawyerId,
    repo: P,
    canvas: Canvas,
    panel: EditPanel,
}

impl<P: ProfileRepository> ProfileSession<P> {
    /// Load the lawyer's profile, or start from [`starter_blocks`] when
    /// nothing (or an empty list) is stored.
    pub async fn open(repo: P, lawyer: LawyerId, confirm_timeout: Option<Duration>) -> Result<Self> {
        let canvas = match repo.load(&lawyer).await? {
            Some(records) if !records.is_empty() => Canvas::load(records),
            _ => {
                tracing::debug!(%lawyer, "no saved profile, using starter blocks");
                Canvas::from_blocks(starter_blocks())
            }
        };
        Ok(Self {
            lawyer,
            repo,
            canvas,
            panel: EditPanel::new(confirm_timeout),
        })
    }

    pub fn lawyer(&self) -> &LawyerId {
        &self.lawyer
    }

    pub fn repository(&self) -> &P {
        &self.repo
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn panel(&self) -> &EditPanel {
        &self.panel
    }

    /// Canvas and panel together, for panel operations.
    pub fn parts_mut(&mut self) -> (&mut Canvas, &mut EditPanel) {
        (&mut self.canvas, &mut self.panel)
    }

    pub fn is_dirty(&self) -> bool {
        self.canvas.is_dirty()
    }

    pub fn add_block(&mut self, block_type: BlockType) -> BlockId {
        let id = self.canvas.add_block(block_type);
        self.panel.sync(&self.canvas);
        id
    }

    pub fn select(&mut self, id: Option<&BlockId>) -> Result<()> {
        self.canvas.select(id)?;
        self.panel.sync(&self.canvas);
        Ok(())
    }

    pub fn reorder(&mut self, source: &BlockId, target: &BlockId) -> Result<bool> {
        self.canvas.reorder(source, target)
    }

    pub fn remove(&mut self, id: &BlockId) -> Result<ProfileBlock> {
        let removed = self.canvas.remove(id)?;
        self.panel.sync(&self.canvas);
        Ok(removed)
    }

    /// Replace the whole canvas with template blocks.
    pub fn apply_blocks(&mut self, blocks: Vec<ProfileBlock>) {
        self.canvas.replace_all(blocks);
        self.panel.sync(&self.canvas);
    }

    /// Store the current canvas as a custom template.
    pub async fn save_as_template<R: TemplateRepository>(
        &self,
        catalog: &TemplateCatalog<R>,
        name: &str,
        description: &str,
        created_by: Option<&str>,
    ) -> Result<ProfileTemplate> {
        catalog
            .save_from_current(self.canvas.blocks(), name, description, created_by)
            .await
    }

    /// Write the canvas with `order` renormalized to position.
    ///
    /// The canvas is only renumbered and marked clean once the repository
    /// accepted the write.
    pub async fn save(&mut self) -> Result<()> {
        let records = self.canvas.to_records();
        let count = records.len();
        self.repo.save(&self.lawyer, records).await?;
        self.canvas.normalize();
        self.canvas.mark_saved();
        tracing::info!(lawyer = %self.lawyer, blocks = count, "profile session saved");
        Ok(())
    }
}
