//! The editing canvas: an ordered block list plus at most one selection.
//!
//! Array position is the visual order. `order` fields are stale between
//! edits and are renormalized only when producing records for storage
//! ([`Canvas::to_records`]) or after a successful save ([`Canvas::normalize`]).
//!
//! Blocks that failed to load stay on the canvas as rejected entries. They are
//! not editable, but they are written back so stored data is never dropped.

use serde_json::Value;

use lexfolio_types::{
    BlockId, BlockType, DockCategory, ProfileBlock, ProfileBlockRecord, RejectedBlock,
    decode_profile,
};

use crate::error::{BuilderError, Result};

#[derive(Clone, Debug, Default)]
pub struct Canvas {
    blocks: Vec<ProfileBlock>,
    selected: Option<BlockId>,
    rejected: Vec<RejectedBlock>,
    revision: u64,
    saved_revision: u64,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas over already-typed blocks, kept in the given order.
    pub fn from_blocks(blocks: Vec<ProfileBlock>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Decode a stored profile array element by element.
    pub fn load(values: Vec<Value>) -> Self {
        let decoded = decode_profile(values);
        if !decoded.rejected.is_empty() {
            tracing::warn!(
                loaded = decoded.blocks.len(),
                rejected = decoded.rejected.len(),
                "profile loaded with unreadable blocks"
            );
        }
        Self {
            blocks: decoded.blocks,
            rejected: decoded.rejected,
            ..Self::default()
        }
    }

    pub fn blocks(&self) -> &[ProfileBlock] {
        &self.blocks
    }

    pub fn rejected(&self) -> &[RejectedBlock] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// No editable blocks. Rejected placeholders do not count.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&ProfileBlock> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Mutable access to one block. Counts as an edit.
    pub fn get_mut(&mut self, id: &BlockId) -> Result<&mut ProfileBlock> {
        let idx = self.index_of(id)?;
        self.touch();
        Ok(&mut self.blocks[idx])
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    fn index_of(&self, id: &BlockId) -> Result<usize> {
        self.position(id)
            .ok_or_else(|| BuilderError::BlockNotFound(id.clone()))
    }

    // ── Selection ───────────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<&ProfileBlock> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Select a block, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<&BlockId>) -> Result<()> {
        match id {
            Some(id) => {
                self.index_of(id)?;
                self.selected = Some(id.clone());
            }
            None => self.deselect(),
        }
        Ok(())
    }

    /// Clear the selection. Does not count as an edit.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    // ── Editing ─────────────────────────────────────────────────────────────

    /// Append a fresh block of `block_type` and select it.
    pub fn add_block(&mut self, block_type: BlockType) -> BlockId {
        let block = ProfileBlock::new(block_type, self.blocks.len() as u32);
        let id = block.id.clone();
        tracing::debug!(%block_type, id = %id.short(), "block added");
        self.blocks.push(block);
        self.selected = Some(id.clone());
        self.touch();
        id
    }

    /// Move `source` to the position currently held by `target`.
    ///
    /// Returns `Ok(false)` when both ids are the same block.
    pub fn reorder(&mut self, source: &BlockId, target: &BlockId) -> Result<bool> {
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        if from == to {
            return Ok(false);
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        self.touch();
        Ok(true)
    }

    /// Delete a block, clearing the selection when it pointed at it.
    pub fn remove(&mut self, id: &BlockId) -> Result<ProfileBlock> {
        let idx = self.index_of(id)?;
        let block = self.blocks.remove(idx);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.touch();
        Ok(block)
    }

    /// Mutate one block in place.
    pub fn update<R>(&mut self, id: &BlockId, f: impl FnOnce(&mut ProfileBlock) -> R) -> Result<R> {
        let block = self.get_mut(id)?;
        Ok(f(block))
    }

    /// Replace every block, e.g. when applying a template. Selection and
    /// rejected entries are cleared.
    pub fn replace_all(&mut self, blocks: Vec<ProfileBlock>) {
        if !self.rejected.is_empty() {
            tracing::info!(
                dropped = self.rejected.len(),
                "discarding unreadable blocks on replace"
            );
        }
        self.blocks = blocks;
        self.selected = None;
        self.rejected.clear();
        self.touch();
    }

    /// Set every `order` to its array position.
    pub fn normalize(&mut self) {
        for (idx, block) in self.blocks.iter_mut().enumerate() {
            block.order = idx as u32;
        }
    }

    /// Records for storage: valid blocks with `order` equal to their position,
    /// then rejected entries continuing the sequence. Does not mutate.
    pub fn to_records(&self) -> Vec<Value> {
        let mut out = Vec::with_capacity(self.blocks.len() + self.rejected.len());
        for (idx, block) in self.blocks.iter().enumerate() {
            let mut record = ProfileBlockRecord::from(block);
            record.order = idx as i64;
            match serde_json::to_value(&record) {
                Ok(value) => out.push(value),
                Err(e) => tracing::error!(id = %block.id, error = %e, "failed to encode block"),
            }
        }
        let base = self.blocks.len();
        out.extend(
            self.rejected
                .iter()
                .enumerate()
                .map(|(i, rejected)| rejected.with_order(base + i)),
        );
        out
    }

    // ── Dirty tracking ──────────────────────────────────────────────────────

    /// Monotonic edit counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Edited since the last [`Canvas::mark_saved`].
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn mark_saved(&mut self) {
        self.saved_revision = self.revision;
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// One section of the add-block dock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DockSection {
    pub category: DockCategory,
    pub block_types: Vec<BlockType>,
}

/// The add-block palette, grouped by category.
pub fn dock() -> Vec<DockSection> {
    DockCategory::ALL
        .into_iter()
        .map(|category| DockSection {
            category,
            block_types: category.block_types().collect(),
        })
        .collect()
}
