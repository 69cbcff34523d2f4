//! The edit panel bound to the canvas selection.
//!
//! The panel is open whenever the canvas has a selection. Every operation
//! targets the selected block. Deleting takes two presses: the first arms
//! [`DeleteConfirm`], the second on the same block deletes it. Rebinding to
//! another block, closing, or blurring the panel disarms.

use std::time::{Duration, Instant};

use lexfolio_types::{
    BlockId, BlockSize, BlockStyle, CustomBackground, ProfileBlock, StylePreset, TextColorMode,
};

use crate::canvas::Canvas;
use crate::editors::ContentEditor;
use crate::error::{BuilderError, Result};

/// Two-step delete confirmation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DeleteConfirm {
    #[default]
    Idle,
    Armed { block: BlockId, armed_at: Instant },
}

/// Result of pressing delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletePress {
    /// First press; a second press confirms.
    Armed,
    Confirmed,
}

impl DeleteConfirm {
    /// Press delete for `block`. Confirms only when armed for the same block
    /// and, with a timeout, armed recently enough. Otherwise (re)arms.
    pub fn press(&mut self, block: &BlockId, now: Instant, timeout: Option<Duration>) -> DeletePress {
        let confirmed = match &*self {
            DeleteConfirm::Armed {
                block: armed,
                armed_at,
            } if armed == block => {
                timeout.is_none_or(|t| now.saturating_duration_since(*armed_at) <= t)
            }
            _ => false,
        };
        if confirmed {
            *self = DeleteConfirm::Idle;
            DeletePress::Confirmed
        } else {
            *self = DeleteConfirm::Armed {
                block: block.clone(),
                armed_at: now,
            };
            DeletePress::Armed
        }
    }

    pub fn disarm(&mut self) {
        *self = DeleteConfirm::Idle;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, DeleteConfirm::Armed { .. })
    }

    pub fn is_armed_for(&self, id: &BlockId) -> bool {
        matches!(self, DeleteConfirm::Armed { block, .. } if block == id)
    }
}

/// Outcome of a delete press on the panel.
#[derive(Clone, Debug, PartialEq)]
pub enum DeleteOutcome {
    Armed,
    Deleted(ProfileBlock),
}

#[derive(Clone, Debug, Default)]
pub struct EditPanel {
    bound: Option<BlockId>,
    confirm: DeleteConfirm,
    confirm_timeout: Option<Duration>,
}

impl EditPanel {
    pub fn new(confirm_timeout: Option<Duration>) -> Self {
        Self {
            confirm_timeout,
            ..Self::default()
        }
    }

    /// Follow the canvas selection. Binding to a different block disarms.
    pub fn sync(&mut self, canvas: &Canvas) {
        let selected = canvas.selected();
        if self.bound.as_ref() != selected {
            self.bound = selected.cloned();
            self.confirm.disarm();
        }
    }

    pub fn is_open(&self) -> bool {
        self.bound.is_some()
    }

    pub fn bound(&self) -> Option<&BlockId> {
        self.bound.as_ref()
    }

    pub fn confirm(&self) -> &DeleteConfirm {
        &self.confirm
    }

    /// Close the panel: deselect and disarm.
    pub fn close(&mut self, canvas: &mut Canvas) {
        canvas.deselect();
        self.bound = None;
        self.confirm.disarm();
    }

    /// Focus left the panel.
    pub fn blur(&mut self) {
        self.confirm.disarm();
    }

    fn target<'c>(&mut self, canvas: &'c mut Canvas) -> Result<&'c mut ProfileBlock> {
        self.sync(canvas);
        let id = self.bound.clone().ok_or(BuilderError::NothingSelected)?;
        canvas.get_mut(&id)
    }

    /// Change the grid size. Only sizes offered by the panel are accepted.
    pub fn set_size(&mut self, canvas: &mut Canvas, size: BlockSize) -> Result<()> {
        if !size.is_selectable() {
            return Err(BuilderError::SizeNotSelectable(size));
        }
        self.target(canvas)?.size = size;
        Ok(())
    }

    /// Switch to a named preset, dropping any custom colors.
    pub fn set_style_preset(&mut self, canvas: &mut Canvas, preset: StylePreset) -> Result<()> {
        self.target(canvas)?.style = BlockStyle::Preset(preset);
        Ok(())
    }

    /// Choose "custom". Existing custom colors are kept; otherwise the block
    /// waits for a color with no background.
    pub fn choose_custom(&mut self, canvas: &mut Canvas) -> Result<()> {
        let block = self.target(canvas)?;
        if !block.style.is_custom() {
            block.style = BlockStyle::Custom {
                background: None,
                text: TextColorMode::default(),
            };
        }
        Ok(())
    }

    /// Set both custom color fields at once.
    pub fn set_custom_colors(
        &mut self,
        canvas: &mut Canvas,
        background: CustomBackground,
        text: TextColorMode,
    ) -> Result<()> {
        self.target(canvas)?.style = BlockStyle::custom(background, text);
        Ok(())
    }

    /// Change only the text mode of a custom style, switching to custom if needed.
    pub fn set_text_color(&mut self, canvas: &mut Canvas, text: TextColorMode) -> Result<()> {
        let block = self.target(canvas)?;
        let background = match block.style {
            BlockStyle::Custom { background, .. } => background,
            BlockStyle::Preset(_) => None,
        };
        block.style = BlockStyle::Custom { background, text };
        Ok(())
    }

    pub fn set_title(&mut self, canvas: &mut Canvas, title: &str) -> Result<()> {
        let title = title.trim();
        self.target(canvas)?.title = (!title.is_empty()).then(|| title.to_string());
        Ok(())
    }

    /// Run an edit against the selected block's content editor.
    pub fn edit<R>(
        &mut self,
        canvas: &mut Canvas,
        f: impl FnOnce(ContentEditor<'_>) -> Result<R>,
    ) -> Result<R> {
        let block = self.target(canvas)?;
        f(ContentEditor::bind(block))
    }

    /// Press delete at `now`.
    pub fn press_delete(&mut self, canvas: &mut Canvas, now: Instant) -> Result<DeleteOutcome> {
        self.sync(canvas);
        let id = self.bound.clone().ok_or(BuilderError::NothingSelected)?;
        match self.confirm.press(&id, now, self.confirm_timeout) {
            DeletePress::Armed => Ok(DeleteOutcome::Armed),
            DeletePress::Confirmed => {
                let block = canvas.remove(&id)?;
                self.bound = None;
                tracing::debug!(id = %id.short(), "block deleted");
                Ok(DeleteOutcome::Deleted(block))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexfolio_types::{BlockType, HexColor, StatField};

    fn canvas_with(types: &[BlockType]) -> (Canvas, Vec<BlockId>) {
        let mut canvas = Canvas::new();
        let ids = types.iter().map(|t| canvas.add_block(*t)).collect();
        (canvas, ids)
    }

    #[test]
    fn test_confirm_machine() {
        let id = BlockId::from_raw("a");
        let now = Instant::now();
        let mut confirm = DeleteConfirm::default();
        assert_eq!(confirm.press(&id, now, None), DeletePress::Armed);
        assert!(confirm.is_armed_for(&id));
        assert_eq!(confirm.press(&id, now, None), DeletePress::Confirmed);
        assert_eq!(confirm, DeleteConfirm::Idle);

        confirm.press(&id, now, None);
        confirm.disarm();
        assert_eq!(confirm.press(&id, now, None), DeletePress::Armed);
    }

    #[test]
    fn test_confirm_other_block_rearms() {
        let a = BlockId::from_raw("a");
        let b = BlockId::from_raw("b");
        let now = Instant::now();
        let mut confirm = DeleteConfirm::default();
        confirm.press(&a, now, None);
        assert_eq!(confirm.press(&b, now, None), DeletePress::Armed);
        assert!(confirm.is_armed_for(&b));
    }

    #[test]
    fn test_confirm_timeout() {
        let id = BlockId::from_raw("a");
        let start = Instant::now();
        let timeout = Some(Duration::from_secs(5));
        let mut confirm = DeleteConfirm::default();
        confirm.press(&id, start, timeout);
        let late = start + Duration::from_secs(6);
        assert_eq!(confirm.press(&id, late, timeout), DeletePress::Armed);
        assert_eq!(
            confirm.press(&id, late + Duration::from_secs(1), timeout),
            DeletePress::Confirmed
        );
    }

    #[test]
    fn test_panel_follows_selection() {
        let (mut canvas, ids) = canvas_with(&[BlockType::Text, BlockType::Stats]);
        let mut panel = EditPanel::default();
        panel.sync(&canvas);
        assert_eq!(panel.bound(), Some(&ids[1]));

        let revision = canvas.revision();
        panel.close(&mut canvas);
        assert!(!panel.is_open());
        assert_eq!(canvas.selected(), None);
        assert_eq!(canvas.revision(), revision);
        assert!(matches!(
            panel.set_size(&mut canvas, BlockSize::Large),
            Err(BuilderError::NothingSelected)
        ));
    }

    #[test]
    fn test_two_step_delete() {
        let (mut canvas, ids) = canvas_with(&[BlockType::Text, BlockType::Stats]);
        let mut panel = EditPanel::default();
        let now = Instant::now();
        assert_eq!(panel.press_delete(&mut canvas, now).unwrap(), DeleteOutcome::Armed);
        assert_eq!(canvas.len(), 2);
        let DeleteOutcome::Deleted(block) = panel.press_delete(&mut canvas, now).unwrap() else {
            panic!("expected delete");
        };
        assert_eq!(block.id, ids[1]);
        assert_eq!(canvas.len(), 1);
        assert_eq!(canvas.selected(), None);
        assert!(!panel.is_open());
    }

    #[test]
    fn test_reselect_resets_arm() {
        let (mut canvas, ids) = canvas_with(&[BlockType::Text, BlockType::Stats]);
        let mut panel = EditPanel::default();
        let now = Instant::now();
        panel.press_delete(&mut canvas, now).unwrap();
        assert!(panel.confirm().is_armed_for(&ids[1]));

        canvas.select(Some(&ids[0])).unwrap();
        panel.sync(&canvas);
        assert!(!panel.confirm().is_armed());

        canvas.select(Some(&ids[1])).unwrap();
        assert_eq!(panel.press_delete(&mut canvas, now).unwrap(), DeleteOutcome::Armed);
        assert_eq!(canvas.len(), 2);
    }

    #[test]
    fn test_blur_disarms() {
        let (mut canvas, _) = canvas_with(&[BlockType::Text]);
        let mut panel = EditPanel::default();
        let now = Instant::now();
        panel.press_delete(&mut canvas, now).unwrap();
        panel.blur();
        assert_eq!(panel.press_delete(&mut canvas, now).unwrap(), DeleteOutcome::Armed);
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn test_hero_not_selectable() {
        let (mut canvas, ids) = canvas_with(&[BlockType::Media]);
        let mut panel = EditPanel::default();
        assert!(matches!(
            panel.set_size(&mut canvas, BlockSize::Hero),
            Err(BuilderError::SizeNotSelectable(BlockSize::Hero))
        ));
        panel.set_size(&mut canvas, BlockSize::Wide).unwrap();
        assert_eq!(canvas.get(&ids[0]).map(|b| b.size), Some(BlockSize::Wide));
    }

    #[test]
    fn test_named_preset_clears_custom_colors() {
        let (mut canvas, ids) = canvas_with(&[BlockType::Text]);
        let mut panel = EditPanel::default();
        panel
            .set_custom_colors(
                &mut canvas,
                CustomBackground::Solid(HexColor::rgb(0x1E, 0x3A, 0x5F)),
                TextColorMode::Light,
            )
            .unwrap();
        let style = canvas.get(&ids[0]).unwrap().style;
        assert_eq!(style.preset_name(), "custom");
        assert_eq!(style.custom_bg_color().as_deref(), Some("#1E3A5F"));

        panel.set_style_preset(&mut canvas, StylePreset::Cream).unwrap();
        let style = canvas.get(&ids[0]).unwrap().style;
        assert_eq!(style.preset_name(), "cream");
        assert_eq!(style.custom_bg_color(), None);
        assert_eq!(style.custom_text_color(), None);
    }

    #[test]
    fn test_choose_custom_keeps_existing_colors() {
        let (mut canvas, ids) = canvas_with(&[BlockType::Text]);
        let mut panel = EditPanel::default();
        panel.choose_custom(&mut canvas).unwrap();
        assert_eq!(
            canvas.get(&ids[0]).unwrap().style,
            BlockStyle::Custom {
                background: None,
                text: TextColorMode::Auto
            }
        );

        let bg = CustomBackground::Solid(HexColor::WHITE);
        panel.set_custom_colors(&mut canvas, bg, TextColorMode::Dark).unwrap();
        panel.choose_custom(&mut canvas).unwrap();
        assert_eq!(
            canvas.get(&ids[0]).unwrap().style,
            BlockStyle::custom(bg, TextColorMode::Dark)
        );

        panel.set_text_color(&mut canvas, TextColorMode::Light).unwrap();
        assert_eq!(
            canvas.get(&ids[0]).unwrap().style,
            BlockStyle::custom(bg, TextColorMode::Light)
        );
    }

    #[test]
    fn test_edit_delegates_to_content_editor() {
        let (mut canvas, ids) = canvas_with(&[BlockType::Stats]);
        let mut panel = EditPanel::default();
        let stored = panel
            .edit(&mut canvas, |editor| {
                Ok(editor.into_stats()?.set_input(StatField::CasesWon, "250"))
            })
            .unwrap();
        assert_eq!(stored, 250);
        assert_eq!(
            canvas.get(&ids[0]).and_then(|b| b.content().as_stats()).map(|s| s.cases_won),
            Some(250)
        );

        let err = panel
            .edit(&mut canvas, |editor| editor.into_social().map(|_| ()))
            .unwrap_err();
        assert!(matches!(err, BuilderError::WrongEditor { .. }));
    }

    #[test]
    fn test_set_title_trims_and_clears() {
        let (mut canvas, ids) = canvas_with(&[BlockType::Contact]);
        let mut panel = EditPanel::default();
        panel.set_title(&mut canvas, "  Call me  ").unwrap();
        assert_eq!(canvas.get(&ids[0]).unwrap().title.as_deref(), Some("Call me"));
        panel.set_title(&mut canvas, "").unwrap();
        assert_eq!(canvas.get(&ids[0]).unwrap().title, None);
    }
}
