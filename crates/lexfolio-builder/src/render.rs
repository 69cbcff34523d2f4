//! Layout plans: what a host draws for a canvas or a stored profile.
//!
//! A plan is either [`LayoutPlan::Empty`] (draw the call-to-action) or an
//! ordered list of cells. Blocks that could not be loaded become
//! [`Cell::Placeholder`] so one bad record never hides the rest of the page.

use serde_json::Value;

use lexfolio_types::{
    BlockId, BlockType, DEFAULT_CONTACT_LABEL, GridSpan, HeightHint, LayoutMode,
    ProfileBlock, RejectedBlock, ResolvedStyle, decode_profile, resolve_block,
};

use crate::canvas::Canvas;

/// A drawable block.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockCell {
    pub id: BlockId,
    pub block_type: BlockType,
    pub span: GridSpan,
    pub height: Option<HeightHint>,
    pub style: ResolvedStyle,
    /// Heading, button label, or the type label when untitled.
    pub title: String,
    pub selected: bool,
    /// Image still pointing at a local preview.
    pub pending_upload: bool,
}

/// Stand-in for a stored block that failed to load.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderCell {
    pub id: Option<String>,
    pub reason: String,
    pub span: GridSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Block(BlockCell),
    Placeholder(PlaceholderCell),
}

impl Cell {
    pub fn span(&self) -> GridSpan {
        match self {
            Cell::Block(b) => b.span,
            Cell::Placeholder(p) => p.span,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Cell::Placeholder(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutPlan {
    /// Nothing stored: show the add-block call-to-action.
    Empty,
    Grid {
        mode: LayoutMode,
        columns: u8,
        cells: Vec<Cell>,
    },
}

impl LayoutPlan {
    pub fn is_empty(&self) -> bool {
        matches!(self, LayoutPlan::Empty)
    }

    pub fn cells(&self) -> &[Cell] {
        match self {
            LayoutPlan::Empty => &[],
            LayoutPlan::Grid { cells, .. } => cells,
        }
    }
}

/// Plan the canvas in array order, placeholders last.
pub fn plan(canvas: &Canvas, mode: LayoutMode) -> LayoutPlan {
    if canvas.is_empty() && canvas.rejected().is_empty() {
        return LayoutPlan::Empty;
    }
    let selected = canvas.selected();
    let cells = canvas
        .blocks()
        .iter()
        .map(|b| Cell::Block(block_cell(b, mode, selected == Some(&b.id))))
        .chain(canvas.rejected().iter().map(|r| Cell::Placeholder(placeholder(r))))
        .collect();
    grid(mode, cells)
}

/// Plan a stored profile for display, sorted by stored `order`.
pub fn plan_stored(values: Vec<Value>, mode: LayoutMode) -> LayoutPlan {
    let decoded = decode_profile(values);
    if decoded.blocks.is_empty() && decoded.rejected.is_empty() {
        return LayoutPlan::Empty;
    }

    let mut keyed: Vec<(i64, Cell)> = decoded
        .blocks
        .iter()
        .map(|b| (b.order as i64, Cell::Block(block_cell(b, mode, false))))
        .collect();
    keyed.extend(
        decoded
            .rejected
            .iter()
            .map(|r| (stored_order(r), Cell::Placeholder(placeholder(r)))),
    );
    // Stable: ties keep stored array order among each group.
    keyed.sort_by_key(|(order, _)| *order);
    grid(mode, keyed.into_iter().map(|(_, cell)| cell).collect())
}

fn grid(mode: LayoutMode, cells: Vec<Cell>) -> LayoutPlan {
    LayoutPlan::Grid {
        mode,
        columns: mode.columns(),
        cells,
    }
}

fn block_cell(block: &ProfileBlock, mode: LayoutMode, selected: bool) -> BlockCell {
    let title = match (block.block_type(), block.title.as_deref()) {
        (BlockType::Contact, None) => DEFAULT_CONTACT_LABEL.to_string(),
        (BlockType::Contact, Some(t)) if t.trim().is_empty() => DEFAULT_CONTACT_LABEL.to_string(),
        _ => block.display_title().to_string(),
    };
    BlockCell {
        id: block.id.clone(),
        block_type: block.block_type(),
        span: block.size.span(mode),
        height: block.size.height_hint(mode),
        style: resolve_block(block),
        title,
        selected,
        pending_upload: block.content().is_local_preview(),
    }
}

fn placeholder(rejected: &RejectedBlock) -> PlaceholderCell {
    PlaceholderCell {
        id: rejected.id.clone(),
        reason: rejected.reason.to_string(),
        span: GridSpan::new(1, 1),
    }
}

fn stored_order(rejected: &RejectedBlock) -> i64 {
    rejected
        .raw
        .get("order")
        .and_then(Value::as_i64)
        .unwrap_or(rejected.position as i64)
}
