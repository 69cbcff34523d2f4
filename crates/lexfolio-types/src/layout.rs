//! Grid footprint per block size.
//!
//! Three layouts share the size domain: the editor canvas (three columns,
//! rows span), the public viewer (three columns, height hints), and the
//! compact two-column preview used in template pickers. Every table is an
//! exhaustive match over [`BlockSize`].

use serde::{Deserialize, Serialize};

use crate::block::BlockSize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Editing canvas.
    #[default]
    Editor,
    /// Public profile page.
    Viewer,
    /// Two-column preview.
    Compact,
}

impl LayoutMode {
    pub fn columns(&self) -> u8 {
        match self {
            LayoutMode::Editor | LayoutMode::Viewer => 3,
            LayoutMode::Compact => 2,
        }
    }
}

/// Column × row span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSpan {
    pub columns: u8,
    pub rows: u8,
}

impl GridSpan {
    pub const fn new(columns: u8, rows: u8) -> Self {
        Self { columns, rows }
    }
}

/// Height bounds in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeightHint {
    pub min_px: u16,
    pub max_px: Option<u16>,
}

impl HeightHint {
    const fn between(min_px: u16, max_px: u16) -> Self {
        Self {
            min_px,
            max_px: Some(max_px),
        }
    }

    const fn at_least(min_px: u16) -> Self {
        Self {
            min_px,
            max_px: None,
        }
    }
}

impl BlockSize {
    pub fn span(&self, mode: LayoutMode) -> GridSpan {
        match mode {
            LayoutMode::Editor => match self {
                BlockSize::Small | BlockSize::Medium => GridSpan::new(1, 1),
                BlockSize::Large | BlockSize::Wide => GridSpan::new(2, 1),
                BlockSize::Full => GridSpan::new(3, 1),
                BlockSize::Tall => GridSpan::new(1, 2),
                BlockSize::Hero => GridSpan::new(3, 2),
            },
            LayoutMode::Viewer => match self {
                BlockSize::Small | BlockSize::Tall => GridSpan::new(1, 1),
                BlockSize::Medium | BlockSize::Large => GridSpan::new(2, 1),
                BlockSize::Full | BlockSize::Wide | BlockSize::Hero => GridSpan::new(3, 1),
            },
            LayoutMode::Compact => match self {
                BlockSize::Full | BlockSize::Wide | BlockSize::Hero | BlockSize::Large => {
                    GridSpan::new(2, 1)
                }
                BlockSize::Small | BlockSize::Medium | BlockSize::Tall => GridSpan::new(1, 1),
            },
        }
    }

    /// Height bounds; the editor grid sizes rows itself.
    pub fn height_hint(&self, mode: LayoutMode) -> Option<HeightHint> {
        match mode {
            LayoutMode::Editor => None,
            LayoutMode::Viewer => Some(match self {
                BlockSize::Small => HeightHint::between(160, 200),
                BlockSize::Medium => HeightHint::between(180, 240),
                BlockSize::Large => HeightHint::between(280, 360),
                BlockSize::Tall => HeightHint::between(320, 400),
                BlockSize::Full | BlockSize::Wide => HeightHint::between(160, 220),
                BlockSize::Hero => HeightHint::between(300, 400),
            }),
            LayoutMode::Compact => Some(match self {
                BlockSize::Small | BlockSize::Full | BlockSize::Wide => HeightHint::at_least(120),
                BlockSize::Medium => HeightHint::at_least(140),
                BlockSize::Large | BlockSize::Hero => HeightHint::at_least(200),
                BlockSize::Tall => HeightHint::at_least(240),
            }),
        }
    }
}
