//! Shared block and template types for Lexfolio.
//!
//! This crate is the data foundation of the profile builder: typed IDs, the
//! block model, per-type content payloads, style and size resolution, and the
//! compiled-in templates. It performs **no I/O**: persistence and editing
//! state live in `lexfolio-builder`.
//!
//! # Entity Overview
//!
//! ```text
//! Lawyer (LawyerId) ← owner of a public profile page
//!     └── ordered ProfileBlock[] (BlockId, order 0..N-1)
//!           └── BlockType   ← immutable after creation
//!           └── BlockSize   ← grid footprint
//!           └── BlockStyle  ← named preset or custom colors
//!           └── BlockContent ← typed payload, JSON only at the storage edge
//!                 └── list entries (EntryId) for list-shaped types
//!
//! ProfileTemplate (TemplateId) ← named ordered block configuration
//!     └── built-in (compiled in, immutable) or custom (created_by)
//! ```
//!
//! # Key Types
//!
//! |-----------------------|-----------------------------------------------|
//! | Type                  | Purpose                                       |
//! |-----------------------|-----------------------------------------------|
//! | [`ProfileBlock`]      | One unit on a profile page                    |
//! | [`ProfileBlockRecord`]| Persisted wire shape (flat, camelCase JSON)   |
//! | [`BlockContent`]      | Tagged union of per-type payloads             |
//! | [`BlockStyle`]        | Preset name or custom background + text mode |
//! | [`ResolvedStyle`]     | Concrete background and text tone             |
//! | [`GridSpan`]          | Column × row footprint for a layout mode      |
//! | [`ProfileTemplate`]   | Reusable ordered block configuration          |
//! | [`BlockId`]           | Opaque block identity                         |
//! | [`EntryId`]           | Identity of an entry inside a list payload    |
//! |-----------------------|-----------------------------------------------|

pub mod block;
pub mod color;
pub mod content;
pub mod error;
pub mod ids;
pub mod layout;
pub mod record;
pub mod style;
pub mod template;

// Re-export primary types at crate root for convenience.
pub use block::{
    BlockSize, BlockStyle, BlockType, DockCategory, ProfileBlock, ProfileBlockBuilder,
    StylePreset, TextColorMode,
};
pub use color::{CustomBackground, GRADIENT_SWATCHES, GradientSwatch, HexColor};
pub use content::{
    BlockContent, Certification, Collaborator, ContactAction, ContactConfig, ContactStyle,
    DEFAULT_CONTACT_LABEL, EntryList, LOCAL_PREVIEW_SCHEME, ListEntry, Rating, SocialLink,
    SocialLinks, SocialPlatform, StatField, Stats, Testimonial, parse_stat_input,
};
pub use error::{Result, TypeError};
pub use ids::{BlockId, EntryId, LawyerId, TemplateId};
pub use layout::{GridSpan, HeightHint, LayoutMode};
pub use record::{DecodedProfile, ProfileBlockRecord, RejectedBlock, decode_profile};
pub use style::{
    Background, PRESETS, PresetSpec, ResolvedStyle, Surface, TextTone, resolve, resolve_block,
};
pub use template::{DEFAULT_TEMPLATE_DESCRIPTION, ProfileTemplate, default_templates};

use chrono::Datelike;

/// Current time as Unix milliseconds. Used by constructors throughout the crate.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Current calendar year (UTC), used as the default certification year.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}
