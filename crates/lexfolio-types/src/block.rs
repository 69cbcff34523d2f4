//! Profile blocks and their closed enumerations.
//!
//! ## Design: style as a sum type
//!
//! On the wire a block carries three flat style fields (`stylePreset`,
//! `customBgColor`, `customTextColor`) and custom colors may only coexist with
//! the `custom` preset. In memory that rule is structural: [`BlockStyle`] is
//! either a named [`StylePreset`] or `Custom { .. }`, so there is no state in
//! which a named preset carries dangling custom colors.
//!
//! The block's `type` is immutable after creation and its [`BlockContent`]
//! variant always matches it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::color::CustomBackground;
use crate::content::BlockContent;
use crate::error::{Result, TypeError};
use crate::ids::BlockId;

/// What a block *is*. Closed set, stored in SCREAMING case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum BlockType {
    /// Heading plus prose.
    Text,
    /// Single image.
    Media,
    /// Presentation video from the lawyer's profile.
    Video,
    /// Call-to-action button.
    Contact,
    /// Firm logo image.
    Logo,
    /// Office location from the lawyer's profile.
    Map,
    /// Key figures.
    Stats,
    Testimonials,
    Certifications,
    Social,
    Collaborators,
}

impl BlockType {
    /// Every block type, in dock order.
    pub const ALL: [BlockType; 11] = [
        BlockType::Text,
        BlockType::Media,
        BlockType::Video,
        BlockType::Contact,
        BlockType::Stats,
        BlockType::Testimonials,
        BlockType::Logo,
        BlockType::Map,
        BlockType::Certifications,
        BlockType::Social,
        BlockType::Collaborators,
    ];

    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Parse, naming the bad value on failure.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| TypeError::UnknownBlockType(s.to_string()))
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "TEXT",
            BlockType::Media => "MEDIA",
            BlockType::Video => "VIDEO",
            BlockType::Contact => "CONTACT",
            BlockType::Logo => "LOGO",
            BlockType::Map => "MAP",
            BlockType::Stats => "STATS",
            BlockType::Testimonials => "TESTIMONIALS",
            BlockType::Certifications => "CERTIFICATIONS",
            BlockType::Social => "SOCIAL",
            BlockType::Collaborators => "COLLABORATORS",
        }
    }

    /// Human label for palettes and placeholders.
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Text => "Text",
            BlockType::Media => "Image",
            BlockType::Video => "Video",
            BlockType::Contact => "Contact",
            BlockType::Logo => "Logo",
            BlockType::Map => "Map",
            BlockType::Stats => "Statistics",
            BlockType::Testimonials => "Testimonials",
            BlockType::Certifications => "Certifications",
            BlockType::Social => "Social links",
            BlockType::Collaborators => "Team",
        }
    }

    pub fn category(&self) -> DockCategory {
        match self {
            BlockType::Text | BlockType::Media | BlockType::Video => DockCategory::Content,
            BlockType::Contact | BlockType::Stats | BlockType::Testimonials => {
                DockCategory::Engagement
            }
            BlockType::Logo
            | BlockType::Map
            | BlockType::Certifications
            | BlockType::Social
            | BlockType::Collaborators => DockCategory::Branding,
        }
    }

    /// VIDEO and MAP render data derived from the lawyer's profile.
    pub fn carries_content(&self) -> bool {
        !matches!(self, BlockType::Video | BlockType::Map)
    }

    /// Content stored as a JSON document rather than plain text or a URL.
    pub fn has_structured_content(&self) -> bool {
        matches!(
            self,
            BlockType::Contact
                | BlockType::Stats
                | BlockType::Testimonials
                | BlockType::Certifications
                | BlockType::Social
                | BlockType::Collaborators
        )
    }

    /// Types that paint their own surface regardless of preset.
    pub fn has_inherent_styling(&self) -> bool {
        matches!(self, BlockType::Stats | BlockType::Map | BlockType::Video)
    }

    /// Size given to a freshly added block.
    pub fn default_size(&self) -> BlockSize {
        BlockSize::Medium
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grouping of block types in the add-block dock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockCategory {
    Content,
    Engagement,
    Branding,
}

impl DockCategory {
    pub const ALL: [DockCategory; 3] = [
        DockCategory::Content,
        DockCategory::Engagement,
        DockCategory::Branding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DockCategory::Content => "content",
            DockCategory::Engagement => "engagement",
            DockCategory::Branding => "branding",
        }
    }

    /// Block types in this category, in dock order.
    pub fn block_types(&self) -> impl Iterator<Item = BlockType> + '_ {
        BlockType::ALL
            .into_iter()
            .filter(move |t| t.category() == *self)
    }
}

impl std::fmt::Display for DockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Footprint of a block in the profile grid.
///
/// `square`, written by an older client, is not a size here: such blocks load
/// as rejected and are saved back untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum BlockSize {
    Small,
    #[default]
    Medium,
    Large,
    Full,
    Tall,
    Wide,
    /// Only produced by templates; renderable but not offered in the panel.
    Hero,
}

impl BlockSize {
    pub const ALL: [BlockSize; 7] = [
        BlockSize::Small,
        BlockSize::Medium,
        BlockSize::Large,
        BlockSize::Full,
        BlockSize::Tall,
        BlockSize::Wide,
        BlockSize::Hero,
    ];

    /// Sizes offered by the edit panel.
    pub const SELECTABLE: [BlockSize; 6] = [
        BlockSize::Small,
        BlockSize::Medium,
        BlockSize::Large,
        BlockSize::Full,
        BlockSize::Tall,
        BlockSize::Wide,
    ];

    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Parse, naming the bad value on failure.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| TypeError::UnknownSize(s.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockSize::Small => "small",
            BlockSize::Medium => "medium",
            BlockSize::Large => "large",
            BlockSize::Full => "full",
            BlockSize::Tall => "tall",
            BlockSize::Wide => "wide",
            BlockSize::Hero => "hero",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlockSize::Small => "Small",
            BlockSize::Medium => "Medium",
            BlockSize::Large => "Large",
            BlockSize::Full => "Full width",
            BlockSize::Tall => "Tall",
            BlockSize::Wide => "Wide",
            BlockSize::Hero => "Hero",
        }
    }

    pub fn is_selectable(&self) -> bool {
        !matches!(self, BlockSize::Hero)
    }
}

impl std::fmt::Display for BlockSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named color scheme. `custom` is not a preset; see [`BlockStyle::Custom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum StylePreset {
    /// White or near-white surface.
    #[default]
    Clean,
    /// Warm off-white.
    Cream,
    /// Translucent blurred surface.
    Glass,
    /// Accent-tinted surface, light text.
    Primary,
    /// Near-black surface, white text.
    Dark,
}

impl StylePreset {
    pub const ALL: [StylePreset; 5] = [
        StylePreset::Clean,
        StylePreset::Cream,
        StylePreset::Glass,
        StylePreset::Primary,
        StylePreset::Dark,
    ];

    /// Wire name of the custom pseudo-preset.
    pub const CUSTOM: &'static str = "custom";

    /// Parse from string (case-insensitive). `custom` is not a preset.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StylePreset::Clean => "clean",
            StylePreset::Cream => "cream",
            StylePreset::Glass => "glass",
            StylePreset::Primary => "primary",
            StylePreset::Dark => "dark",
        }
    }
}

impl std::fmt::Display for StylePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text color choice for custom backgrounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum TextColorMode {
    /// Force white.
    Light,
    /// Force near-black.
    Dark,
    /// Pick by background luminance.
    #[default]
    Auto,
}

impl TextColorMode {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| TypeError::UnknownTextColor(s.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextColorMode::Light => "light",
            TextColorMode::Dark => "dark",
            TextColorMode::Auto => "auto",
        }
    }
}

impl std::fmt::Display for TextColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a block is colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockStyle {
    Preset(StylePreset),
    /// Custom colors. `background` is `None` between choosing "custom" and
    /// picking a color.
    Custom {
        background: Option<CustomBackground>,
        text: TextColorMode,
    },
}

impl Default for BlockStyle {
    fn default() -> Self {
        BlockStyle::Preset(StylePreset::Clean)
    }
}

impl BlockStyle {
    pub fn custom(background: CustomBackground, text: TextColorMode) -> Self {
        BlockStyle::Custom {
            background: Some(background),
            text,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, BlockStyle::Custom { .. })
    }

    /// Wire `stylePreset` value.
    pub fn preset_name(&self) -> &'static str {
        match self {
            BlockStyle::Preset(p) => p.as_str(),
            BlockStyle::Custom { .. } => StylePreset::CUSTOM,
        }
    }

    /// Wire `customBgColor`, present only for custom styles with a background.
    pub fn custom_bg_color(&self) -> Option<String> {
        match self {
            BlockStyle::Custom {
                background: Some(bg),
                ..
            } => Some(bg.encode()),
            _ => None,
        }
    }

    /// Wire `customTextColor`, present only for custom styles.
    pub fn custom_text_color(&self) -> Option<TextColorMode> {
        match self {
            BlockStyle::Custom { text, .. } => Some(*text),
            BlockStyle::Preset(_) => None,
        }
    }

    /// Rebuild from the three flat wire fields.
    ///
    /// A missing preset means `clean`. Custom fields next to a named preset are
    /// dropped. An unreadable custom color degrades to "no background yet"
    /// rather than rejecting the block.
    pub fn from_wire(
        preset: Option<&str>,
        custom_bg: Option<&str>,
        custom_text: Option<&str>,
    ) -> Result<Self> {
        let preset = preset.map(str::trim).filter(|p| !p.is_empty());
        match preset {
            None => Ok(BlockStyle::default()),
            Some(p) if p.eq_ignore_ascii_case(StylePreset::CUSTOM) => {
                let background = custom_bg
                    .filter(|s| !s.trim().is_empty())
                    .and_then(|s| match CustomBackground::parse(s) {
                        Ok(bg) => Some(bg),
                        Err(e) => {
                            tracing::warn!(value = s, error = %e, "ignoring unreadable custom background");
                            None
                        }
                    });
                let text = custom_text
                    .and_then(TextColorMode::from_str)
                    .unwrap_or_default();
                Ok(BlockStyle::Custom { background, text })
            }
            Some(p) => StylePreset::from_str(p)
                .map(BlockStyle::Preset)
                .ok_or_else(|| TypeError::UnknownPreset(p.to_string())),
        }
    }
}

/// One unit on a lawyer's profile page.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileBlock {
    pub id: BlockId,
    block_type: BlockType,
    /// Position in the sequence. Only authoritative right after a save or a
    /// template application; array position wins in between.
    pub order: u32,
    pub size: BlockSize,
    /// Heading for TEXT, button label for CONTACT.
    pub title: Option<String>,
    content: BlockContent,
    pub style: BlockStyle,
}

impl ProfileBlock {
    /// A fresh block with the type's default size, the `clean` preset, and an
    /// empty payload.
    pub fn new(block_type: BlockType, order: u32) -> Self {
        Self {
            id: BlockId::new(),
            block_type,
            order,
            size: block_type.default_size(),
            title: None,
            content: BlockContent::empty_for(block_type),
            style: BlockStyle::default(),
        }
    }

    pub fn builder(block_type: BlockType) -> ProfileBlockBuilder {
        ProfileBlockBuilder::new(block_type)
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    /// Mutable access to the payload. Variant changes are rejected by
    /// [`ProfileBlock::set_content`]; mutate through the typed accessors.
    pub fn content_mut(&mut self) -> &mut BlockContent {
        &mut self.content
    }

    /// Title and payload borrowed together, for editors that touch both.
    pub fn title_and_content_mut(&mut self) -> (&mut Option<String>, &mut BlockContent) {
        (&mut self.title, &mut self.content)
    }

    /// Replace the payload wholesale. The variant must match the block type.
    pub fn set_content(&mut self, content: BlockContent) -> Result<()> {
        if !content.fits(self.block_type) {
            return Err(TypeError::ContentMismatch {
                kind: content.kind_name(),
                block_type: self.block_type,
            });
        }
        self.content = content;
        Ok(())
    }

    /// Copy with a freshly minted id; everything else is preserved.
    pub fn clone_with_fresh_id(&self) -> Self {
        Self {
            id: BlockId::new(),
            ..self.clone()
        }
    }

    /// Title, or the type label when blank.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(self.block_type.label())
    }

    /// Assemble from already-validated parts. Content is replaced by the
    /// type's empty default when it does not fit.
    pub(crate) fn from_parts(
        id: BlockId,
        block_type: BlockType,
        order: u32,
        size: BlockSize,
        title: Option<String>,
        content: BlockContent,
        style: BlockStyle,
    ) -> Self {
        let content = if content.fits(block_type) {
            content
        } else {
            BlockContent::empty_for(block_type)
        };
        Self {
            id,
            block_type,
            order,
            size,
            title,
            content,
            style,
        }
    }
}

/// Builder for [`ProfileBlock`], used by templates and starter sets.
#[derive(Clone, Debug)]
pub struct ProfileBlockBuilder {
    id: Option<BlockId>,
    block_type: BlockType,
    order: u32,
    size: Option<BlockSize>,
    title: Option<String>,
    content: Option<BlockContent>,
    style: BlockStyle,
}

impl ProfileBlockBuilder {
    pub fn new(block_type: BlockType) -> Self {
        Self {
            id: None,
            block_type,
            order: 0,
            size: None,
            title: None,
            content: None,
            style: BlockStyle::default(),
        }
    }

    pub fn id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn size(mut self, size: BlockSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Payload. Ignored when it does not fit the block type.
    pub fn content(mut self, content: BlockContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Plain-text payload, for TEXT and image types.
    pub fn text(self, text: impl Into<String>) -> Self {
        let block_type = self.block_type;
        let text = text.into();
        let content = match block_type {
            BlockType::Media | BlockType::Logo => BlockContent::Image(text),
            _ => BlockContent::Text(text),
        };
        self.content(content)
    }

    pub fn preset(mut self, preset: StylePreset) -> Self {
        self.style = BlockStyle::Preset(preset);
        self
    }

    pub fn style(mut self, style: BlockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn build(self) -> ProfileBlock {
        ProfileBlock::from_parts(
            self.id.unwrap_or_default(),
            self.block_type,
            self.order,
            self.size.unwrap_or_else(|| self.block_type.default_size()),
            self.title,
            self.content
                .unwrap_or_else(|| BlockContent::empty_for(self.block_type)),
            self.style,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
