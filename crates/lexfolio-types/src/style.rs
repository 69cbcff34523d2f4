//! Style resolution: from a block's style to a concrete background and text tone.
//!
//! Named presets go through a fixed table. Custom styles use the picked
//! background; `auto` text picks white on dark backgrounds and near-black on
//! light ones.

use serde::{Deserialize, Serialize};

use crate::block::{BlockStyle, ProfileBlock, StylePreset, TextColorMode};
use crate::color::{CustomBackground, GRADIENT_ANGLE_DEG, HexColor};

/// Surface tone of a named preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    White,
    WarmOffWhite,
    /// Translucent, blurred.
    Translucent,
    Accent,
    NearBlack,
}

impl Surface {
    /// Representative CSS background.
    pub fn css(&self) -> &'static str {
        match self {
            Surface::White => "#FFFFFF",
            Surface::WarmOffWhite => "#FBF8F3",
            Surface::Translucent => "rgba(255, 255, 255, 0.6)",
            Surface::Accent => "linear-gradient(135deg, #770722, #991B1B)",
            Surface::NearBlack => "#0F1115",
        }
    }
}

/// Text color decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    /// White.
    Light,
    /// Near-black.
    Dark,
}

impl TextTone {
    pub fn color(&self) -> HexColor {
        match self {
            TextTone::Light => HexColor::WHITE,
            TextTone::Dark => HexColor::NEAR_BLACK,
        }
    }

    /// Readable tone over a background color.
    pub fn contrasting(bg: HexColor) -> Self {
        if bg.is_light() {
            TextTone::Dark
        } else {
            TextTone::Light
        }
    }
}

/// Concrete background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Background {
    Tone(Surface),
    Solid(HexColor),
    Gradient {
        from: HexColor,
        to: HexColor,
        angle_deg: u16,
    },
    /// Custom style chosen but no color picked yet.
    Unset,
}

impl Background {
    pub fn css(&self) -> Option<String> {
        match self {
            Background::Tone(surface) => Some(surface.css().to_string()),
            Background::Solid(c) => Some(c.to_hex()),
            Background::Gradient {
                from,
                to,
                angle_deg,
            } => Some(format!(
                "linear-gradient({}deg, {}, {})",
                angle_deg,
                from.to_hex(),
                to.to_hex()
            )),
            Background::Unset => None,
        }
    }
}

impl From<CustomBackground> for Background {
    fn from(bg: CustomBackground) -> Self {
        match bg {
            CustomBackground::Solid(c) => Background::Solid(c),
            CustomBackground::Gradient { from, to } => Background::Gradient {
                from,
                to,
                angle_deg: GRADIENT_ANGLE_DEG,
            },
        }
    }
}

/// Output of the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedStyle {
    pub background: Background,
    pub text: TextTone,
    /// Whether the surface reads as dark (for borders and icon tints).
    pub is_dark: bool,
    /// The block type paints its own surface; background is advisory.
    pub inherent: bool,
}

/// One row of the preset table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetSpec {
    pub preset: StylePreset,
    pub label: &'static str,
    pub surface: Surface,
    pub text: TextTone,
    pub is_dark: bool,
}

/// The fixed preset table, in picker order.
pub const PRESETS: [PresetSpec; 5] = [
    PresetSpec {
        preset: StylePreset::Clean,
        label: "Clean",
        surface: Surface::White,
        text: TextTone::Dark,
        is_dark: false,
    },
    PresetSpec {
        preset: StylePreset::Cream,
        label: "Cream",
        surface: Surface::WarmOffWhite,
        text: TextTone::Dark,
        is_dark: false,
    },
    PresetSpec {
        preset: StylePreset::Glass,
        label: "Glass",
        surface: Surface::Translucent,
        text: TextTone::Dark,
        is_dark: false,
    },
    PresetSpec {
        preset: StylePreset::Primary,
        label: "Primary",
        surface: Surface::Accent,
        text: TextTone::Light,
        is_dark: true,
    },
    PresetSpec {
        preset: StylePreset::Dark,
        label: "Dark",
        surface: Surface::NearBlack,
        text: TextTone::Light,
        is_dark: true,
    },
];

impl StylePreset {
    pub fn spec(&self) -> &'static PresetSpec {
        match self {
            StylePreset::Clean => &PRESETS[0],
            StylePreset::Cream => &PRESETS[1],
            StylePreset::Glass => &PRESETS[2],
            StylePreset::Primary => &PRESETS[3],
            StylePreset::Dark => &PRESETS[4],
        }
    }
}

/// Resolve a style on its own.
pub fn resolve(style: &BlockStyle) -> ResolvedStyle {
    match style {
        BlockStyle::Preset(preset) => {
            let spec = preset.spec();
            ResolvedStyle {
                background: Background::Tone(spec.surface),
                text: spec.text,
                is_dark: spec.is_dark,
                inherent: false,
            }
        }
        BlockStyle::Custom { background, text } => {
            let bg_is_light = background.map(|bg| bg.is_light());
            let tone = match text {
                TextColorMode::Light => TextTone::Light,
                TextColorMode::Dark => TextTone::Dark,
                TextColorMode::Auto => background
                    .map(|bg| TextTone::contrasting(bg.dominant()))
                    .unwrap_or(TextTone::Dark),
            };
            ResolvedStyle {
                background: background.map(Background::from).unwrap_or(Background::Unset),
                text: tone,
                is_dark: bg_is_light == Some(false),
                inherent: false,
            }
        }
    }
}

/// Resolve a block, marking types that paint their own surface.
pub fn resolve_block(block: &ProfileBlock) -> ResolvedStyle {
    ResolvedStyle {
        inherent: block.block_type().has_inherent_styling(),
        ..resolve(&block.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;

    #[test]
    fn test_preset_table_matches_enum() {
        for (spec, preset) in PRESETS.iter().zip(StylePreset::ALL) {
            assert_eq!(spec.preset, preset);
            assert_eq!(preset.spec().preset, preset);
        }
    }

    #[test]
    fn test_named_presets() {
        let dark = resolve(&BlockStyle::Preset(StylePreset::Dark));
        assert_eq!(dark.background, Background::Tone(Surface::NearBlack));
        assert_eq!(dark.text, TextTone::Light);
        assert!(dark.is_dark);

        let clean = resolve(&BlockStyle::Preset(StylePreset::Clean));
        assert_eq!(clean.background, Background::Tone(Surface::White));
        assert_eq!(clean.text, TextTone::Dark);

        let cream = resolve(&BlockStyle::Preset(StylePreset::Cream));
        assert_eq!(cream.background, Background::Tone(Surface::WarmOffWhite));

        let glass = resolve(&BlockStyle::Preset(StylePreset::Glass));
        assert_eq!(glass.background, Background::Tone(Surface::Translucent));

        let primary = resolve(&BlockStyle::Preset(StylePreset::Primary));
        assert_eq!(primary.background, Background::Tone(Surface::Accent));
        assert_eq!(primary.text, TextTone::Light);
    }

    #[test]
    fn test_custom_gradient_auto_text() {
        let style = BlockStyle::custom(
            CustomBackground::parse("gradient:#F59E0B:#FCD34D").unwrap(),
            TextColorMode::Auto,
        );
        let resolved = resolve(&style);
        assert_eq!(resolved.text, TextTone::Dark);
        assert_eq!(
            resolved.background.css().as_deref(),
            Some("linear-gradient(135deg, #F59E0B, #FCD34D)")
        );

        let style = BlockStyle::custom(
            CustomBackground::parse("#1E3A5F").unwrap(),
            TextColorMode::Auto,
        );
        let resolved = resolve(&style);
        assert_eq!(resolved.text, TextTone::Light);
        assert!(resolved.is_dark);
    }

    #[test]
    fn test_custom_forced_text_overrides_luminance() {
        let bg = CustomBackground::Solid(HexColor::WHITE);
        assert_eq!(
            resolve(&BlockStyle::custom(bg, TextColorMode::Light)).text,
            TextTone::Light
        );
        let bg = CustomBackground::Solid(HexColor::NEAR_BLACK);
        assert_eq!(
            resolve(&BlockStyle::custom(bg, TextColorMode::Dark)).text,
            TextTone::Dark
        );
    }

    #[test]
    fn test_custom_without_background() {
        let resolved = resolve(&BlockStyle::Custom {
            background: None,
            text: TextColorMode::Auto,
        });
        assert_eq!(resolved.background, Background::Unset);
        assert_eq!(resolved.background.css(), None);
        assert_eq!(resolved.text, TextTone::Dark);
    }

    #[test]
    fn test_inherent_styling_types() {
        let stats = ProfileBlock::new(BlockType::Stats, 0);
        assert!(resolve_block(&stats).inherent);
        let text = ProfileBlock::new(BlockType::Text, 0);
        assert!(!resolve_block(&text).inherent);
    }
}
