//! Hex colors and custom block backgrounds.
//!
//! A custom background is stored as a single string: either a hex color or
//! `gradient:<fromHex>:<toHex>`. Lightness uses perceived luminance
//! `(0.299 r + 0.587 g + 0.114 b) / 255`; a gradient is judged by its first stop.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};

/// Prefix marking a two-stop gradient in the stored background string.
pub const GRADIENT_PREFIX: &str = "gradient:";

/// Angle used for every rendered gradient, in degrees.
pub const GRADIENT_ANGLE_DEG: u16 = 135;

/// An opaque sRGB color written as `#RRGGBB`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::rgb(0xFF, 0xFF, 0xFF);
    pub const NEAR_BLACK: HexColor = HexColor::rgb(0x1A, 0x1A, 0x1A);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB`. The leading `#` is required.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| TypeError::InvalidColor(s.to_string()))?;
        if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidColor(s.to_string()));
        }
        let rgb: Srgb<u8> = trimmed
            .parse()
            .map_err(|_| TypeError::InvalidColor(s.to_string()))?;
        Ok(Self::rgb(rgb.red, rgb.green, rgb.blue))
    }

    /// Perceived luminance in `0.0..=1.0`.
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    pub fn is_light(&self) -> bool {
        self.luminance() > 0.5
    }

    /// Canonical uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> String {
        c.to_hex()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexColor({})", self.to_hex())
    }
}

/// Background chosen in the custom color picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CustomBackground {
    Solid(HexColor),
    /// Diagonal two-stop gradient.
    Gradient { from: HexColor, to: HexColor },
}

impl CustomBackground {
    /// Parse the stored form: a hex color, or `gradient:<from>:<to>`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(stops) = s.strip_prefix(GRADIENT_PREFIX) {
            let parts: Vec<&str> = stops.split(':').collect();
            let [from, to] = parts.as_slice() else {
                return Err(TypeError::MalformedGradient(s.to_string()));
            };
            return Ok(Self::Gradient {
                from: HexColor::parse(from)?,
                to: HexColor::parse(to)?,
            });
        }
        Ok(Self::Solid(HexColor::parse(s)?))
    }

    /// Stored form, inverse of [`CustomBackground::parse`].
    pub fn encode(&self) -> String {
        match self {
            Self::Solid(c) => c.to_hex(),
            Self::Gradient { from, to } => {
                format!("{}{}:{}", GRADIENT_PREFIX, from.to_hex(), to.to_hex())
            }
        }
    }

    /// The color that decides text contrast (first stop for gradients).
    pub fn dominant(&self) -> HexColor {
        match self {
            Self::Solid(c) => *c,
            Self::Gradient { from, .. } => *from,
        }
    }

    pub fn is_light(&self) -> bool {
        self.dominant().is_light()
    }

    /// CSS `background` value.
    pub fn css(&self) -> String {
        match self {
            Self::Solid(c) => c.to_hex(),
            Self::Gradient { from, to } => format!(
                "linear-gradient({}deg, {}, {})",
                GRADIENT_ANGLE_DEG,
                from.to_hex(),
                to.to_hex()
            ),
        }
    }
}

impl FromStr for CustomBackground {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CustomBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// A named gradient offered by the color picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradientSwatch {
    pub name: &'static str,
    pub from: HexColor,
    pub to: HexColor,
}

impl GradientSwatch {
    pub fn background(&self) -> CustomBackground {
        CustomBackground::Gradient {
            from: self.from,
            to: self.to,
        }
    }
}

/// Built-in gradient swatches, in picker order.
pub const GRADIENT_SWATCHES: [GradientSwatch; 6] = [
    GradientSwatch {
        name: "Bordeaux",
        from: HexColor::rgb(0x77, 0x07, 0x22),
        to: HexColor::rgb(0x99, 0x1B, 0x1B),
    },
    GradientSwatch {
        name: "Night",
        from: HexColor::rgb(0x1E, 0x3A, 0x5F),
        to: HexColor::rgb(0x33, 0x41, 0x55),
    },
    GradientSwatch {
        name: "Violet-Rose",
        from: HexColor::rgb(0x7C, 0x3A, 0xED),
        to: HexColor::rgb(0xEC, 0x48, 0x99),
    },
    GradientSwatch {
        name: "Emerald",
        from: HexColor::rgb(0x05, 0x96, 0x69),
        to: HexColor::rgb(0x10, 0xB9, 0x81),
    },
    GradientSwatch {
        name: "Gold",
        from: HexColor::rgb(0xF5, 0x9E, 0x0B),
        to: HexColor::rgb(0xFC, 0xD3, 0x4D),
    },
    GradientSwatch {
        name: "Blue-Violet",
        from: HexColor::rgb(0x3B, 0x82, 0xF6),
        to: HexColor::rgb(0x8B, 0x5C, 0xF6),
    },
];
