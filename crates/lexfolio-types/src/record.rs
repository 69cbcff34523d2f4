//! Persisted wire shape of a block, and tolerant decoding of stored profiles.
//!
//! Stored profiles are JSON arrays of flat camelCase objects. Each element is
//! decoded on its own: one block with an unknown `type` or `size` becomes a
//! [`RejectedBlock`] carrying its raw JSON, and the rest still load.

use serde::{Deserialize, Serialize};

use crate::block::{BlockSize, BlockStyle, BlockType, ProfileBlock};
use crate::content::BlockContent;
use crate::error::{Result, TypeError};
use crate::ids::BlockId;

/// A block exactly as stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBlockRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub block_type: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text_color: Option<String>,
}

impl From<&ProfileBlock> for ProfileBlockRecord {
    fn from(block: &ProfileBlock) -> Self {
        Self {
            id: block.id.to_string(),
            block_type: block.block_type().as_str().to_string(),
            order: block.order as i64,
            size: block.size.as_str().to_string(),
            title: block.title.clone(),
            content: block.content().encode(),
            style_preset: Some(block.style.preset_name().to_string()),
            custom_bg_color: block.style.custom_bg_color(),
            custom_text_color: block.style.custom_text_color().map(|t| t.as_str().to_string()),
        }
    }
}

impl From<ProfileBlock> for ProfileBlockRecord {
    fn from(block: ProfileBlock) -> Self {
        Self::from(&block)
    }
}

impl TryFrom<&ProfileBlockRecord> for ProfileBlock {
    type Error = TypeError;

    fn try_from(record: &ProfileBlockRecord) -> Result<Self> {
        let block_type = BlockType::parse(&record.block_type)?;
        let size = BlockSize::parse(&record.size)?;
        let style = BlockStyle::from_wire(
            record.style_preset.as_deref(),
            record.custom_bg_color.as_deref(),
            record.custom_text_color.as_deref(),
        )?;
        let id = if record.id.trim().is_empty() {
            let fresh = BlockId::new();
            tracing::debug!(%fresh, "stored block had no id, minted one");
            fresh
        } else {
            BlockId::from_raw(record.id.clone())
        };
        Ok(ProfileBlock::from_parts(
            id,
            block_type,
            record.order.clamp(0, u32::MAX as i64) as u32,
            size,
            record.title.clone(),
            BlockContent::decode(block_type, record.content.as_deref()),
            style,
        ))
    }
}

impl TryFrom<ProfileBlockRecord> for ProfileBlock {
    type Error = TypeError;

    fn try_from(record: ProfileBlockRecord) -> Result<Self> {
        ProfileBlock::try_from(&record)
    }
}

// ProfileBlock travels as its record inside templates and exports.
impl Serialize for ProfileBlock {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        ProfileBlockRecord::from(self).serialize(s)
    }
}

impl<'de> Deserialize<'de> for ProfileBlock {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let record = ProfileBlockRecord::deserialize(d)?;
        ProfileBlock::try_from(&record).map_err(serde::de::Error::custom)
    }
}

/// A stored block that could not be loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectedBlock {
    /// The element as stored, written back unchanged apart from `order`.
    pub raw: serde_json::Value,
    /// Stored id, when one could be read.
    pub id: Option<String>,
    /// Stored position within the original array.
    pub position: usize,
    pub reason: TypeError,
}

impl RejectedBlock {
    /// Copy of the raw element with `order` replaced.
    pub fn with_order(&self, order: usize) -> serde_json::Value {
        let mut raw = self.raw.clone();
        if let Some(obj) = raw.as_object_mut() {
            obj.insert("order".to_string(), serde_json::Value::from(order as u64));
        }
        raw
    }
}

/// Outcome of decoding a stored profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedProfile {
    /// Loaded blocks, in stored array order.
    pub blocks: Vec<ProfileBlock>,
    pub rejected: Vec<RejectedBlock>,
}

/// Decode each element of a stored profile array independently.
pub fn decode_profile(values: Vec<serde_json::Value>) -> DecodedProfile {
    let mut out = DecodedProfile::default();
    for (position, raw) in values.into_iter().enumerate() {
        let id = raw
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let parsed = serde_json::from_value::<ProfileBlockRecord>(raw.clone())
            .map_err(|e| TypeError::MalformedRecord(e.to_string()))
            .and_then(|record| ProfileBlock::try_from(&record));
        match parsed {
            Ok(block) => out.blocks.push(block),
            Err(reason) => {
                tracing::warn!(position, id = ?id, %reason, "rejecting stored block");
                out.rejected.push(RejectedBlock {
                    raw,
                    id,
                    position,
                    reason,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{StylePreset, TextColorMode};
    use crate::color::{CustomBackground, HexColor};
    use crate::content::ContactConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_record_shape_is_camel_case() {
        let block = ProfileBlock::builder(BlockType::Contact)
            .id("b1")
            .order(2)
            .size(BlockSize::Small)
            .title("Book an appointment")
            .style(BlockStyle::custom(
                CustomBackground::Solid(HexColor::rgb(0x11, 0x22, 0x33)),
                TextColorMode::Light,
            ))
            .build();
        let value = serde_json::to_value(ProfileBlockRecord::from(&block)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "b1",
                "type": "CONTACT",
                "order": 2,
                "size": "small",
                "title": "Book an appointment",
                "content": "{\"style\":\"primary\",\"action\":\"book\"}",
                "stylePreset": "custom",
                "customBgColor": "#112233",
                "customTextColor": "light",
            })
        );
    }

    #[test]
    fn test_named_preset_writes_no_custom_fields() {
        let block = ProfileBlock::builder(BlockType::Text)
            .preset(StylePreset::Dark)
            .build();
        let record = ProfileBlockRecord::from(&block);
        assert_eq!(record.style_preset.as_deref(), Some("dark"));
        assert_eq!(record.custom_bg_color, None);
        assert_eq!(record.custom_text_color, None);
    }

    #[test]
    fn test_block_serde_round_trip() {
        let block = ProfileBlock::builder(BlockType::Contact)
            .id("c1")
            .title("Call me")
            .content(BlockContent::Contact(ContactConfig::default()))
            .build();
        let json = serde_json::to_string(&block).unwrap();
        let back: ProfileBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_missing_style_preset_is_clean() {
        let record = ProfileBlockRecord {
            id: "x".into(),
            block_type: "TEXT".into(),
            size: "large".into(),
            ..Default::default()
        };
        let block = ProfileBlock::try_from(&record).unwrap();
        assert_eq!(block.style, BlockStyle::Preset(StylePreset::Clean));
    }

    #[test]
    fn test_decode_profile_isolates_bad_blocks() {
        let decoded = decode_profile(vec![
            json!({"id": "a", "type": "TEXT", "order": 0, "size": "medium", "content": "hi"}),
            json!({"id": "b", "type": "TEXT", "order": 1, "size": "square"}),
            json!({"id": "c", "type": "GALLERY", "order": 2, "size": "small"}),
            json!("not an object"),
            json!({"id": "e", "type": "MAP", "order": 4, "size": "wide"}),
        ]);
        let ids: Vec<&str> = decoded.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        assert_eq!(decoded.rejected.len(), 3);
        assert_eq!(
            decoded.rejected[0].reason,
            TypeError::UnknownSize("square".into())
        );
        assert_eq!(
            decoded.rejected[1].reason,
            TypeError::UnknownBlockType("GALLERY".into())
        );
        assert!(matches!(decoded.rejected[2].reason, TypeError::MalformedRecord(_)));
        assert_eq!(decoded.rejected[2].id, None);
        assert_eq!(decoded.rejected[2].position, 3);
    }

    #[test]
    fn test_rejected_block_rewrites_only_order() {
        let raw = json!({"id": "b", "type": "TEXT", "order": 7, "size": "square", "extra": true});
        let rejected = RejectedBlock {
            raw,
            id: Some("b".into()),
            position: 0,
            reason: TypeError::UnknownSize("square".into()),
        };
        assert_eq!(
            rejected.with_order(3),
            json!({"id": "b", "type": "TEXT", "order": 3, "size": "square", "extra": true})
        );
    }

    #[test]
    fn test_corrupt_content_loads_with_default() {
        let decoded = decode_profile(vec![json!({
            "id": "s", "type": "STATS", "order": 0, "size": "medium", "content": "{oops"
        })]);
        assert!(decoded.rejected.is_empty());
        assert_eq!(
            decoded.blocks[0].content(),
            &BlockContent::empty_for(BlockType::Stats)
        );
    }
}
