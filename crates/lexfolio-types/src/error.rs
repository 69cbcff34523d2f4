//! Error types for block model conversions.

use crate::block::BlockType;
use crate::content::SocialPlatform;
use crate::ids::EntryId;

/// Errors from parsing wire values into the typed block model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Block type outside the closed set.
    #[error("unknown block type '{0}'")]
    UnknownBlockType(String),

    /// Block size outside the closed set.
    #[error("unknown block size '{0}'")]
    UnknownSize(String),

    /// Style preset outside the closed set.
    #[error("unknown style preset '{0}'")]
    UnknownPreset(String),

    /// Text color mode outside light/dark/auto.
    #[error("unknown text color mode '{0}'")]
    UnknownTextColor(String),

    /// Not a `#RRGGBB` or `#RGB` color.
    #[error("invalid hex color '{0}'")]
    InvalidColor(String),

    /// A `gradient:` value without exactly two color stops.
    #[error("malformed gradient '{0}': expected gradient:<from>:<to>")]
    MalformedGradient(String),

    /// Rating outside 1..=5.
    #[error("rating {0} out of range 1..=5")]
    RatingOutOfRange(i64),

    /// Platform already has a link in this block.
    #[error("{0} is already linked")]
    PlatformAlreadyLinked(SocialPlatform),

    /// No list entry with this id.
    #[error("entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Payload variant does not belong to the block's type.
    #[error("{kind} content cannot be stored on a {block_type} block")]
    ContentMismatch {
        kind: &'static str,
        block_type: BlockType,
    },

    /// Stored record is not a block-shaped JSON object.
    #[error("malformed block record: {0}")]
    MalformedRecord(String),
}

/// Result type for block model operations.
pub type Result<T> = std::result::Result<T, TypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_bad_value() {
        assert_eq!(
            TypeError::UnknownSize("square".into()).to_string(),
            "unknown block size 'square'"
        );
        assert_eq!(
            TypeError::PlatformAlreadyLinked(SocialPlatform::Linkedin).to_string(),
            "linkedin is already linked"
        );
    }
}
