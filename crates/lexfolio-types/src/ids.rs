//! Typed identifiers for blocks, templates, list entries, and lawyers.
//!
//! IDs are opaque strings on the wire. Stored profiles carry IDs minted by
//! earlier clients (`t1-b1`, `block-1700000000000-x3k9a2`), so parsing never
//! rejects a non-empty string. Freshly minted IDs are a kind prefix plus a
//! UUIDv7 in simple hex, which keeps them time-ordered and never equal across
//! kinds.
//!
//! The `short()` form (last 8 chars) is for human-facing output only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A block identifier. Minted IDs start with `blk-`.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

/// A template identifier. Minted IDs start with `tpl-`.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

/// Identity of one entry inside a list-shaped payload. Minted IDs start with `ent-`.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

/// The lawyer owning a profile. Assigned by the surrounding application.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LawyerId(String);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_string_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Wrap an existing identifier verbatim.
            pub fn from_raw(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Last 8 characters, for human display only. Not for lookup.
            pub fn short(&self) -> &str {
                let start = self
                    .0
                    .char_indices()
                    .rev()
                    .nth(7)
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                &self.0[start..]
            }

            /// Check if a query string matches this ID by prefix.
            pub fn matches_prefix(&self, prefix: &str) -> bool {
                self.0.starts_with(prefix)
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $T {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $T {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<$T> for String {
            fn from(id: $T) -> String {
                id.0
            }
        }

        impl AsRef<str> for $T {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.0)
            }
        }
    };
    ($T:ident, $name:literal, $prefix:literal) => {
        impl_string_id!($T, $name);

        impl $T {
            /// Prefix carried by freshly minted IDs of this kind.
            pub const PREFIX: &'static str = $prefix;

            /// Mint a new time-ordered ID.
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, uuid::Uuid::now_v7().as_simple()))
            }

            /// Whether this ID was minted here rather than loaded from legacy data.
            pub fn is_minted(&self) -> bool {
                self.0.starts_with($prefix)
            }
        }

        impl Default for $T {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

impl_string_id!(BlockId, "BlockId", "blk-");
impl_string_id!(TemplateId, "TemplateId", "tpl-");
impl_string_id!(EntryId, "EntryId", "ent-");
impl_string_id!(LawyerId, "LawyerId");

// ============================================================================
// Tests
// ============================================================================
