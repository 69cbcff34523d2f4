//! Typed block payloads and their storage codec.
//!
//! Storage keeps a block's payload as one optional string: prose for TEXT, a
//! URL for MEDIA/LOGO, a JSON document for structured types, nothing for
//! VIDEO/MAP. In memory the payload is [`BlockContent`], a tagged union keyed
//! by block type. [`BlockContent::decode`] and [`BlockContent::encode`] are the
//! only places that touch the string form.
//!
//! Decoding never fails. Malformed or empty JSON yields the type's empty
//! default and a `debug!` line. A few shapes written by older clients are
//! still understood:
//!
//! | Type           | Older shape                                   |
//! |----------------|-----------------------------------------------|
//! | STATS          | `{"years": "15", "cases": "500+", "success": "95%"}` |
//! | TESTIMONIALS   | single `{"text", "author", "rating"}` object  |
//! | CERTIFICATIONS | array of plain names                          |
//! | SOCIAL         | `{"linkedin": url, ...}` platform map         |

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use strum::EnumString;

use crate::block::BlockType;
use crate::error::{Result, TypeError};
use crate::ids::EntryId;

/// Button label used when a CONTACT block has no title.
pub const DEFAULT_CONTACT_LABEL: &str = "Contact me";

/// URL scheme of a local preview that has not been uploaded yet.
pub const LOCAL_PREVIEW_SCHEME: &str = "blob:";

// ── Block payload ───────────────────────────────────────────────────────────

/// A block's payload, keyed by block type.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockContent {
    /// TEXT: plain prose.
    Text(String),
    /// MEDIA and LOGO: image URL, possibly a local preview.
    Image(String),
    Contact(ContactConfig),
    Stats(Stats),
    Testimonials(EntryList<Testimonial>),
    Certifications(EntryList<Certification>),
    Social(SocialLinks),
    Collaborators(EntryList<Collaborator>),
    /// VIDEO and MAP: rendered from the lawyer's own profile data.
    Derived,
}

impl BlockContent {
    /// The empty payload for a block type.
    pub fn empty_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => BlockContent::Text(String::new()),
            BlockType::Media | BlockType::Logo => BlockContent::Image(String::new()),
            BlockType::Video | BlockType::Map => BlockContent::Derived,
            BlockType::Contact => BlockContent::Contact(ContactConfig::default()),
            BlockType::Stats => BlockContent::Stats(Stats::default()),
            BlockType::Testimonials => BlockContent::Testimonials(EntryList::new()),
            BlockType::Certifications => BlockContent::Certifications(EntryList::new()),
            BlockType::Social => BlockContent::Social(SocialLinks::default()),
            BlockType::Collaborators => BlockContent::Collaborators(EntryList::new()),
        }
    }

    /// Whether this variant belongs on a block of `block_type`.
    pub fn fits(&self, block_type: BlockType) -> bool {
        matches!(
            (self, block_type),
            (BlockContent::Text(_), BlockType::Text)
                | (BlockContent::Image(_), BlockType::Media | BlockType::Logo)
                | (BlockContent::Derived, BlockType::Video | BlockType::Map)
                | (BlockContent::Contact(_), BlockType::Contact)
                | (BlockContent::Stats(_), BlockType::Stats)
                | (BlockContent::Testimonials(_), BlockType::Testimonials)
                | (BlockContent::Certifications(_), BlockType::Certifications)
                | (BlockContent::Social(_), BlockType::Social)
                | (BlockContent::Collaborators(_), BlockType::Collaborators)
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockContent::Text(_) => "text",
            BlockContent::Image(_) => "image",
            BlockContent::Contact(_) => "contact",
            BlockContent::Stats(_) => "stats",
            BlockContent::Testimonials(_) => "testimonials",
            BlockContent::Certifications(_) => "certifications",
            BlockContent::Social(_) => "social",
            BlockContent::Collaborators(_) => "collaborators",
            BlockContent::Derived => "derived",
        }
    }

    /// Decode the stored string for a block of `block_type`. Never fails.
    pub fn decode(block_type: BlockType, raw: Option<&str>) -> Self {
        match block_type {
            BlockType::Text => BlockContent::Text(raw.unwrap_or_default().to_string()),
            BlockType::Media | BlockType::Logo => {
                BlockContent::Image(raw.unwrap_or_default().to_string())
            }
            BlockType::Video | BlockType::Map => BlockContent::Derived,
            BlockType::Contact => BlockContent::Contact(decode_json(block_type, raw)),
            BlockType::Stats => BlockContent::Stats(decode_json(block_type, raw)),
            BlockType::Testimonials => BlockContent::Testimonials(
                decode_json::<TestimonialsWire>(block_type, raw).into(),
            ),
            BlockType::Certifications => BlockContent::Certifications(
                decode_json::<CertificationsWire>(block_type, raw).into(),
            ),
            BlockType::Social => BlockContent::Social(decode_json(block_type, raw)),
            BlockType::Collaborators => {
                BlockContent::Collaborators(decode_json(block_type, raw))
            }
        }
    }

    /// Stored string form. `None` for empty text/URLs and derived payloads.
    pub fn encode(&self) -> Option<String> {
        match self {
            BlockContent::Text(s) | BlockContent::Image(s) => {
                (!s.is_empty()).then(|| s.clone())
            }
            BlockContent::Derived => None,
            BlockContent::Contact(c) => encode_json(c),
            BlockContent::Stats(s) => encode_json(s),
            BlockContent::Testimonials(l) => encode_json(l),
            BlockContent::Certifications(l) => encode_json(l),
            BlockContent::Social(l) => encode_json(l),
            BlockContent::Collaborators(l) => encode_json(l),
        }
    }

    /// Whether an image payload is a local preview pending upload.
    pub fn is_local_preview(&self) -> bool {
        matches!(self, BlockContent::Image(url) if url.starts_with(LOCAL_PREVIEW_SCHEME))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            BlockContent::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&str> {
        match self {
            BlockContent::Image(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_stats(&self) -> Option<&Stats> {
        match self {
            BlockContent::Stats(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_contact(&self) -> Option<&ContactConfig> {
        match self {
            BlockContent::Contact(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_testimonials(&self) -> Option<&EntryList<Testimonial>> {
        match self {
            BlockContent::Testimonials(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_certifications(&self) -> Option<&EntryList<Certification>> {
        match self {
            BlockContent::Certifications(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_social(&self) -> Option<&SocialLinks> {
        match self {
            BlockContent::Social(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_collaborators(&self) -> Option<&EntryList<Collaborator>> {
        match self {
            BlockContent::Collaborators(l) => Some(l),
            _ => None,
        }
    }
}

fn decode_json<T: DeserializeOwned + Default>(block_type: BlockType, raw: Option<&str>) -> T {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return T::default();
    };
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(%block_type, error = %e, "malformed block content, using empty default");
            T::default()
        }
    }
}

fn encode_json<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode block content");
            None
        }
    }
}

// ── Entry lists ─────────────────────────────────────────────────────────────

/// An item of a list-shaped payload, addressed by its own [`EntryId`].
pub trait ListEntry: Clone {
    fn id(&self) -> &EntryId;

    /// An empty entry with a fresh id.
    fn blank() -> Self;
}

/// Insertion-ordered entries. No reordering within a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T>(Vec<T>);

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: ListEntry> EntryList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn get(&self, id: &EntryId) -> Option<&T> {
        self.0.iter().find(|e| e.id() == id)
    }

    /// Append a blank entry, returning its id.
    pub fn append_blank(&mut self) -> EntryId {
        self.push(T::blank())
    }

    /// Append an entry, returning its id.
    pub fn push(&mut self, entry: T) -> EntryId {
        let id = entry.id().clone();
        self.0.push(entry);
        id
    }

    /// Mutate one entry in place.
    pub fn update<R>(&mut self, id: &EntryId, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        self.0
            .iter_mut()
            .find(|e| e.id() == id)
            .map(f)
            .ok_or_else(|| TypeError::EntryNotFound(id.clone()))
    }

    pub fn remove(&mut self, id: &EntryId) -> Result<T> {
        let idx = self
            .0
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| TypeError::EntryNotFound(id.clone()))?;
        Ok(self.0.remove(idx))
    }
}

impl<T: ListEntry> FromIterator<T> for EntryList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a EntryList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Testimonials ────────────────────────────────────────────────────────────

/// Star rating, 1 to 5 inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Exact rating; anything outside 1..=5 is rejected.
    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(TypeError::RatingOutOfRange(value))
        }
    }

    /// Nearest valid rating. Used when reading stored data.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(d)?;
        Ok(Self::clamped(value.round() as i64))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub id: EntryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: Rating,
}

impl ListEntry for Testimonial {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank() -> Self {
        Self {
            id: EntryId::new(),
            name: String::new(),
            text: String::new(),
            rating: Rating::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TestimonialsWire {
    List(Vec<Testimonial>),
    Single {
        text: String,
        #[serde(default)]
        author: String,
        #[serde(default)]
        rating: Rating,
    },
}

impl Default for TestimonialsWire {
    fn default() -> Self {
        TestimonialsWire::List(Vec::new())
    }
}

impl From<TestimonialsWire> for EntryList<Testimonial> {
    fn from(wire: TestimonialsWire) -> Self {
        match wire {
            TestimonialsWire::List(entries) => EntryList(entries),
            TestimonialsWire::Single {
                text,
                author,
                rating,
            } => EntryList(vec![Testimonial {
                id: EntryId::new(),
                name: author,
                text,
                rating,
            }]),
        }
    }
}

// ── Certifications ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub id: EntryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    /// Free text as the lawyer typed it ("2012", "2010-2012"). Numbers
    /// written by older clients are accepted and kept as their digits.
    #[serde(default = "default_year", deserialize_with = "lenient_year")]
    pub year: String,
}

impl ListEntry for Certification {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank() -> Self {
        Self {
            id: EntryId::new(),
            name: String::new(),
            issuer: String::new(),
            year: default_year(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(transparent)]
struct CertificationsWire(Vec<CertificationWire>);

#[derive(Deserialize)]
#[serde(untagged)]
enum CertificationWire {
    Entry(Certification),
    Name(String),
}

impl From<CertificationsWire> for EntryList<Certification> {
    fn from(wire: CertificationsWire) -> Self {
        wire.0
            .into_iter()
            .map(|c| match c {
                CertificationWire::Entry(entry) => entry,
                CertificationWire::Name(name) => Certification {
                    name,
                    ..Certification::blank()
                },
            })
            .collect()
    }
}

fn default_year() -> String {
    crate::current_year().to_string()
}

fn lenient_year<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Year::deserialize(d)? {
        Year::Text(s) => s,
        Year::Int(n) => n.to_string(),
        Year::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Year::Float(f) => f.to_string(),
        Year::Null(()) => default_year(),
    })
}

// ── Collaborators ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    #[serde(default)]
    pub id: EntryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub image_url: String,
}

impl ListEntry for Collaborator {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank() -> Self {
        Self {
            id: EntryId::new(),
            name: String::new(),
            role: String::new(),
            image_url: String::new(),
        }
    }
}

// ── Social links ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum SocialPlatform {
    Linkedin,
    Twitter,
    Facebook,
    Instagram,
    Website,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 5] = [
        SocialPlatform::Linkedin,
        SocialPlatform::Twitter,
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::Website,
    ];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Website => "website",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::Linkedin => "LinkedIn",
            SocialPlatform::Twitter => "Twitter/X",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Website => "Website",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default)]
    pub id: EntryId,
    pub platform: SocialPlatform,
    #[serde(default)]
    pub url: String,
}

impl ListEntry for SocialLink {
    fn id(&self) -> &EntryId {
        &self.id
    }

    /// A website link; the social editor always names the platform instead.
    fn blank() -> Self {
        Self {
            id: EntryId::new(),
            platform: SocialPlatform::Website,
            url: String::new(),
        }
    }
}

/// Social links with at most one link per platform.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SocialLinks(EntryList<SocialLink>);

impl SocialLinks {
    pub fn links(&self) -> &[SocialLink] {
        self.0.as_slice()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, platform: SocialPlatform) -> Option<&SocialLink> {
        self.0.iter().find(|l| l.platform == platform)
    }

    /// Platforms without a link yet, in canonical order.
    pub fn available_platforms(&self) -> Vec<SocialPlatform> {
        SocialPlatform::ALL
            .into_iter()
            .filter(|p| self.get(*p).is_none())
            .collect()
    }

    /// Add an empty link for `platform`.
    pub fn add(&mut self, platform: SocialPlatform) -> Result<EntryId> {
        if self.get(platform).is_some() {
            return Err(TypeError::PlatformAlreadyLinked(platform));
        }
        Ok(self.0.push(SocialLink {
            platform,
            ..SocialLink::blank()
        }))
    }

    pub fn set_url(&mut self, id: &EntryId, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        self.0.update(id, |link| link.url = url)
    }

    pub fn remove(&mut self, id: &EntryId) -> Result<SocialLink> {
        self.0.remove(id)
    }

    /// Keep the first link per platform.
    fn from_links(links: impl IntoIterator<Item = SocialLink>) -> Self {
        let mut out = SocialLinks::default();
        for link in links {
            if out.get(link.platform).is_some() {
                tracing::debug!(platform = %link.platform, "dropping duplicate social link");
                continue;
            }
            out.0.push(link);
        }
        out
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SocialWire {
    List(Vec<SocialLink>),
    Map(BTreeMap<String, Option<String>>),
}

impl<'de> Deserialize<'de> for SocialLinks {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        Ok(match SocialWire::deserialize(d)? {
            SocialWire::List(links) => SocialLinks::from_links(links),
            SocialWire::Map(map) => SocialLinks::from_links(SocialPlatform::ALL.into_iter().filter_map(
                |platform| {
                    let url = map.get(platform.as_str())?.as_deref()?.trim();
                    (!url.is_empty()).then(|| SocialLink {
                        id: EntryId::new(),
                        platform,
                        url: url.to_string(),
                    })
                },
            )),
        })
    }
}

// ── Stats ───────────────────────────────────────────────────────────────────

/// Key figures. Missing or unreadable fields are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default, alias = "years", deserialize_with = "lenient_count")]
    pub years_experience: u32,
    #[serde(default, alias = "cases", deserialize_with = "lenient_count")]
    pub cases_won: u32,
    #[serde(default, alias = "success", deserialize_with = "lenient_count")]
    pub success_rate: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub clients_served: u32,
}

impl Stats {
    pub fn get(&self, field: StatField) -> u32 {
        match field {
            StatField::YearsExperience => self.years_experience,
            StatField::CasesWon => self.cases_won,
            StatField::SuccessRate => self.success_rate,
            StatField::ClientsServed => self.clients_served,
        }
    }

    /// Set a field, clamped to its ceiling.
    pub fn set(&mut self, field: StatField, value: u32) {
        let value = value.min(field.max());
        match field {
            StatField::YearsExperience => self.years_experience = value,
            StatField::CasesWon => self.cases_won = value,
            StatField::SuccessRate => self.success_rate = value,
            StatField::ClientsServed => self.clients_served = value,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Stats::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive, serialize_all = "camelCase")]
pub enum StatField {
    YearsExperience,
    CasesWon,
    SuccessRate,
    ClientsServed,
}

impl StatField {
    pub const ALL: [StatField; 4] = [
        StatField::YearsExperience,
        StatField::CasesWon,
        StatField::SuccessRate,
        StatField::ClientsServed,
    ];

    /// Input ceiling.
    pub fn max(&self) -> u32 {
        match self {
            StatField::YearsExperience => 50,
            StatField::CasesWon => 10_000,
            StatField::SuccessRate => 100,
            StatField::ClientsServed => 10_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatField::YearsExperience => "Years of experience",
            StatField::CasesWon => "Cases won",
            StatField::SuccessRate => "Success rate (%)",
            StatField::ClientsServed => "Clients served",
        }
    }
}

/// Read a count from free-text input: leading digits, anything else is zero.
///
/// `"500+"` → 500, `"95%"` → 95, `"-3"` → 0, `"abc"` → 0.
pub fn parse_stat_input(s: &str) -> u32 {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(u64),
        Float(f64),
        Text(String),
        Null(()),
    }

    Ok(match Count::deserialize(d)? {
        Count::Int(n) => n.min(u32::MAX as u64) as u32,
        Count::Float(f) if f.is_finite() && f > 0.0 => f.min(u32::MAX as f64) as u32,
        Count::Float(_) | Count::Null(()) => 0,
        Count::Text(s) => parse_stat_input(&s),
    })
}

// ── Contact ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ContactStyle {
    #[default]
    Primary,
    Secondary,
    Accent,
}

impl ContactStyle {
    pub const ALL: [ContactStyle; 3] = [
        ContactStyle::Primary,
        ContactStyle::Secondary,
        ContactStyle::Accent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStyle::Primary => "primary",
            ContactStyle::Secondary => "secondary",
            ContactStyle::Accent => "accent",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ContactAction {
    /// Open the booking flow.
    #[default]
    Book,
    Call,
    Email,
    Message,
}

impl ContactAction {
    pub const ALL: [ContactAction; 4] = [
        ContactAction::Book,
        ContactAction::Call,
        ContactAction::Email,
        ContactAction::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactAction::Book => "book",
            ContactAction::Call => "call",
            ContactAction::Email => "email",
            ContactAction::Message => "message",
        }
    }
}

/// CONTACT button configuration. The label is the block title.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default)]
    pub style: ContactStyle,
    #[serde(default)]
    pub action: ContactAction,
}

// ============================================================================
// Tests
// ============================================================================
