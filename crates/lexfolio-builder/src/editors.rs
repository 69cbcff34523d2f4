//! Per-type content editors.
//!
//! An editor borrows one block's typed payload (and its title where the type
//! uses it) for the duration of an edit. Edits land directly in the block;
//! the storage string is produced only when the canvas is saved.

use lexfolio_types::{
    BlockContent, BlockType, Certification, Collaborator, ContactAction, ContactConfig,
    ContactStyle, DEFAULT_CONTACT_LABEL, EntryId, EntryList, LOCAL_PREVIEW_SCHEME, ListEntry,
    ProfileBlock, Rating, SocialLink, SocialLinks, SocialPlatform, StatField, Stats, Testimonial,
    parse_stat_input,
};

use crate::error::{BuilderError, Result};

/// The editor matching a block's type.
pub enum ContentEditor<'a> {
    Text(TextEditor<'a>),
    Image(ImageEditor<'a>),
    Contact(ContactEditor<'a>),
    Stats(StatsEditor<'a>),
    Testimonials(ListEditor<'a, Testimonial>),
    Certifications(ListEditor<'a, Certification>),
    Collaborators(ListEditor<'a, Collaborator>),
    Social(SocialEditor<'a>),
    /// VIDEO and MAP have nothing to edit.
    Derived(BlockType),
}

impl<'a> ContentEditor<'a> {
    pub fn bind(block: &'a mut ProfileBlock) -> Self {
        let block_type = block.block_type();
        let (title, content) = block.title_and_content_mut();
        match content {
            BlockContent::Text(body) => ContentEditor::Text(TextEditor { title, body }),
            BlockContent::Image(url) => ContentEditor::Image(ImageEditor { block_type, url }),
            BlockContent::Contact(config) => ContentEditor::Contact(ContactEditor { title, config }),
            BlockContent::Stats(stats) => ContentEditor::Stats(StatsEditor { stats }),
            BlockContent::Testimonials(list) => ContentEditor::Testimonials(ListEditor { list }),
            BlockContent::Certifications(list) => {
                ContentEditor::Certifications(ListEditor { list })
            }
            BlockContent::Collaborators(list) => ContentEditor::Collaborators(ListEditor { list }),
            BlockContent::Social(links) => ContentEditor::Social(SocialEditor { links }),
            BlockContent::Derived => ContentEditor::Derived(block_type),
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            ContentEditor::Text(_) => BlockType::Text,
            ContentEditor::Image(e) => e.block_type,
            ContentEditor::Contact(_) => BlockType::Contact,
            ContentEditor::Stats(_) => BlockType::Stats,
            ContentEditor::Testimonials(_) => BlockType::Testimonials,
            ContentEditor::Certifications(_) => BlockType::Certifications,
            ContentEditor::Collaborators(_) => BlockType::Collaborators,
            ContentEditor::Social(_) => BlockType::Social,
            ContentEditor::Derived(t) => *t,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContentEditor::Text(_) => "text",
            ContentEditor::Image(_) => "image",
            ContentEditor::Contact(_) => "contact",
            ContentEditor::Stats(_) => "stats",
            ContentEditor::Testimonials(_) => "testimonials",
            ContentEditor::Certifications(_) => "certifications",
            ContentEditor::Collaborators(_) => "collaborators",
            ContentEditor::Social(_) => "social",
            ContentEditor::Derived(_) => "none",
        }
    }

    pub fn into_text(self) -> Result<TextEditor<'a>> {
        match self {
            ContentEditor::Text(e) => Ok(e),
            other => Err(BuilderError::wrong_editor(other.block_type(), "text")),
        }
    }

    pub fn into_image(self) -> Result<ImageEditor<'a>> {
        match self {
            ContentEditor::Image(e) => Ok(e),
            other => Err(BuilderError::wrong_editor(other.block_type(), "image")),
        }
    }

    pub fn into_contact(self) -> Result<ContactEditor<'a>> {
        match self {
            ContentEditor::Contact(e) => Ok(e),
            other => Err(BuilderError::wrong_editor(other.block_type(), "contact")),
        }
    }

    pub fn into_stats(self) -> Result<StatsEditor<'a>> {
        match self {
            ContentEditor::Stats(e) => Ok(e),
            other => Err(BuilderError::wrong_editor(other.block_type(), "stats")),
        }
    }

    pub fn into_testimonials(self) -> Result<ListEditor<'a, Testimonial>> {
        match self {
            ContentEditor::Testimonials(e) => Ok(e),
            other => Err(BuilderError::wrong_editor(other.block_type(), "testimonials")),
        }
    }

    pub fn into_certifications(self) -> Result<ListEditor<'a, Certification>> {
        match self {
            ContentEditor::Certifications(e) => Ok(e),
            other => Err(BuilderError::wrong_editor(other.block_type(), "certifications")),
        }
    }

    pub fn into_collaborators(self) -> Result<ListEditor<'a, Collaborator>> {
        match self {
            ContentEditor::Collaborators(e) => Ok(e),
            other => Err(BuilderError::wrong_editor(other.block_type(), "collaborators")),
        }
    }

    pub fn into_social(self) -> Result<SocialEditor<'a>> {
        match self {
            ContentEditor::Social(e) => Ok(e),
            other => Err(BuilderError::wrong_editor(other.block_type(), "social")),
        }
    }
}

// ── Text ────────────────────────────────────────────────────────────────────

pub struct TextEditor<'a> {
    title: &'a mut Option<String>,
    body: &'a mut String,
}

impl TextEditor<'_> {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the heading. Blank clears it.
    pub fn set_title(&mut self, title: &str) {
        *self.title = non_blank(title);
    }

    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        *self.body = body.into();
    }
}

// ── Media / logo ────────────────────────────────────────────────────────────

/// Image URL for MEDIA and LOGO. The payload is the URL itself.
pub struct ImageEditor<'a> {
    block_type: BlockType,
    url: &'a mut String,
}

impl ImageEditor<'_> {
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        *self.url = url.into().trim().to_string();
    }

    /// Show a local preview until the upload finishes.
    pub fn attach_preview(&mut self, object_url: impl Into<String>) {
        let object_url = object_url.into();
        if !object_url.starts_with(LOCAL_PREVIEW_SCHEME) {
            tracing::debug!(block_type = %self.block_type, "preview url is not local");
        }
        *self.url = object_url;
    }

    /// Replace a local preview with the uploaded URL.
    pub fn complete_upload(&mut self, uploaded_url: impl Into<String>) {
        self.set_url(uploaded_url);
    }

    pub fn is_pending_upload(&self) -> bool {
        self.url.starts_with(LOCAL_PREVIEW_SCHEME)
    }

    pub fn clear(&mut self) {
        self.url.clear();
    }
}

// ── Contact ─────────────────────────────────────────────────────────────────

/// CONTACT button. The label lives in the block title, the rest in the payload.
pub struct ContactEditor<'a> {
    title: &'a mut Option<String>,
    config: &'a mut ContactConfig,
}

impl ContactEditor<'_> {
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_CONTACT_LABEL)
    }

    pub fn set_label(&mut self, label: &str) {
        *self.title = non_blank(label);
    }

    pub fn config(&self) -> ContactConfig {
        *self.config
    }

    pub fn set_style(&mut self, style: ContactStyle) {
        self.config.style = style;
    }

    pub fn set_action(&mut self, action: ContactAction) {
        self.config.action = action;
    }
}

// ── Stats ───────────────────────────────────────────────────────────────────

pub struct StatsEditor<'a> {
    stats: &'a mut Stats,
}

impl StatsEditor<'_> {
    pub fn stats(&self) -> Stats {
        *self.stats
    }

    pub fn get(&self, field: StatField) -> u32 {
        self.stats.get(field)
    }

    /// Set a figure, clamped to the field's ceiling. Returns the stored value.
    pub fn set(&mut self, field: StatField, value: u32) -> u32 {
        self.stats.set(field, value);
        self.stats.get(field)
    }

    /// Set from free text: leading digits, anything else is zero.
    pub fn set_input(&mut self, field: StatField, input: &str) -> u32 {
        self.set(field, parse_stat_input(input))
    }
}

// ── Entry lists ─────────────────────────────────────────────────────────────

/// Append/update/remove editor over an insertion-ordered entry list.
pub struct ListEditor<'a, T> {
    list: &'a mut EntryList<T>,
}

impl<T: ListEntry> ListEditor<'_, T> {
    pub fn entries(&self) -> &[T] {
        self.list.as_slice()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Append a blank entry with a fresh id.
    pub fn add(&mut self) -> EntryId {
        self.list.append_blank()
    }

    pub fn update(&mut self, id: &EntryId, f: impl FnOnce(&mut T)) -> Result<()> {
        Ok(self.list.update(id, f)?)
    }

    pub fn remove(&mut self, id: &EntryId) -> Result<T> {
        Ok(self.list.remove(id)?)
    }
}

impl ListEditor<'_, Testimonial> {
    pub fn set_name(&mut self, id: &EntryId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.update(id, |t| t.name = name)
    }

    pub fn set_text(&mut self, id: &EntryId, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.update(id, |t| t.text = text)
    }

    /// Star rating. Only 1 to 5 is accepted.
    pub fn set_rating(&mut self, id: &EntryId, rating: i64) -> Result<()> {
        let rating = Rating::new(rating)?;
        self.update(id, |t| t.rating = rating)
    }
}

impl ListEditor<'_, Certification> {
    pub fn set_name(&mut self, id: &EntryId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.update(id, |c| c.name = name)
    }

    pub fn set_issuer(&mut self, id: &EntryId, issuer: impl Into<String>) -> Result<()> {
        let issuer = issuer.into();
        self.update(id, |c| c.issuer = issuer)
    }

    pub fn set_year(&mut self, id: &EntryId, year: impl Into<String>) -> Result<()> {
        let year = year.into();
        self.update(id, |c| c.year = year)
    }
}

impl ListEditor<'_, Collaborator> {
    pub fn set_name(&mut self, id: &EntryId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.update(id, |c| c.name = name)
    }

    pub fn set_role(&mut self, id: &EntryId, role: impl Into<String>) -> Result<()> {
        let role = role.into();
        self.update(id, |c| c.role = role)
    }

    pub fn set_image_url(&mut self, id: &EntryId, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        self.update(id, |c| c.image_url = url)
    }
}

// ── Social ──────────────────────────────────────────────────────────────────

/// Social links, one per platform.
pub struct SocialEditor<'a> {
    links: &'a mut SocialLinks,
}

impl SocialEditor<'_> {
    pub fn links(&self) -> &[SocialLink] {
        self.links.links()
    }

    /// Platforms offered by the add affordance.
    pub fn available_platforms(&self) -> Vec<SocialPlatform> {
        self.links.available_platforms()
    }

    pub fn add(&mut self, platform: SocialPlatform) -> Result<EntryId> {
        Ok(self.links.add(platform)?)
    }

    pub fn set_url(&mut self, id: &EntryId, url: impl Into<String>) -> Result<()> {
        Ok(self.links.set_url(id, url)?)
    }

    pub fn remove(&mut self, id: &EntryId) -> Result<SocialLink> {
        Ok(self.links.remove(id)?)
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexfolio_types::TypeError;
    use pretty_assertions::assert_eq;

    fn block(block_type: BlockType) -> ProfileBlock {
        ProfileBlock::new(block_type, 0)
    }

    #[test]
    fn test_bind_matches_block_type() {
        for t in BlockType::ALL {
            let mut b = block(t);
            let editor = ContentEditor::bind(&mut b);
            assert_eq!(editor.block_type(), t);
        }
        let mut map = block(BlockType::Map);
        assert_eq!(ContentEditor::bind(&mut map).name(), "none");
    }

    #[test]
    fn test_wrong_editor_is_rejected() {
        let mut b = block(BlockType::Map);
        let err = ContentEditor::bind(&mut b).into_stats().err().unwrap();
        assert!(matches!(
            err,
            BuilderError::WrongEditor { block_type: BlockType::Map, editor: "stats" }
        ));
    }

    #[test]
    fn test_text_editor_writes_title_and_body() {
        let mut b = block(BlockType::Text);
        {
            let mut editor = ContentEditor::bind(&mut b).into_text().unwrap();
            editor.set_title("My vision");
            editor.set_body("Rights defended with care.");
        }
        assert_eq!(b.title.as_deref(), Some("My vision"));
        assert_eq!(b.content().encode().as_deref(), Some("Rights defended with care."));

        ContentEditor::bind(&mut b).into_text().unwrap().set_title("   ");
        assert_eq!(b.title, None);
    }

    #[test]
    fn test_image_preview_then_upload() {
        let mut b = block(BlockType::Media);
        {
            let mut editor = ContentEditor::bind(&mut b).into_image().unwrap();
            editor.attach_preview("blob:http://localhost/abcd");
            assert!(editor.is_pending_upload());
            editor.complete_upload(" https://cdn.example.com/office.jpg ");
            assert!(!editor.is_pending_upload());
        }
        assert_eq!(b.content().as_image(), Some("https://cdn.example.com/office.jpg"));
    }

    #[test]
    fn test_contact_label_on_title() {
        let mut b = block(BlockType::Contact);
        {
            let mut editor = ContentEditor::bind(&mut b).into_contact().unwrap();
            assert_eq!(editor.label(), DEFAULT_CONTACT_LABEL);
            editor.set_label("Book an appointment");
            editor.set_style(ContactStyle::Secondary);
            editor.set_action(ContactAction::Message);
        }
        assert_eq!(b.title.as_deref(), Some("Book an appointment"));
        assert_eq!(
            b.content().encode().as_deref(),
            Some(r#"{"style":"secondary","action":"message"}"#)
        );
    }

    #[test]
    fn test_stats_editor_clamps_and_parses() {
        let mut b = block(BlockType::Stats);
        let mut editor = ContentEditor::bind(&mut b).into_stats().unwrap();
        assert_eq!(editor.set(StatField::YearsExperience, 80), 50);
        assert_eq!(editor.set_input(StatField::CasesWon, "500+"), 500);
        assert_eq!(editor.set_input(StatField::SuccessRate, "abc"), 0);
        assert_eq!(editor.stats().cases_won, 500);
    }

    #[test]
    fn test_testimonials_editor() {
        let mut b = block(BlockType::Testimonials);
        let mut editor = ContentEditor::bind(&mut b).into_testimonials().unwrap();
        let first = editor.add();
        let second = editor.add();
        assert_ne!(first, second);
        assert_eq!(editor.entries()[0].rating.get(), 5);

        editor.set_name(&first, "Marie D.").unwrap();
        editor.set_rating(&first, 3).unwrap();
        assert!(matches!(
            editor.set_rating(&first, 6),
            Err(BuilderError::Content(TypeError::RatingOutOfRange(6)))
        ));
        assert!(editor.set_rating(&first, 0).is_err());
        assert_eq!(editor.entries()[0].rating.get(), 3);

        editor.remove(&second).unwrap();
        assert_eq!(editor.len(), 1);
        assert!(editor.remove(&second).is_err());
    }

    #[test]
    fn test_entry_ids_are_distinct_from_block_id() {
        let mut b = block(BlockType::Collaborators);
        let block_id = b.id.clone();
        let mut editor = ContentEditor::bind(&mut b).into_collaborators().unwrap();
        let entry = editor.add();
        assert_ne!(entry.as_str(), block_id.as_str());
        editor.set_role(&entry, "Associate").unwrap();
        editor.set_image_url(&entry, "https://example.com/a.png").unwrap();
        assert_eq!(editor.entries()[0].role, "Associate");
    }

    #[test]
    fn test_certifications_editor() {
        let mut b = block(BlockType::Certifications);
        let mut editor = ContentEditor::bind(&mut b).into_certifications().unwrap();
        let id = editor.add();
        editor.set_name(&id, "Paris Bar").unwrap();
        editor.set_issuer(&id, "Ordre des avocats").unwrap();
        editor.set_year(&id, "2011-2013").unwrap();
        assert_eq!(editor.entries()[0].year, "2011-2013");
        let missing = EntryId::from_raw("missing");
        assert!(editor.set_year(&missing, "2000").is_err());
    }

    #[test]
    fn test_social_editor_exhausts_platforms() {
        let mut b = block(BlockType::Social);
        let mut editor = ContentEditor::bind(&mut b).into_social().unwrap();
        for platform in SocialPlatform::ALL {
            let id = editor.add(platform).unwrap();
            editor.set_url(&id, format!("https://{platform}.example")).unwrap();
        }
        assert!(editor.available_platforms().is_empty());
        assert!(editor.add(SocialPlatform::Linkedin).is_err());

        let linkedin = editor.links()[0].id.clone();
        editor.remove(&linkedin).unwrap();
        assert_eq!(editor.available_platforms(), vec![SocialPlatform::Linkedin]);
    }

    #[test]
    fn test_edit_then_encode_round_trips() {
        let mut b = block(BlockType::Testimonials);
        {
            let mut editor = ContentEditor::bind(&mut b).into_testimonials().unwrap();
            let id = editor.add();
            editor.set_text(&id, "Very responsive").unwrap();
        }
        let encoded = b.content().encode();
        let decoded = BlockContent::decode(BlockType::Testimonials, encoded.as_deref());
        assert_eq!(&decoded, b.content());
    }
}
