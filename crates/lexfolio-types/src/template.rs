//! Profile templates and the compiled-in defaults.
//!
//! Default templates are constants with stable ids (`template-1` …
//! `template-5`). They are never persisted and never mutated; custom
//! templates live in a template store owned by `lexfolio-builder`.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::block::{BlockSize, BlockType, ProfileBlock, ProfileBlockBuilder};
use crate::content::{BlockContent, Certification, EntryList, Rating, Stats, Testimonial};
use crate::ids::{EntryId, TemplateId};

/// Description given to custom templates saved without one.
pub const DEFAULT_TEMPLATE_DESCRIPTION: &str = "Custom template";

/// A named, reusable ordered block configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub blocks: Vec<ProfileBlock>,
    /// Built-in templates are immutable and cannot be deleted.
    #[serde(default)]
    pub is_default: bool,
    /// Creator email, for custom templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Unix milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
}

impl ProfileTemplate {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Whether `email` created this template. Emails compare case-insensitively.
    pub fn is_created_by(&self, email: &str) -> bool {
        self.created_by
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(email.trim()))
    }
}

/// The built-in templates, in picker order.
pub fn default_templates() -> &'static [ProfileTemplate] {
    static DEFAULTS: LazyLock<Vec<ProfileTemplate>> = LazyLock::new(build_defaults);
    &DEFAULTS
}

const OFFICE_PHOTO: &str = "https://images.unsplash.com/photo-1556761175-5973dc0f32e7?auto=format&fit=crop&w=1600&q=80";
const COURTHOUSE_PHOTO: &str = "https://images.unsplash.com/photo-1589829545856-d10d557cf95f?auto=format&fit=crop&w=1600&q=80";

fn build_defaults() -> Vec<ProfileTemplate> {
    vec![
        builtin(
            "template-1",
            "Classic",
            "Balanced layout with text, media and contact",
            vec![
                block("t1-b1", BlockType::Text, BlockSize::Medium)
                    .title("My vision")
                    .text("I defend your rights with passion and expertise. A personal approach guarantees careful support for every case."),
                block("t1-b2", BlockType::Media, BlockSize::Medium).text(OFFICE_PHOTO),
                block("t1-b3", BlockType::Contact, BlockSize::Small).title("Contact me"),
                block("t1-b4", BlockType::Stats, BlockSize::Full)
                    .title("My figures")
                    .content(stats(15, 500, 95)),
            ],
        ),
        builtin(
            "template-2",
            "Professional",
            "Puts certifications and experience forward",
            vec![
                block("t2-b1", BlockType::Logo, BlockSize::Small),
                block("t2-b2", BlockType::Text, BlockSize::Medium)
                    .title("About")
                    .text("Lawyer with more than 15 years of experience, specialised in business and commercial law."),
                block("t2-b3", BlockType::Certifications, BlockSize::Tall)
                    .title("Certifications")
                    .content(certifications(&[
                        "Paris Bar",
                        "Business law certification",
                        "Master in commercial law",
                    ])),
                block("t2-b4", BlockType::Stats, BlockSize::Medium)
                    .title("Experience")
                    .content(stats(15, 500, 95)),
                block("t2-b5", BlockType::Map, BlockSize::Medium),
                block("t2-b6", BlockType::Social, BlockSize::Small).title("Social networks"),
            ],
        ),
        builtin(
            "template-3",
            "Modern",
            "Modern design with video and testimonials",
            vec![
                block("t3-b1", BlockType::Media, BlockSize::Hero).text(COURTHOUSE_PHOTO),
                block("t3-b2", BlockType::Video, BlockSize::Large).title("Video introduction"),
                block("t3-b3", BlockType::Text, BlockSize::Medium)
                    .title("My approach")
                    .text("A modern and innovative practice of law, suited to today's challenges."),
                block("t3-b4", BlockType::Testimonials, BlockSize::Medium)
                    .title("Testimonials")
                    .content(testimonial(
                        "Marie D.",
                        "Excellent lawyer, very professional and attentive. Highly recommended!",
                    )),
                block("t3-b5", BlockType::Contact, BlockSize::Small).title("Book an appointment"),
            ],
        ),
        builtin(
            "template-4",
            "Team",
            "Highlights the firm and its collaborators",
            vec![
                block("t4-b1", BlockType::Logo, BlockSize::Small),
                block("t4-b2", BlockType::Text, BlockSize::Medium)
                    .title("Our firm")
                    .text("An experienced law firm with a multidisciplinary team at the service of your interests."),
                block("t4-b3", BlockType::Collaborators, BlockSize::Large).title("Our team"),
                block("t4-b4", BlockType::Stats, BlockSize::Medium)
                    .title("Our expertise")
                    .content(stats(20, 1000, 98)),
                block("t4-b5", BlockType::Certifications, BlockSize::Tall)
                    .title("Certifications")
                    .content(certifications(&["Paris Bar", "Business law certification"])),
                block("t4-b6", BlockType::Map, BlockSize::Medium),
            ],
        ),
        builtin(
            "template-5",
            "Complete",
            "Full profile with every kind of block",
            vec![
                block("t5-b1", BlockType::Logo, BlockSize::Small),
                block("t5-b2", BlockType::Text, BlockSize::Medium)
                    .title("Welcome")
                    .text("A passionate and dedicated lawyer, putting my expertise at your service to defend your rights and interests."),
                block("t5-b3", BlockType::Stats, BlockSize::Small)
                    .title("My figures")
                    .content(stats(12, 350, 92)),
                block("t5-b4", BlockType::Media, BlockSize::Large).text(COURTHOUSE_PHOTO),
                block("t5-b5", BlockType::Certifications, BlockSize::Tall)
                    .title("Certifications")
                    .content(certifications(&["Paris Bar", "Business law certification"])),
                block("t5-b6", BlockType::Testimonials, BlockSize::Medium)
                    .title("Client reviews")
                    .content(testimonial(
                        "Jean P.",
                        "Professional and efficient. I recommend without hesitation!",
                    )),
                block("t5-b7", BlockType::Collaborators, BlockSize::Wide).title("Team"),
                block("t5-b8", BlockType::Map, BlockSize::Medium),
                block("t5-b9", BlockType::Social, BlockSize::Small).title("Follow us"),
                block("t5-b10", BlockType::Contact, BlockSize::Small).title("Contact me"),
            ],
        ),
    ]
}

fn builtin(
    id: &str,
    name: &str,
    description: &str,
    blocks: Vec<ProfileBlockBuilder>,
) -> ProfileTemplate {
    ProfileTemplate {
        id: TemplateId::from_raw(id),
        name: name.to_string(),
        description: description.to_string(),
        thumbnail: None,
        blocks: blocks
            .into_iter()
            .enumerate()
            .map(|(order, b)| b.order(order as u32).build())
            .collect(),
        is_default: true,
        created_by: None,
        created_at: None,
    }
}

fn block(id: &str, block_type: BlockType, size: BlockSize) -> ProfileBlockBuilder {
    ProfileBlock::builder(block_type).id(id).size(size)
}

fn stats(years: u32, cases: u32, success: u32) -> BlockContent {
    BlockContent::Stats(Stats {
        years_experience: years,
        cases_won: cases,
        success_rate: success,
        clients_served: 0,
    })
}

fn certifications(names: &[&str]) -> BlockContent {
    BlockContent::Certifications(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Certification {
                id: EntryId::from_raw(format!("cert-{}", i + 1)),
                name: name.to_string(),
                issuer: String::new(),
                year: crate::current_year().to_string(),
            })
            .collect(),
    )
}

fn testimonial(name: &str, text: &str) -> BlockContent {
    let list: EntryList<Testimonial> = [Testimonial {
        id: EntryId::from_raw("review-1"),
        name: name.to_string(),
        text: text.to_string(),
        rating: Rating::default(),
    }]
    .into_iter()
    .collect();
    BlockContent::Testimonials(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_five_defaults_with_stable_ids() {
        let ids: Vec<&str> = default_templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["template-1", "template-2", "template-3", "template-4", "template-5"]
        );
        assert!(default_templates().iter().all(|t| t.is_default));
    }

    #[test]
    fn test_default_orders_are_contiguous() {
        for template in default_templates() {
            let orders: Vec<u32> = template.blocks.iter().map(|b| b.order).collect();
            let expected: Vec<u32> = (0..template.blocks.len() as u32).collect();
            assert_eq!(orders, expected, "{}", template.name);
        }
    }

    #[test]
    fn test_default_block_ids_unique_across_templates() {
        let mut seen = HashSet::new();
        for template in default_templates() {
            for block in &template.blocks {
                assert!(seen.insert(block.id.clone()), "duplicate {}", block.id);
            }
        }
    }

    #[test]
    fn test_modern_template_uses_hero() {
        let modern = &default_templates()[2];
        assert_eq!(modern.blocks[0].size, BlockSize::Hero);
        assert_eq!(modern.blocks.len(), 5);
        assert_eq!(default_templates()[4].blocks.len(), 10);
    }

    #[test]
    fn test_template_serde_uses_wire_blocks() {
        let template = &default_templates()[0];
        let json = serde_json::to_value(template).unwrap();
        assert_eq!(json["isDefault"], serde_json::Value::Bool(true));
        assert_eq!(json["blocks"][3]["type"], "STATS");
        assert_eq!(json["blocks"][3]["size"], "full");
        let back: ProfileTemplate = serde_json::from_value(json).unwrap();
        assert_eq!(&back, template);
    }

    #[test]
    fn test_is_created_by() {
        let mut template = default_templates()[0].clone();
        assert!(!template.is_created_by("a@b.fr"));
        template.created_by = Some("Me@Cabinet.fr".into());
        assert!(template.is_created_by("me@cabinet.fr"));
        assert!(!template.is_created_by("other@cabinet.fr"));
    }
}
