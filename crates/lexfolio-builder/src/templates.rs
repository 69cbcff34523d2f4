//! Template application, creation, and the catalog of available templates.
//!
//! Applying a template and creating one both clone blocks with fresh ids, so
//! a canvas and a template never share block identity: editing one never
//! reaches the other.

use lexfolio_types::{
    DEFAULT_TEMPLATE_DESCRIPTION, ProfileBlock, ProfileTemplate, TemplateId, default_templates,
    now_millis,
};

use crate::error::{BuilderError, Result};
use crate::store::TemplateRepository;

/// Blocks for a canvas: fresh ids, `order` equal to position.
pub fn apply_template(template: &ProfileTemplate) -> Vec<ProfileBlock> {
    renumbered_copies(&template.blocks)
}

/// Wrap the current canvas blocks as a new custom template.
///
/// Rejected before anything is built when `blocks` is empty or `name` is
/// blank. A blank description becomes [`DEFAULT_TEMPLATE_DESCRIPTION`].
pub fn create_from_current(
    blocks: &[ProfileBlock],
    name: &str,
    description: &str,
    created_by: Option<&str>,
) -> Result<ProfileTemplate> {
    if blocks.is_empty() {
        return Err(BuilderError::EmptyTemplate);
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(BuilderError::BlankTemplateName);
    }
    let description = match description.trim() {
        "" => DEFAULT_TEMPLATE_DESCRIPTION,
        d => d,
    };
    let created_by = created_by
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    Ok(ProfileTemplate {
        id: TemplateId::new(),
        name: name.to_string(),
        description: description.to_string(),
        thumbnail: None,
        blocks: renumbered_copies(blocks),
        is_default: false,
        created_by,
        created_at: Some(now_millis()),
    })
}

fn renumbered_copies(blocks: &[ProfileBlock]) -> Vec<ProfileBlock> {
    blocks
        .iter()
        .enumerate()
        .map(|(idx, block)| {
            let mut copy = block.clone_with_fresh_id();
            copy.order = idx as u32;
            copy
        })
        .collect()
}

/// Built-in templates followed by the custom ones from a repository.
pub struct TemplateCatalog<R> {
    repo: R,
}

impl<R: TemplateRepository> TemplateCatalog<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Every template: built-ins first, then custom in stored order.
    pub async fn list(&self) -> Result<Vec<ProfileTemplate>> {
        let mut all = default_templates().to_vec();
        all.extend(self.custom().await?);
        Ok(all)
    }

    /// Custom templates only. Stored entries claiming a built-in id are skipped.
    pub async fn custom(&self) -> Result<Vec<ProfileTemplate>> {
        let stored = self.repo.list().await?;
        Ok(stored
            .into_iter()
            .filter(|t| {
                let shadowed = is_builtin(&t.id);
                if shadowed {
                    tracing::warn!(id = %t.id, "ignoring stored template with a built-in id");
                }
                !shadowed
            })
            .map(|mut t| {
                t.is_default = false;
                t
            })
            .collect())
    }

    pub async fn find(&self, id: &TemplateId) -> Result<Option<ProfileTemplate>> {
        if let Some(builtin) = default_templates().iter().find(|t| &t.id == id) {
            return Ok(Some(builtin.clone()));
        }
        self.repo.get(id).await
    }

    /// Canvas blocks for the template with `id`.
    pub async fn instantiate(&self, id: &TemplateId) -> Result<Vec<ProfileBlock>> {
        let template = self
            .find(id)
            .await?
            .ok_or_else(|| BuilderError::TemplateNotFound(id.clone()))?;
        tracing::info!(%id, name = %template.name, blocks = template.blocks.len(), "applying template");
        Ok(apply_template(&template))
    }

    /// Create a template from the current blocks and store it.
    pub async fn save_from_current(
        &self,
        blocks: &[ProfileBlock],
        name: &str,
        description: &str,
        created_by: Option<&str>,
    ) -> Result<ProfileTemplate> {
        let template = create_from_current(blocks, name, description, created_by)?;
        self.repo.save(template.clone()).await?;
        Ok(template)
    }

    /// Delete a custom template.
    ///
    /// Built-ins cannot be deleted. When both the template's creator and
    /// `requested_by` are known they must match.
    pub async fn delete(&self, id: &TemplateId, requested_by: Option<&str>) -> Result<()> {
        if is_builtin(id) {
            return Err(BuilderError::DefaultTemplate(id.clone()));
        }
        let template = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| BuilderError::TemplateNotFound(id.clone()))?;
        let owner_known = template.created_by.is_some();
        if let Some(requester) = requested_by.filter(|_| owner_known) {
            if !template.is_created_by(requester) {
                return Err(BuilderError::not_owner(id));
            }
        }
        if !self.repo.delete(id).await? {
            return Err(BuilderError::TemplateNotFound(id.clone()));
        }
        Ok(())
    }
}

fn is_builtin(id: &TemplateId) -> bool {
    default_templates().iter().any(|t| &t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTemplateStore;
    use lexfolio_types::{BlockType, ProfileBlockRecord};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn three_blocks() -> Vec<ProfileBlock> {
        vec![
            ProfileBlock::new(BlockType::Text, 0),
            ProfileBlock::new(BlockType::Stats, 1),
            ProfileBlock::new(BlockType::Contact, 2),
        ]
    }

    /// Everything but the id, for positional comparison.
    fn shape(block: &ProfileBlock) -> ProfileBlockRecord {
        ProfileBlockRecord {
            id: String::new(),
            ..ProfileBlockRecord::from(block)
        }
    }

    #[test]
    fn test_apply_twice_gives_disjoint_ids() {
        for template in default_templates() {
            let first = apply_template(template);
            let second = apply_template(template);

            let ids_a: HashSet<_> = first.iter().map(|b| b.id.clone()).collect();
            let ids_b: HashSet<_> = second.iter().map(|b| b.id.clone()).collect();
            assert!(ids_a.is_disjoint(&ids_b));
            assert_eq!(ids_a.len(), template.blocks.len());

            for ((a, b), original) in first.iter().zip(&second).zip(&template.blocks) {
                assert_eq!(shape(a), shape(b));
                assert_eq!(a.block_type(), original.block_type());
                assert_eq!(a.size, original.size);
                assert_eq!(a.style, original.style);
                assert_eq!(a.content(), original.content());
            }
        }
    }

    #[test]
    fn test_apply_renormalizes_order() {
        let mut template = default_templates()[0].clone();
        for block in &mut template.blocks {
            block.order = 40;
        }
        let orders: Vec<u32> = apply_template(&template).iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_create_rejects_blank_name_and_empty_blocks() {
        assert!(matches!(
            create_from_current(&three_blocks(), "", "desc", None),
            Err(BuilderError::BlankTemplateName)
        ));
        assert!(matches!(
            create_from_current(&three_blocks(), "   ", "desc", None),
            Err(BuilderError::BlankTemplateName)
        ));
        assert!(matches!(
            create_from_current(&[], "Name", "desc", None),
            Err(BuilderError::EmptyTemplate)
        ));
    }

    #[test]
    fn test_create_is_isolated_from_canvas() {
        let mut blocks = three_blocks();
        let template =
            create_from_current(&blocks, "  Mine ", "", Some("me@cabinet.fr")).unwrap();
        assert_eq!(template.name, "Mine");
        assert_eq!(template.description, DEFAULT_TEMPLATE_DESCRIPTION);
        assert!(!template.is_default);
        assert!(template.created_at.is_some());
        assert_eq!(template.created_by.as_deref(), Some("me@cabinet.fr"));
        for (saved, live) in template.blocks.iter().zip(&blocks) {
            assert_ne!(saved.id, live.id);
        }

        blocks[0].title = Some("Changed later".into());
        assert_eq!(template.blocks[0].title, None);
    }

    #[tokio::test]
    async fn test_blank_name_stores_nothing() {
        let catalog = TemplateCatalog::new(MemoryTemplateStore::new());
        let result = catalog.save_from_current(&three_blocks(), "", "", None).await;
        assert!(matches!(result, Err(BuilderError::BlankTemplateName)));
        assert!(catalog.custom().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_lists_defaults_first() {
        let catalog = TemplateCatalog::new(MemoryTemplateStore::new());
        let saved = catalog
            .save_from_current(&three_blocks(), "Mine", "", None)
            .await
            .unwrap();
        let all = catalog.list().await.unwrap();
        assert_eq!(all.len(), 6);
        assert!(all[..5].iter().all(|t| t.is_default));
        assert_eq!(all[5].id, saved.id);

        assert_eq!(
            catalog.find(&TemplateId::from_raw("template-3")).await.unwrap().map(|t| t.name),
            Some("Modern".to_string())
        );
        assert_eq!(catalog.find(&saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_instantiate() {
        let catalog = TemplateCatalog::new(MemoryTemplateStore::new());
        let blocks = catalog
            .instantiate(&TemplateId::from_raw("template-5"))
            .await
            .unwrap();
        assert_eq!(blocks.len(), 10);
        assert!(blocks.iter().all(|b| b.id.is_minted()));

        let missing = TemplateId::from_raw("template-99");
        assert!(matches!(
            catalog.instantiate(&missing).await,
            Err(BuilderError::TemplateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let catalog = TemplateCatalog::new(MemoryTemplateStore::new());
        assert!(matches!(
            catalog.delete(&TemplateId::from_raw("template-1"), None).await,
            Err(BuilderError::DefaultTemplate(_))
        ));

        let saved = catalog
            .save_from_current(&three_blocks(), "Mine", "", Some("me@cabinet.fr"))
            .await
            .unwrap();
        assert!(matches!(
            catalog.delete(&saved.id, Some("other@cabinet.fr")).await,
            Err(BuilderError::NotTemplateOwner { .. })
        ));
        catalog.delete(&saved.id, Some("ME@cabinet.fr")).await.unwrap();
        assert!(matches!(
            catalog.delete(&saved.id, None).await,
            Err(BuilderError::TemplateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_stored_builtin_ids_are_ignored() {
        let mut fake = default_templates()[0].clone();
        fake.name = "Hijacked".into();
        let catalog = TemplateCatalog::new(MemoryTemplateStore::with_templates(vec![fake]));
        let all = catalog.list().await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].name, "Classic");
    }
}
