use std::io::Write;

use anyhow::{Context, Result, anyhow, bail};
use clap::Subcommand;

use lexfolio_builder::{
    BuilderConfig, Cell, FsProfileStore, LayoutPlan, ProfileRepository, ProfileSession,
    TemplateCatalog, TemplateRepository, plan_stored,
};
use lexfolio_types::{
    BlockId, BlockSize, BlockType, CustomBackground, LawyerId, LayoutMode, ProfileBlock,
    StylePreset, TemplateId, TextColorMode,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Built-in and custom templates
    #[command(subcommand)]
    Templates(TemplatesCommand),

    /// A lawyer's stored profile
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// List every template, built-ins first
    List,

    /// Show one template's blocks
    Show { id: String },

    /// Replace a lawyer's profile with a template
    Apply {
        id: String,
        #[arg(long)]
        lawyer: String,
    },

    /// Save a lawyer's current profile as a custom template
    Save {
        #[arg(long)]
        lawyer: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Creator email recorded on the template
        #[arg(long)]
        creator: Option<String>,
    },

    /// Delete a custom template
    Delete {
        id: String,
        /// Must match the template's creator when one is recorded
        #[arg(long)]
        creator: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Print the page layout as visitors see it
    Show {
        #[arg(long)]
        lawyer: String,
        /// Narrow mobile layout
        #[arg(long)]
        compact: bool,
    },

    /// Append a block
    Add {
        #[arg(long)]
        lawyer: String,
        /// TEXT, MEDIA, STATS, ...
        block_type: String,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },

    /// Move a block to another block's position
    Move {
        #[arg(long)]
        lawyer: String,
        source: String,
        target: String,
    },

    /// Remove a block
    Remove {
        #[arg(long)]
        lawyer: String,
        block: String,
    },

    /// Restyle a block with a preset, `#hex`, or `gradient:#from:#to`
    Style {
        #[arg(long)]
        lawyer: String,
        block: String,
        style: String,
        /// light, dark, or auto (custom colors only)
        #[arg(long)]
        text: Option<String>,
    },
}

pub async fn run(command: Command, config: &BuilderConfig, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Templates(cmd) => {
            let catalog = TemplateCatalog::new(
                config
                    .template_store()
                    .context("failed to open template store")?,
            );
            run_templates(cmd, config, &catalog, out).await
        }
        Command::Profile(cmd) => run_profile(cmd, config, out).await,
    }
}

async fn open_session(config: &BuilderConfig, lawyer: &str) -> Result<ProfileSession<FsProfileStore>> {
    let lawyer = LawyerId::from_raw(lawyer.trim());
    ProfileSession::open(
        config.profile_store(),
        lawyer.clone(),
        config.delete_confirm_timeout(),
    )
    .await
    .with_context(|| format!("failed to load profile for {lawyer}"))
}

async fn run_templates<R: TemplateRepository>(
    cmd: TemplatesCommand,
    config: &BuilderConfig,
    catalog: &TemplateCatalog<R>,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        TemplatesCommand::List => {
            for template in catalog.list().await? {
                let kind = if template.is_default { "built-in" } else { "custom" };
                writeln!(
                    out,
                    "{}\t{}\t{} blocks\t{}\t{}",
                    template.id,
                    template.name,
                    template.blocks.len(),
                    kind,
                    template.description
                )?;
            }
        }
        TemplatesCommand::Show { id } => {
            let id = TemplateId::from_raw(id);
            let template = catalog
                .find(&id)
                .await?
                .ok_or_else(|| anyhow!("no template with id {id}"))?;
            writeln!(out, "{} ({})", template.name, template.id)?;
            writeln!(out, "{}", template.description)?;
            for block in &template.blocks {
                write_block_line(out, block)?;
            }
        }
        TemplatesCommand::Apply { id, lawyer } => {
            let blocks = catalog.instantiate(&TemplateId::from_raw(id)).await?;
            let mut session = open_session(config, &lawyer).await?;
            session.apply_blocks(blocks);
            session.save().await.context("failed to save profile")?;
            writeln!(out, "applied {} blocks", session.canvas().len())?;
        }
        TemplatesCommand::Save {
            lawyer,
            name,
            description,
            creator,
        } => {
            let session = open_session(config, &lawyer).await?;
            let template = session
                .save_as_template(catalog, &name, &description, creator.as_deref())
                .await?;
            writeln!(out, "{}", template.id)?;
        }
        TemplatesCommand::Delete { id, creator } => {
            catalog
                .delete(&TemplateId::from_raw(id), creator.as_deref())
                .await?;
            writeln!(out, "deleted")?;
        }
    }
    Ok(())
}

async fn run_profile(cmd: ProfileCommand, config: &BuilderConfig, out: &mut impl Write) -> Result<()> {
    match cmd {
        ProfileCommand::Show { lawyer, compact } => {
            let store = config.profile_store();
            let records = store
                .load(&LawyerId::from_raw(lawyer.trim()))
                .await?
                .unwrap_or_default();
            let mode = if compact {
                LayoutMode::Compact
            } else {
                config.layout_mode()
            };
            write_plan(out, &plan_stored(records, mode))?;
        }
        ProfileCommand::Add {
            lawyer,
            block_type,
            size,
            title,
        } => {
            let block_type = BlockType::parse(&block_type)?;
            let size = size.as_deref().map(BlockSize::parse).transpose()?;
            let mut session = open_session(config, &lawyer).await?;
            let id = session.add_block(block_type);
            {
                let (canvas, panel) = session.parts_mut();
                if let Some(size) = size {
                    panel.set_size(canvas, size)?;
                }
                if let Some(title) = title.as_deref() {
                    panel.set_title(canvas, title)?;
                }
            }
            session.save().await.context("failed to save profile")?;
            writeln!(out, "{id}")?;
        }
        ProfileCommand::Move {
            lawyer,
            source,
            target,
        } => {
            let mut session = open_session(config, &lawyer).await?;
            let source = resolve_block(session.canvas().blocks(), &source)?;
            let target = resolve_block(session.canvas().blocks(), &target)?;
            if session.reorder(&source, &target)? {
                session.save().await.context("failed to save profile")?;
            }
        }
        ProfileCommand::Remove { lawyer, block } => {
            let mut session = open_session(config, &lawyer).await?;
            let id = resolve_block(session.canvas().blocks(), &block)?;
            let removed = session.remove(&id)?;
            session.save().await.context("failed to save profile")?;
            writeln!(out, "removed {} {}", removed.block_type(), removed.id.short())?;
        }
        ProfileCommand::Style {
            lawyer,
            block,
            style,
            text,
        } => {
            let text = text.as_deref().map(TextColorMode::parse).transpose()?;
            let choice = parse_style(&style)?;
            let mut session = open_session(config, &lawyer).await?;
            let id = resolve_block(session.canvas().blocks(), &block)?;
            session.select(Some(&id))?;
            {
                let (canvas, panel) = session.parts_mut();
                match choice {
                    StyleChoice::Preset(preset) => {
                        if text.is_some() {
                            bail!("--text only applies to custom colors");
                        }
                        panel.set_style_preset(canvas, preset)?;
                    }
                    StyleChoice::Custom(background) => {
                        panel.set_custom_colors(canvas, background, text.unwrap_or_default())?;
                    }
                }
                panel.close(canvas);
            }
            session.save().await.context("failed to save profile")?;
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
enum StyleChoice {
    Preset(StylePreset),
    Custom(CustomBackground),
}

fn parse_style(input: &str) -> Result<StyleChoice> {
    if let Some(preset) = StylePreset::from_str(input.trim()) {
        return Ok(StyleChoice::Preset(preset));
    }
    let background = CustomBackground::parse(input)
        .with_context(|| format!("'{input}' is neither a preset nor a color"))?;
    Ok(StyleChoice::Custom(background))
}

/// Find a block by full id, or by a prefix that matches exactly one block.
fn resolve_block(blocks: &[ProfileBlock], needle: &str) -> Result<BlockId> {
    let needle = needle.trim();
    if let Some(block) = blocks.iter().find(|b| b.id.as_str() == needle) {
        return Ok(block.id.clone());
    }
    let mut matches = blocks.iter().filter(|b| b.id.matches_prefix(needle));
    match (matches.next(), matches.next()) {
        (Some(block), None) if !needle.is_empty() => Ok(block.id.clone()),
        (Some(_), Some(_)) => bail!("'{needle}' matches more than one block"),
        _ => bail!("no block matching '{needle}'"),
    }
}

fn write_block_line(out: &mut impl Write, block: &ProfileBlock) -> Result<()> {
    let style = match block.style.custom_bg_color() {
        Some(bg) => bg,
        None => block.style.preset_name().to_string(),
    };
    writeln!(
        out,
        "  {:>2}  {:<14} {:<7} {:<24} {}",
        block.order,
        block.block_type(),
        block.size.as_str(),
        style,
        block.display_title()
    )?;
    Ok(())
}

fn write_plan(out: &mut impl Write, plan: &LayoutPlan) -> Result<()> {
    let LayoutPlan::Grid { mode, columns, cells } = plan else {
        writeln!(out, "(empty profile)")?;
        return Ok(());
    };
    writeln!(out, "{mode:?} layout, {columns} columns")?;
    for cell in cells {
        let span = cell.span();
        match cell {
            Cell::Block(block) => writeln!(
                out,
                "  {:<10} {:<14} {}x{}  {}",
                block.id.short(),
                block.block_type,
                span.columns,
                span.rows,
                block.title
            )?,
            Cell::Placeholder(p) => writeln!(
                out,
                "  {:<10} {:<14} {}x{}  unavailable: {}",
                p.id.as_deref().unwrap_or("?"),
                "-",
                span.columns,
                span.rows,
                p.reason
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexfolio_builder::TemplateStoreKind;
    use lexfolio_types::HexColor;

    fn config(dir: &std::path::Path) -> BuilderConfig {
        BuilderConfig {
            data_dir: Some(dir.to_path_buf()),
            template_store: TemplateStoreKind::Blob,
            ..BuilderConfig::default()
        }
    }

    async fn run_to_string(command: Command, config: &BuilderConfig) -> Result<String> {
        let mut out = Vec::new();
        run(command, config, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_parse_style() {
        assert_eq!(
            parse_style("Dark").unwrap(),
            StyleChoice::Preset(StylePreset::Dark)
        );
        assert_eq!(
            parse_style("#112233").unwrap(),
            StyleChoice::Custom(CustomBackground::Solid(HexColor::rgb(0x11, 0x22, 0x33)))
        );
        assert!(matches!(
            parse_style("gradient:#667eea:#764ba2").unwrap(),
            StyleChoice::Custom(CustomBackground::Gradient { .. })
        ));
        assert!(parse_style("neon").is_err());
    }

    #[test]
    fn test_resolve_block_by_prefix() {
        let blocks = vec![
            ProfileBlock::builder(BlockType::Text).id("t1-b1").build(),
            ProfileBlock::builder(BlockType::Stats).id("t1-b2").build(),
            ProfileBlock::builder(BlockType::Map).id("x9").build(),
        ];
        assert_eq!(resolve_block(&blocks, "t1-b2").unwrap().as_str(), "t1-b2");
        assert_eq!(resolve_block(&blocks, "x").unwrap().as_str(), "x9");
        assert!(resolve_block(&blocks, "t1").is_err());
        assert!(resolve_block(&blocks, "zz").is_err());
        assert!(resolve_block(&blocks, "").is_err());
    }

    #[tokio::test]
    async fn test_profile_commands_persist() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        let empty = run_to_string(
            Command::Profile(ProfileCommand::Show {
                lawyer: "avocat-1".into(),
                compact: false,
            }),
            &config,
        )
        .await
        .unwrap();
        assert!(empty.contains("empty profile"));

        let added = run_to_string(
            Command::Profile(ProfileCommand::Add {
                lawyer: "avocat-1".into(),
                block_type: "testimonials".into(),
                size: Some("wide".into()),
                title: Some("Clients".into()),
            }),
            &config,
        )
        .await
        .unwrap();
        let id = added.trim().to_string();

        run_to_string(
            Command::Profile(ProfileCommand::Style {
                lawyer: "avocat-1".into(),
                block: id.clone(),
                style: "#1e293b".into(),
                text: Some("light".into()),
            }),
            &config,
        )
        .await
        .unwrap();

        let stored = config
            .profile_store()
            .load(&LawyerId::from_raw("avocat-1"))
            .await
            .unwrap()
            .unwrap();
        // Starter set plus the new block.
        assert_eq!(stored.len(), 4);
        assert_eq!(stored[3]["id"], id.as_str());
        assert_eq!(stored[3]["size"], "wide");
        assert_eq!(stored[3]["title"], "Clients");
        assert_eq!(stored[3]["stylePreset"], "custom");
        assert_eq!(stored[3]["customBgColor"], "#1e293b");

        let shown = run_to_string(
            Command::Profile(ProfileCommand::Show {
                lawyer: "avocat-1".into(),
                compact: true,
            }),
            &config,
        )
        .await
        .unwrap();
        assert!(shown.contains("Compact layout, 2 columns"));
        assert!(shown.contains("Clients"));
    }

    #[tokio::test]
    async fn test_template_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        let listed = run_to_string(Command::Templates(TemplatesCommand::List), &config)
            .await
            .unwrap();
        assert_eq!(listed.lines().count(), 5);

        run_to_string(
            Command::Templates(TemplatesCommand::Apply {
                id: "template-4".into(),
                lawyer: "avocat-2".into(),
            }),
            &config,
        )
        .await
        .unwrap();

        let saved = run_to_string(
            Command::Templates(TemplatesCommand::Save {
                lawyer: "avocat-2".into(),
                name: "Mine".into(),
                description: String::new(),
                creator: Some("me@cabinet.fr".into()),
            }),
            &config,
        )
        .await
        .unwrap();
        let id = saved.trim().to_string();

        let listed = run_to_string(Command::Templates(TemplatesCommand::List), &config)
            .await
            .unwrap();
        assert_eq!(listed.lines().count(), 6);

        let denied = run_to_string(
            Command::Templates(TemplatesCommand::Delete {
                id: id.clone(),
                creator: Some("someone@else.fr".into()),
            }),
            &config,
        )
        .await;
        assert!(denied.is_err());

        run_to_string(
            Command::Templates(TemplatesCommand::Delete {
                id,
                creator: Some("me@cabinet.fr".into()),
            }),
            &config,
        )
        .await
        .unwrap();
    }
}
