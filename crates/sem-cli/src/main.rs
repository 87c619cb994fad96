//! Semantic model CLI
//!
//! Loads `semantics.yaml` from a config directory, registers custom tags and
//! items, and prints the tag forest or item classifications.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sem_classifier::{Semantics, TagRef};
use sem_config::{ItemDefinition, SemanticsConfig, TagDefinition};
use sem_core::{ItemName, Locale};
use sem_registries::{ItemEntry, Registries, Tag, TagOverrides, TagText};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Inspect the semantic tag model and classify configured items
#[derive(Debug, Parser)]
#[command(name = "semantics", version, about, long_about = None)]
struct Cli {
    /// Directory holding semantics.yaml and .storage/
    #[arg(long, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Print the tag forest
    Tags,
    /// Print one JSON classification per item
    Classify,
    /// List the points of an item
    Points {
        #[arg(value_parser = ItemName::from_str)]
        item: ItemName,
        /// At most one Point tag and one Property tag
        filters: Vec<String>,
    },
}

/// Registries and classifier built from a config directory
struct SemanticHost {
    registries: Registries,
    semantics: Semantics,
}

impl SemanticHost {
    /// Load configuration and persisted tags, register custom tags and items
    async fn start(config_dir: PathBuf) -> Result<Self> {
        let config = SemanticsConfig::load(&config_dir)?;
        let locale = config.locale();
        info!(locale = %locale, "Starting semantic model in {:?}", config_dir);

        let registries = Registries::new(&config_dir, locale);
        registries.load_all().await?;

        for definition in &config.tags {
            register_tag(&registries, definition)?;
        }
        registries.save_all().await?;

        registries
            .items
            .extend(config.items.iter().map(item_entry));

        let semantics = Semantics::new(registries.tags.clone(), registries.items.clone());
        Ok(Self {
            registries,
            semantics,
        })
    }

    fn run(&self, command: &Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Tags => {
                for tag in self.registries.tags.all_tags().iter().filter(|t| t.is_root()) {
                    self.write_tree(tag, out)?;
                }
            }
            Command::Classify => {
                for item in self.registries.items.names() {
                    let classification = self.semantics.classify(&item);
                    writeln!(out, "{}", serde_json::to_string(&classification)?)?;
                }
            }
            Command::Points { item, filters } => {
                let filters: Vec<TagRef> = filters.iter().map(|f| TagRef::from(f.as_str())).collect();
                for point in self.semantics.points(item, &filters)? {
                    writeln!(out, "{}", point)?;
                }
            }
        }
        Ok(())
    }

    fn write_tree(&self, tag: &Tag, out: &mut impl Write) -> Result<()> {
        let locale = self.registries.tags.default_locale();
        let synonyms = tag.synonyms_for(locale);
        write!(out, "{:indent$}{} ({})", "", tag.name, tag.label_for(locale), indent = tag.depth() * 2)?;
        if !synonyms.is_empty() {
            write!(out, " [{}]", synonyms.join(", "))?;
        }
        writeln!(out)?;

        for child in self.registries.tags.children(tag) {
            self.write_tree(&child, out)?;
        }
        Ok(())
    }
}

fn register_tag(registries: &Registries, definition: &TagDefinition) -> Result<()> {
    let mut overrides = TagOverrides::default().with_synonyms(definition.synonyms.iter().cloned());
    overrides.label = definition.label.clone();
    overrides.description = definition.description.clone();
    for (locale, text) in &definition.translations {
        let locale: Locale = locale.parse()?;
        let text = TagText {
            label: text.label.clone().unwrap_or_default(),
            synonyms: text.synonyms.clone(),
            description: text.description.clone().unwrap_or_default(),
        };
        overrides = overrides.with_translation(&locale, text);
    }

    let created = registries
        .tags
        .add_with(definition.name.as_str(), definition.parent.as_str(), overrides)
        .with_context(|| format!("registering tag {}", definition.name))?;
    if created.is_none() {
        debug!("Tag {} already registered", definition.name);
    }
    Ok(())
}

fn item_entry(definition: &ItemDefinition) -> ItemEntry {
    let mut entry = ItemEntry::new(definition.name.clone(), definition.item_type.as_str())
        .with_tags(definition.tags.iter().cloned())
        .with_groups(definition.groups.iter().cloned());
    entry.label = definition.label.clone();
    entry
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let host = SemanticHost::start(cli.config).await?;

    let stdout = std::io::stdout();
    host.run(&cli.command, &mut stdout.lock())?;
    Ok(())
}
