use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdv_core::config::{
    debounce_from_env_value, display_mode_from_env_value, locale_from_env_value, DEBOUNCE_ENV,
    DISPLAY_MODE_ENV, LOCALE_ENV,
};
use pdv_core::{
    build_tree, display_mode_writer, resolve_fields, Catalog, DisplayMode, Locale,
    NavigationDispatcher, NoTranslation, SectionSignals, SectionVisibility, Translator,
    ViewCache, ViewConfig, ViewInputs,
};

#[derive(Parser)]
#[command(name = "pdv")]
#[command(about = "Product detail view CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigation tree rebuilt from block paths
    Tree {
        /// CMS block document (JSON or YAML)
        blocks: PathBuf,
    },
    /// Print resolved field values per block
    Fields {
        /// CMS block document (JSON or YAML)
        blocks: PathBuf,
        /// Product data payload (JSON or YAML)
        payload: PathBuf,
        /// Locale for date formatting (defaults to PDV_LOCALE)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Print section presence signals and visibility
    Visibility {
        /// Product data payload (JSON or YAML)
        payload: PathBuf,
        /// internal or external (defaults to PDV_DISPLAY_MODE)
        #[arg(long)]
        mode: Option<String>,
    },
    /// Print the full view: sidebar, sections and visibility
    Render {
        /// CMS block document (JSON or YAML)
        blocks: PathBuf,
        /// Product data payload (JSON or YAML)
        payload: PathBuf,
        /// Translation catalog (YAML or JSON mapping)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// internal or external (defaults to PDV_DISPLAY_MODE)
        #[arg(long)]
        mode: Option<String>,
        /// Locale tag (defaults to PDV_LOCALE)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Resolve a translated sidebar label to its scroll target
    Navigate {
        /// Label as shown in the sidebar
        label: String,
        /// Translation catalog (YAML or JSON mapping)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Locale tag (defaults to PDV_LOCALE)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Apply display mode toggles and print the debounced query write
    PersistMode {
        /// Modes in the order they were selected
        #[arg(required = true)]
        modes: Vec<String>,
    },
}

/// Entry point for the `pdv` binary.
///
/// # Environment Variables
/// - `PDV_DEBOUNCE_MS`: debounce for display mode writes (default: 120)
/// - `PDV_LOCALE`: default locale (default: "en-US")
/// - `PDV_DISPLAY_MODE`: default display mode (default: "internal")
/// - `RUST_LOG`: log filter (default directive: "pdv=info")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("pdv=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ViewConfig::new(
        debounce_from_env_value(std::env::var(DEBOUNCE_ENV).ok())?,
        locale_from_env_value(std::env::var(LOCALE_ENV).ok()),
        display_mode_from_env_value(std::env::var(DISPLAY_MODE_ENV).ok())?,
    )?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Tree { blocks } => {
            let blocks = read_blocks(&blocks)?;
            print_json(&build_tree(&blocks))?;
        }
        Commands::Fields {
            blocks,
            payload,
            locale,
        } => {
            let blocks = read_blocks(&blocks)?;
            let payload = read_payload(&payload)?;
            let locale = pick_locale(locale, &config);

            let rows: Vec<_> = blocks
                .iter()
                .map(|block| {
                    json!({
                        "blockId": block.id,
                        "title": block.title,
                        "fields": resolve_fields(&block.fields, &payload, &locale),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
        Commands::Visibility { payload, mode } => {
            let payload = read_payload(&payload)?;
            let mode = pick_mode(mode, &config)?;
            let signals = SectionSignals::from_payload(&payload);

            print_json(&json!({
                "mode": mode,
                "signals": signals,
                "visibility": SectionVisibility::evaluate(&signals, mode),
            }))?;
        }
        Commands::Render {
            blocks,
            payload,
            catalog,
            mode,
            locale,
        } => {
            let locale = pick_locale(locale, &config);
            let translator = load_translator(catalog.as_deref(), &locale)?;
            let inputs = ViewInputs::new(read_blocks(&blocks)?, read_payload(&payload)?, &config)
                .with_display_mode(pick_mode(mode, &config)?)
                .with_locale(locale);

            let view = ViewCache::new().get_or_compute(&inputs, translator.as_ref())?;
            print_json(view.as_ref())?;
        }
        Commands::Navigate {
            label,
            catalog,
            locale,
        } => {
            let locale = pick_locale(locale, &config);
            let translator = load_translator(catalog.as_deref(), &locale)?;
            let dispatcher = NavigationDispatcher::default();

            for (text, keys) in dispatcher.ambiguous_labels(translator.as_ref()) {
                tracing::warn!("label {text:?} is shared by {}", keys.join(", "));
            }

            match dispatcher.resolve_label(&label, translator.as_ref()) {
                Some(target) => println!("{target}"),
                None => anyhow::bail!("no navigation target for label {label:?} in locale {locale}"),
            }
        }
        Commands::PersistMode { modes } => {
            let modes = modes
                .iter()
                .map(|raw| raw.parse::<DisplayMode>())
                .collect::<Result<Vec<_>, _>>()?;

            let writer = display_mode_writer(|query| println!("{query}"), &config)?;
            for mode in modes {
                writer.schedule(mode);
            }
            tokio::time::sleep(writer.delay()).await;
            writer.flush();
        }
    }

    Ok(())
}

fn read_blocks(path: &Path) -> anyhow::Result<Vec<cms::ContentBlock>> {
    cms::read_blocks_file(path).with_context(|| format!("reading blocks from {}", path.display()))
}

fn read_payload(path: &Path) -> anyhow::Result<serde_json::Value> {
    cms::read_document(path).with_context(|| format!("reading payload from {}", path.display()))
}

fn pick_locale(locale: Option<String>, config: &ViewConfig) -> Locale {
    locale
        .map(Locale::new)
        .unwrap_or_else(|| config.default_locale().clone())
}

fn pick_mode(mode: Option<String>, config: &ViewConfig) -> anyhow::Result<DisplayMode> {
    Ok(match mode {
        Some(raw) => raw.parse()?,
        None => config.default_display_mode(),
    })
}

fn load_translator(catalog: Option<&Path>, locale: &Locale) -> anyhow::Result<Box<dyn Translator>> {
    let Some(path) = catalog else {
        return Ok(Box::new(NoTranslation::new(locale.clone())));
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = Catalog::from_yaml(locale.clone(), &text)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    tracing::info!("loaded {} translations for {locale}", catalog.len());
    Ok(Box::new(catalog))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
