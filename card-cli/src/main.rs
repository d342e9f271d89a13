//! # Saatmishaali
//!
//! Generate a Bengali quote or meme card from the terminal.

use std::process::ExitCode;
use std::sync::Arc;

use card_cli::{AppConfig, CliArgs, Command, Studio, SystemClipboard, TerminalNotifier};
use card_core::{Artifact, Category, Mode, Notifier, Phase, Scene};
use card_export::{
    CardExporter, DirectoryDownloads, ExportConfig, ExportPipeline, RenderSurface, ShareOutcome,
    Sharer,
};
use card_gemini::GeminiClient;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,card_cli=debug,card_gemini=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format in production (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let args = CliArgs::parse();
    let config = AppConfig::from(&args);

    match args.command {
        Command::Categories { mode } => {
            print_categories(mode.into());
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            mode,
            category,
            download,
            share,
            json,
        } => {
            let mode = Mode::from(mode);
            let category = resolve_category(mode, category.as_deref())?;
            generate(config, category, download, share, json).await
        }
    }
}

fn print_categories(mode: Mode) {
    for (index, category) in Category::all(mode).into_iter().enumerate() {
        println!("{:>2}. {} ({})", index + 1, category.label(), category.slug());
    }
}

fn resolve_category(mode: Mode, input: Option<&str>) -> anyhow::Result<Category> {
    card_cli::resolve_category(mode, input).ok_or_else(|| match input {
        Some(input) => anyhow::anyhow!(
            "unknown {} category `{input}` (see `saatmishaali categories --mode {}`)",
            mode.noun(),
            mode.noun()
        ),
        None => anyhow::anyhow!("no {} categories", mode.noun()),
    })
}

async fn generate(
    config: AppConfig,
    category: Category,
    download: bool,
    share: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    tracing::info!(category = %category, model = %config.gemini.model, "Starting Saatmishaali");

    let client = GeminiClient::new(config.gemini)?;
    tracing::debug!(endpoint = %client.endpoint(), "Gemini client ready");

    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let exporter = CardExporter::new(ExportConfig {
        font_dirs: config.font_dirs,
        ..ExportConfig::default()
    });
    let exports = ExportPipeline::new(
        exporter,
        DirectoryDownloads::new(config.out_dir),
        Arc::clone(&notifier),
    );
    let sharer = Sharer::new(
        None,
        Box::new(SystemClipboard),
        Arc::clone(&notifier),
        config.share_url,
    );
    let surface = Arc::new(RenderSurface::new(Scene::new(800.0, 1000.0)));
    let studio = Studio::new(client, surface, exports, sharer, category);

    if studio.generate().await != Phase::Ready {
        let state = studio.state();
        eprintln!(
            "{}",
            state.error_message().unwrap_or("Generation did not complete.")
        );
        return Ok(ExitCode::FAILURE);
    }

    let Some(artifact) = studio.artifact() else {
        return Ok(ExitCode::FAILURE);
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
    } else {
        print_artifact(&artifact);
    }

    let mut code = ExitCode::SUCCESS;
    if download {
        match studio.download().await {
            Ok(Some(path)) => println!("Saved {}", path.display()),
            Ok(None) => {}
            // Already reported through the notifier.
            Err(_) => code = ExitCode::FAILURE,
        }
    }
    if share && studio.share().await == Some(ShareOutcome::Failed) {
        code = ExitCode::FAILURE;
    }

    Ok(code)
}

fn print_artifact(artifact: &Artifact) {
    match artifact {
        Artifact::Quote(quote) => {
            println!("\u{201c}{}\u{201d}", quote.text());
            println!("  - {}", quote.attribution());
            if !quote.theme().is_empty() {
                println!("  #{}", quote.theme());
            }
        }
        Artifact::Meme(meme) => {
            println!("{}", meme.text());
            println!("  [{}]", meme.category());
            if !meme.template_hint().is_empty() {
                println!("  template: {}", meme.template_hint());
            }
        }
    }
    if !artifact.script_confirmed() {
        tracing::warn!("model did not confirm Bengali script");
    }
}
