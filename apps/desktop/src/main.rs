use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    fetch_catalog, status, HttpTranslationEngine, PairCatalog, PairSelectionController,
    TranslationController, TranslationOutcome,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod files;
mod session;

use config::{load_settings, normalize_engine_url, Settings};
use session::{render_status, Session};

#[derive(Parser, Debug)]
#[command(name = "codemorph", about = "Translate source code between programming languages")]
struct Args {
    /// Base URL of the translation engine (overrides settings and env).
    #[arg(long)]
    engine_url: Option<String>,
    /// Settings file; defaults to ./codemorph.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the supported language pairs.
    Pairs,
    /// Translate one file and print the result.
    Translate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        target: Option<String>,
        /// Also write the result to the export directory.
        #[arg(long)]
        export: bool,
    },
    /// Interactive session reading commands from stdin (default).
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref());
    if let Some(engine_url) = args.engine_url {
        settings.engine_url = engine_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let engine = Arc::new(HttpTranslationEngine::new(normalize_engine_url(
        &settings.engine_url,
    )?));
    info!(engine_url = engine.base_url(), "using translation engine");

    match args.command.unwrap_or(Command::Shell) {
        Command::Pairs => print_pairs(engine.as_ref()).await,
        Command::Translate {
            input,
            source,
            target,
            export,
        } => translate_once(engine.as_ref(), &settings, &input, source, target, export).await,
        Command::Shell => {
            let preferred = settings.preferred_edge();
            let (session, events) =
                Session::connect(engine, preferred.as_ref(), settings.export_dir.clone()).await;
            session::run(session, events).await;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn print_pairs(engine: &HttpTranslationEngine) -> Result<ExitCode> {
    match fetch_catalog(engine).await {
        Ok(catalog) if catalog.is_empty() => {
            println!("{}", render_or_blank(&status::report_catalog(&catalog, None)));
            Ok(ExitCode::SUCCESS)
        }
        Ok(catalog) => {
            for edge in catalog.edges() {
                println!("{edge}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let message = status::report_catalog(&PairCatalog::empty(), Some(&err));
            eprintln!("{}", render_or_blank(&message));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn translate_once(
    engine: &HttpTranslationEngine,
    settings: &Settings,
    input: &std::path::Path,
    source: Option<String>,
    target: Option<String>,
    export: bool,
) -> Result<ExitCode> {
    let text = files::read_source_file(input).await?;
    let catalog = fetch_catalog(engine).await.unwrap_or_else(|err| {
        warn!(error = %err, "could not load supported pairs; continuing with none");
        PairCatalog::empty()
    });
    let catalog = Arc::new(catalog);

    let mut selection = PairSelectionController::new(Arc::clone(&catalog));
    selection.init(settings.preferred_edge().as_ref());
    if let Some(source) = source {
        selection
            .set_source(&selection.resolve_source(&source))
            .context("cannot select source language")?;
    }
    if let Some(target) = target {
        selection
            .set_target(&selection.resolve_target(&target))
            .context("cannot select target language")?;
    }

    let mut controller = TranslationController::new();
    let outcome = controller
        .submit(engine, &catalog, &selection.selection(), &text)
        .await
        .clone();
    eprintln!("{}", render_or_blank(&status::report(&outcome)));

    match outcome {
        TranslationOutcome::Success { .. } => {
            println!("{}", controller.result());
            if export {
                if let Some(edge) = selection.current_edge() {
                    let path =
                        files::export_translation(&settings.export_dir, &edge.target, controller.result())
                            .await?;
                    eprintln!(
                        "{}",
                        render_or_blank(&client_core::StatusMessage::success(format!(
                            "Exported translation to {}",
                            path.display()
                        )))
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        TranslationOutcome::Error { .. } => {
            println!("{}", controller.result());
            Ok(ExitCode::FAILURE)
        }
        TranslationOutcome::Idle { .. } | TranslationOutcome::InFlight => Ok(ExitCode::FAILURE),
    }
}

fn render_or_blank(message: &client_core::StatusMessage) -> String {
    render_status(message).unwrap_or_default()
}
