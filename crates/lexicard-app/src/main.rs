use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lexicard_config::Config;
use lexicard_gemini::GeminiClient;
use lexicard_provider::DetailProvider;
use lexicard_types::Language;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod state;
mod ui;


use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "lexicard", about = "Vocabulary flashcards with AI-backed word details")]
struct Cli {
    /// Data directory for the JSON store (default: ~/.lexicard)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Target language code: es, zh
    #[arg(long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Some(code) = cli.language {
        match Language::from_code(&code) {
            Some(language) => config.default_language = language,
            None => {
                let supported: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
                anyhow::bail!(
                    "unknown language code \"{code}\" (supported: {})",
                    supported.join(", ")
                );
            }
        }
    }

    // A missing provider key is fatal at startup; nothing in the app can
    // recover from it, so there is no retry.
    if !config.provider.has_api_key() {
        eprintln!("================================================================");
        eprintln!(" lexicard cannot start: the Gemini API key is not configured.");
        eprintln!(" Set GEMINI_API_KEY (or API_KEY) in the environment or a .env");
        eprintln!(" file and run again.");
        eprintln!("================================================================");
        std::process::exit(1);
    }

    let provider: Arc<dyn DetailProvider> = Arc::new(GeminiClient::new(
        config.provider.api_key.clone(),
        config.provider.api_url.clone(),
        config.provider.model.clone(),
    ));

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(provider);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task finished"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
            controller.shutdown();
        }
    }

    tasks.shutdown().await;
    Ok(())
}
