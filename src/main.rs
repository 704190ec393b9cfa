//! Zed-BOT - terminal chatbot with an intent knowledge base and generative fallback.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zedbot::config::{BotConfig, ConfigLoader, ProviderKind};
use zedbot::dispatch::ResponseDispatcher;
use zedbot::display;
use zedbot::knowledge::{self, KnowledgeLoad};
use zedbot::model::ModelAdapter;
use zedbot::shell::Shell;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    Huggingface,
    Ollama,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Huggingface => ProviderKind::Huggingface,
            ProviderArg::Ollama => ProviderKind::Ollama,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "zedbot",
    about = "Terminal chatbot with an intent knowledge base and generative fallback",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the JSON intents file (overrides the config file).
    #[arg(short, long)]
    knowledge_base: Option<PathBuf>,

    /// Model identifier (overrides the config file).
    #[arg(short, long)]
    model: Option<String>,

    /// Text-generation provider (overrides the config file).
    #[arg(short, long, value_enum)]
    provider: Option<ProviderArg>,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Load configuration and apply CLI overrides.
fn resolve_config(cli: &Cli) -> BotConfig {
    let loader = cli
        .config
        .clone()
        .map_or_else(ConfigLoader::new, ConfigLoader::with_path);

    let mut config = loader.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        display::print_notice("Config file is invalid; falling back to defaults.");
        BotConfig::default()
    });

    if let Some(path) = &cli.knowledge_base {
        config.knowledge_base = path.clone();
    }
    if let Some(model) = &cli.model {
        config.model.model = model.clone();
    }
    if let Some(provider) = cli.provider {
        config.model.provider = provider.into();
        // The hosted default base URL makes no sense for a local server.
        if config.model.provider == ProviderKind::Ollama
            && config.model.base_url == "https://api-inference.huggingface.co"
        {
            config.model.base_url = "http://localhost:11434".to_string();
        }
    }

    config
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli);
    tracing::info!(
        knowledge_base = %config.knowledge_base.display(),
        model = %config.model.model,
        provider = ?config.model.provider,
        "Starting Zed-BOT"
    );

    let load = knowledge::load(&config.knowledge_base);
    match &load {
        KnowledgeLoad::Loaded(_) => {}
        KnowledgeLoad::Missing => display::print_notice(&format!(
            "Knowledge base file '{}' not found. Using empty knowledge base.",
            config.knowledge_base.display()
        )),
        KnowledgeLoad::Invalid(reason) => display::print_notice(&format!(
            "Error loading knowledge base: {reason}. Using empty knowledge base."
        )),
    }
    let base = load.into_base();

    let model = ModelAdapter::load(&config.model).await;
    if !model.is_available() {
        display::print_notice(
            "Error loading model. Please check the model name or internet connection.",
        );
    }

    let dispatcher = ResponseDispatcher::new(base, model);
    let mut shell = Shell::new(dispatcher);
    if let Err(e) = shell.run().await {
        display::print_error(&e.to_string());
        std::process::exit(1);
    }
}
