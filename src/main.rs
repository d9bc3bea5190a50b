use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chordgen::connector::api::{Container, ContainerConfig, Router};
use chordgen::{Backend, Commands};

#[derive(Parser)]
#[command(name = "chordgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generation backend used for this run
    #[arg(long, global = true, value_enum, default_value_t = Backend::Local)]
    backend: Backend,

    /// Base URL of the chord-generation service (env: CHORDGEN_SERVICE_URL)
    #[arg(long, global = true)]
    service_url: Option<String>,

    /// Base URL of the chat-completion API (env: OPENAI_BASE_URL)
    #[arg(long, global = true)]
    llm_base_url: Option<String>,

    /// Chat model name (env: OPENAI_MODEL)
    #[arg(long, global = true)]
    llm_model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let container = Container::new(ContainerConfig {
        backend: cli.backend,
        service_url: cli.service_url,
        llm_base_url: cli.llm_base_url,
        llm_model: cli.llm_model,
        api_key: None,
    })?;

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
