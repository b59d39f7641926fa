use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nlm_web::api::{self, SecurityConfig};
use nlm_web::config::Settings;
use nlm_web::nlm::NotebookService;

#[derive(Parser)]
#[command(name = "nlm-web")]
#[command(about = "Web interface and REST API for NotebookLM via the nlm CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind (overrides NLM_WEB_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides NLM_WEB_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print all notebooks as JSON
    List,
}

/// Initialize tracing, to stderr when stdout carries command output
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "nlm_web=debug,tower_http=debug".into()),
    );

    if use_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let service = settings.build_service()?;
    let app = api::create_router_with_config(service, SecurityConfig::from_settings(&settings));

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("nlm-web listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = matches!(cli.command, Some(Commands::List));
    init_tracing(use_stderr);

    let mut settings = Settings::from_env();
    tracing::debug!(?settings, "Loaded settings");

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            serve(settings).await?;
        }
        Some(Commands::List) => {
            let service = settings.build_service()?;
            let notebooks = service.list_notebooks().await?;
            println!("{}", serde_json::to_string_pretty(&notebooks)?);
        }
        None => serve(settings).await?,
    }

    Ok(())
}
