use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use time_capsule_messenger::app::App;
use time_capsule_messenger::models::Config;
use time_capsule_messenger::web::{self, AppState};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "time-capsule-messenger")]
#[command(about = "Write a message to the future and receive a response")]
struct CliArgs {
    /// Address to serve the page on.
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:8501")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "time_capsule_messenger=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting time-capsule-messenger");

    let app = App::new(&config)?;
    let state = AppState::new(app)?;
    let listener = tokio::net::TcpListener::bind(args.bind).await?;

    if let Err(e) = web::serve(listener, web::router(state)).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
