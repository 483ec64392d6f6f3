use std::io;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitcenter::center::FitnessCenter;
use fitcenter::cli::{Cli, Command};
use fitcenter::config::Config;
use fitcenter::text::TextInterface;
use fitcenter::version::GIT_VERSION;
use fitcenter::{db, migrations, routes, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let command = cli.command();
    let (host, port) = match &command {
        Command::Serve { host, port } => (host.clone(), *port),
        _ => (None, None),
    };
    let config = Config::from_env().with_overrides(cli.database_url.clone(), host, port);

    tracing::info!(version = GIT_VERSION, "Connecting to database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;
    let center = FitnessCenter::new(pool);

    match command {
        Command::Serve { .. } => serve(center, &config).await,
        Command::Text => {
            let stdin = io::stdin();
            let mut text = TextInterface::new(center, stdin.lock(), io::stdout());
            text.run().await?;
            Ok(())
        }
        Command::Seed => {
            if seed::seed_sample_data(&center).await? {
                println!("Sample data loaded.");
            } else {
                println!("Database already has members; nothing loaded.");
            }
            Ok(())
        }
    }
}

async fn serve(center: FitnessCenter, config: &Config) -> anyhow::Result<()> {
    let app = routes::create_router(center);

    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
