use clap::{Parser, Subcommand};
use person_records::api::{self, app_state::AppState};
use person_records::config::config::AppConfig;
use person_records::config::loader::ConfigLoader;
use person_records::observability::init_tracing;
use person_records::storage::factory::StorageFactory;
use std::path::PathBuf;
use tracing::{error, info};

/// Person records HTTP service.
#[derive(Parser, Debug)]
#[command(name = "person-records")]
#[command(about = "HTTP service for creating and listing person records")]
#[command(version)]
struct Args {
    /// Configuration file (TOML or YAML). Defaults to ./config.toml and ./config.yaml.
    #[arg(short, long, global = true, env = "PERSON_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the schema migration, then serve HTTP (default).
    Serve,

    /// Run the schema migration and exit.
    Migrate,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };
    ConfigLoader::validate(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let _log_guard = init_tracing(&config.logging)?;
    info!(
        environment = %config.environment,
        backend = %config.database.backend,
        "Configuration loaded successfully"
    );

    let storage = StorageFactory::create(&config.database).await?;
    info!("Storage initialized");

    if let Err(e) = storage.migrate().await {
        error!("Schema migration failed: {}", e);
        return Err(e.into());
    }

    if let Some(Command::Migrate) = args.command {
        info!("Migration finished");
        return Ok(());
    }

    let app_state = AppState::new(
        storage.repository(),
        config.server.request_timeout(),
        config.server.max_request_size,
    );
    let router = api::create_router(app_state);
    info!("API router created");

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
