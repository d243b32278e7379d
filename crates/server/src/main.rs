mod api;
mod cli;
mod live;
mod router;
mod state;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use brightpath_core::Config;
use brightpath_store::{DocumentStore, JsonFileStore};

use crate::cli::Cli;
use crate::state::AppState;

fn load_config() -> Config {
    brightpath_core::config::load_dotenv();
    Config::from_env()
}

fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    if config.storage.persist {
        Ok(Arc::new(JsonFileStore::new(&config.storage.data_dir)?))
    } else {
        info!("Persistence disabled: contents live in memory only");
        Ok(Arc::new(JsonFileStore::in_memory()))
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    config.log_summary();
    let store = open_store(&config)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = router::build_router(Arc::new(AppState::new(config, store)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config();
    cli.apply(&mut config);

    serve(config).await
}
