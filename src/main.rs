use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use warp::Filter;

use ollama_chat::config::AppConfig;
use ollama_chat::history;
use ollama_chat::llm::{Generator, OllamaClient};
use ollama_chat::reject::handle_rejection;
use ollama_chat::routes::configure_routes;
use ollama_chat::store::{Store, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AppConfig::from_env()?;

    let store_config = StoreConfig::from_connection_string(&config.database_url)?;
    let store = Store::new(store_config).await?;
    store.init_schema().await?;
    info!("database ready");

    let generator: Arc<dyn Generator> = Arc::new(OllamaClient::new(
        config.ollama_url.clone(),
        config.model_name.clone(),
    )?);
    let history = history::shared();
    let api_token = Arc::new(config.api_token.clone());

    let routes =
        configure_routes(store, generator, history, api_token).recover(handle_rejection);

    info!(addr = %config.bind_addr, "starting server");
    warp::serve(routes).run(config.bind_addr).await;

    Ok(())
}
