use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use company_search::config;
use company_search::db;
use company_search::search;
use company_search::store::SqliteStore;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "company_search=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    config::init_config().map_err(anyhow::Error::msg)?;
    let app_config = config::config();
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    // Create data directory if not exists / 创建数据目录
    let data_dir = app_config.get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| app_config.get_database_url());

    let store = SqliteStore::connect(&database_url, app_config.database.max_connections).await?;

    db::run_migrations(store.pool()).await?;
    search::verify_against_schema(store.pool()).await?;

    if std::env::args().any(|arg| arg == "--seed") {
        if db::seed_demo_data(&store).await? {
            tracing::info!("Demo data inserted");
        } else {
            tracing::info!("Database already has companies, skipping seed");
        }
    }

    let state = Arc::new(AppState::new(Arc::new(store), app_config.clone()));
    let app = api::router(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Search socket at ws://{}{}", bind_addr, app_config.search.path);

    axum::serve(listener, app).await?;

    Ok(())
}
