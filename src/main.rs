use device_inventory::{
    api::{self, AppState},
    config::{database, settings},
    core::seed,
    errors::Result,
};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load settings (config.toml + environment overrides)
    let settings = settings::load_app_settings()
        .inspect_err(|e| error!("Critical error loading configuration: {}", e))?;
    info!("Loaded configuration: {:?}", settings);

    // 4. Connect and make sure the schema exists
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Optional sample data
    if settings.seed_sample_data {
        seed::seed_sample_data(&db)
            .await
            .inspect_err(|e| error!("Failed to seed sample data: {}", e))?;
    }

    // 6. Serve the API
    let app = api::router(AppState { db });
    let address = settings.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", address, e))?;
    info!("Device inventory API listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
