use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vec_registry::{config, errors::Result, session::Session};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration (store URL, allow-list, gateway)
    let app_config = config::load_app_config()?;
    info!(
        admins = app_config.admins.len(),
        "Successfully processed application configuration."
    );

    // 4. Connect to the reference data store and ensure the collections exist
    let db = config::database::create_connection(&app_config.database_url).await?;
    config::database::create_tables(&db).await?;
    info!("Store initialized successfully.");

    // 5. Open a session and warm up the reference-data mirrors
    let session = Session::start(db, &app_config).await?;
    info!(
        cities = session.cities().len(),
        schools = session.schools().len(),
        "Reference data loaded."
    );

    Ok(())
}
