use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use nosql::config::MongoSettings;
use nosql::db_mongo::{create_client, get_collection, get_database};
use nosql::log_stats::print_log_stats;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the report, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = MongoSettings::from_env();
    tracing::debug!(
        "Reporting on {}.{}",
        settings.logs_db,
        settings.logs_collection
    );

    let client = create_client(&settings.uri).await?;
    let db = get_database(&client, &settings.logs_db);
    let collection = get_collection(&db, &settings.logs_collection);

    print_log_stats(&collection)
        .await
        .context("Failed to collect nginx log statistics")?;

    Ok(())
}
