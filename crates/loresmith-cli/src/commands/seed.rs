//! Seed command: populate the sample document.

use std::sync::Arc;

use loresmith_core::error::AppError;
use loresmith_database::repositories::document::DocumentRepository;
use loresmith_database::repositories::version::VersionRepository;

use crate::output;

/// Execute the seed command
pub async fn execute(env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;

    loresmith_database::migration::run_migrations(&pool).await?;

    let documents = Arc::new(DocumentRepository::new(pool.clone()));
    let versions = Arc::new(VersionRepository::new(pool.clone()));

    loresmith_database::seed::run_seed(&documents, &versions).await?;
    output::print_success("Seed complete.");
    Ok(())
}
