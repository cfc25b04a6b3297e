//! Seed the standard accounts into the document store
//!
//! Existing users are left untouched.

use std::sync::Arc;

use fieldbook::{
    config::CONFIG,
    db::{JsonFilePersistence, Store, seed_users},
    logging::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&CONFIG.server);

    let persistence = Arc::new(JsonFilePersistence::new(CONFIG.storage.db_file.clone()));
    let store = Store::open(persistence).await?;

    let report = seed_users(&store, &CONFIG.booking.admin_password).await?;

    tracing::info!(
        path = %CONFIG.storage.db_file.display(),
        created = report.created_users.len(),
        migrated = report.migrated_passwords,
        "Seeding complete"
    );
    Ok(())
}
