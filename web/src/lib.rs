use domain::gateway::blob_store::BlobStoreClient;
use domain::gateway::AiProviders;
use domain::translation::TranslationLocks;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;

mod controller;
mod extractors;
mod params;
mod response;

pub mod error;
pub mod router;

pub use error::Error;

// Application state shared with every request handler. Everything a handler
// reaches for is constructed once at startup and injected here; there are no
// lazily initialized globals.
#[derive(Clone)]
pub struct AppState {
    pub database_connection: Arc<DatabaseConnection>,
    pub config: Config,
    pub ai: Arc<AiProviders>,
    pub blob_store: Option<Arc<BlobStoreClient>>,
    pub translation_locks: Arc<TranslationLocks>,
}

impl AppState {
    pub fn new(
        app_config: Config,
        db: &Arc<DatabaseConnection>,
        ai: Arc<AiProviders>,
        blob_store: Option<Arc<BlobStoreClient>>,
    ) -> Self {
        Self {
            database_connection: Arc::clone(db),
            config: app_config,
            ai,
            blob_store,
            translation_locks: Arc::new(TranslationLocks::new()),
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }
}
