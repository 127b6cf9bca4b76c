use domain::gateway;
use log::*;
use migration::{Migrator, MigratorTrait};
use service::config::Config;
use service::logging::Logger;
use std::sync::Arc;
use web::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();

    Logger::init_logger(&config);

    info!("Starting up in {} mode", config.runtime_env());

    let database_connection = Arc::new(
        service::init_database(&config)
            .await
            .expect("Failed to connect to the database"),
    );

    Migrator::up(database_connection.as_ref(), None)
        .await
        .expect("Failed to run database migrations");

    // Remote capability clients are built once here and injected; handlers
    // never construct their own.
    let providers = Arc::new(gateway::build_providers(&config).expect("Failed to build AI providers"));
    let blob_store = gateway::build_blob_store(&config)
        .expect("Failed to build blob store client")
        .map(Arc::new);

    match providers.verify_language_credentials().await {
        Ok(true) => info!("Language provider credentials verified"),
        Ok(false) => warn!("Language provider rejected its credentials; requests will fail"),
        Err(err) => warn!("Could not verify language provider credentials: {err}"),
    }

    let app_state = AppState::new(config.clone(), &database_connection, providers, blob_store);
    let router = web::router::define_routes(app_state);

    let interface = config.interface.as_deref().unwrap_or("127.0.0.1");
    let listen_address = format!("{}:{}", interface, config.port);

    info!("Listening on {listen_address}");

    let listener = tokio::net::TcpListener::bind(&listen_address)
        .await
        .expect("Failed to bind listen address");

    axum::serve(listener, router)
        .await
        .expect("Server terminated abnormally");
}
