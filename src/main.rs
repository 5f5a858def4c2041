use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;
use tracing::info;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod store;
mod telemetry;
mod validation;

use config::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;
    let _guard = telemetry::init_tracing(&config)?;

    info!(
        addr = %config.server_addr,
        backend = %config.store_backend,
        api_prefix = %config.api_prefix,
        "Server starting..."
    );

    let store = store::connect(&config).await?;
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(routes::normalize_path())
            .configure(routes::configure_docs)
            .app_data(Data::from(store.clone()))
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
