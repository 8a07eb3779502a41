mod prerender_initialization;

extern crate dotenv;

use crate::prerender_initialization::prerender_manifest_pages;
use anyhow::{Context, Result};
use dotenv::dotenv;
use podgen_catalog_client::{CatalogClient, CatalogClientSettings};
use podgen_common::environment::{
    get_env_var,
    variables::{LOG_FILTER, WEB_PORT},
};
use podgen_pages::policy::PathManifest;
use podgen_pages::{pages_config, PageRootSpan};
use podgen_store::ArtifactStore;
use std::str::FromStr;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    use actix_web::{web, App, HttpServer};

    dotenv().ok();

    // Set up logging framework, reading filter configuration from the environment variable
    // or defaulting to warning logs and above globally if the filter isn't specified.
    let filter = EnvFilter::try_from_env(LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::default())
        .add_directive(LevelFilter::WARN.into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Initializing podgen...");

    info!("Configuring the catalog client...");
    let settings = CatalogClientSettings::from_environment()?;
    let catalog =
        CatalogClient::new(settings).context("Could not construct the catalog client.")?;

    let store = web::Data::new(ArtifactStore::new());
    let manifest = PathManifest::episodes();

    info!("Pre-rendering any pages listed in the manifest...");
    prerender_manifest_pages(&catalog, &store, &manifest).await?;

    info!("Starting up web server...");
    let manifest_data = web::Data::new(manifest);
    let catalog_data = web::Data::new(catalog);
    let http_server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::<PageRootSpan>::new())
            .app_data(manifest_data.clone())
            .app_data(store.clone())
            .app_data(catalog_data.clone())
            .configure(pages_config::<CatalogClient>)
    })
    .bind(format!("127.0.0.1:{}", get_port()?))?
    .run();

    info!("podgen started!");
    http_server.await?;

    info!("Shutting podgen down.");
    Ok(())
}

fn get_port() -> Result<String> {
    let value = match get_env_var(WEB_PORT) {
        Ok(v) => v,
        Err(_) => String::from("8080"),
    };
    match u16::from_str(&value) {
        Ok(_) => Ok(value),
        Err(e) => Err(e).context(format!("Failed to parse \"{}\" as a valid port.", value)),
    }
}
