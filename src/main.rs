mod books_client;
mod config;
mod controllers;
mod domain;
mod web;

use std::{path::Path, sync::Arc};

use anyhow::Context;
use books_client::BooksClient;
use config::Config;
use poem::{
    EndpointExt, Route, Server,
    listener::TcpListener,
    middleware::{Cors, Tracing as PoemTracing},
};
use poem_openapi::OpenApiService;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder, prelude::*};

type BookLibResult<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() -> BookLibResult<()> {
    // Respect RUST_LOG if set, default to info for our crate and warn for deps.
    let default_filter = format!(
        "{}=info,poem=info,reqwest=warn,h2=warn",
        env!("CARGO_PKG_NAME")
    );
    let env_filter = std::env::var("RUST_LOG").unwrap_or(default_filter);
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .with_level(true)
        .pretty()
        .finish()
        .with(ErrorLayer::default())
        .init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting book library");

    if Path::new(".env.local").exists() {
        dotenvy::from_filename(".env.local")?;
    } else if Path::new(".env").exists() {
        dotenvy::from_filename(".env")?;
    };
    let config = Config::load();
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = BooksClient::new(&config.books_api_url)
        .with_context(|| "Failed to build books API client")?;
    tracing::info!(books_api = %config.books_api_url, "configured books client");

    run_poem(Arc::new(client), Arc::new(config)).await?;
    Ok(())
}

pub async fn run_poem(client: Arc<BooksClient>, config: Arc<Config>) -> BookLibResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let api = web::BookLibApi::new(client);
    let api_service =
        OpenApiService::new(api, "Book Library", version).server(config.public_url.clone());
    let ui = api_service.rapidoc();
    let spec = api_service.spec();
    let route = Route::new()
        .nest("/", api_service)
        .nest("/ui", ui)
        .nest("/spec", poem::endpoint::make_sync(move |_| spec.clone()))
        .with(Cors::new())
        .with(PoemTracing);

    let bind_addr = config.bind_addr.clone();
    tracing::info!(%bind_addr, "starting HTTP server");
    Server::new(TcpListener::bind(bind_addr))
        .run(route)
        .await
        .with_context(|| "HTTP server stopped with an error")?;
    Ok(())
}
