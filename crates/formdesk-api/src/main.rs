use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[macro_use]
mod crud;

mod collection_items;
mod collections;
mod config;
mod data_types;
mod error;
mod extract;
mod fields;
mod form_answers;
mod form_fields;
mod form_groups;
mod forms;
mod groups;
mod request_tracing;
mod reserved_names;
mod response;
mod routes;
mod services;
mod submissions;
mod users;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let config = config::load("./app-config.toml")?;
    init_tracing(&config.tracing)?;
    let store = formdesk_db::create(&config.database)
        .await
        .context("creating database store")?;
    let app = routes::setup(AppState { store });
    let listener = tokio::net::TcpListener::bind((config.bind_address.as_str(), config.bind_port))
        .await
        .context("binding listener")?;
    tracing::info!(
        "listening on {}",
        listener.local_addr().context("reading listener address")?
    );
    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_ctrl_c(shutdown.clone()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("serving application")?;
    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &config::TracingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid tracing filter {:?}", config.filter))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(config.ansi))
        .try_init()
        .context("installing tracing subscriber")
}

async fn wait_for_ctrl_c(shutdown: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("shutdown requested");
            shutdown.cancel();
        }
        Err(err) => tracing::error!("unable to listen for shutdown signal: {err}"),
    }
}

#[derive(Clone)]
struct AppState {
    store: formdesk_db::Store,
}
