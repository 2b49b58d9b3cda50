use std::sync::Arc;

mod config;
mod functions;
mod schema;
mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = config::Config::from_env()?;

    let lookup = Arc::new(services::OutlineClient::new(&config)?);
    let sink = Arc::new(services::DiscordClient::new(&config)?);
    let relay = Arc::new(functions::Relay::new(
        functions::Dispatcher::new(&config, lookup),
        sink,
    ));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(
        port = config.port,
        included_collections = ?config.include_collections,
        timezone = %config.timezone,
        "outline webhook listening on /outline-webhook"
    );

    axum::serve(listener, functions::router(relay)).await?;
    Ok(())
}
