use lengauers_bistro::{AppState, Config, api, logging, sync};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    logging::init_logger();

    let config = Config::from_env()?;
    let addr = config.bind_addr()?;
    tracing::info!("Starting Lengauer's Bistro API, menu source {}", config.pdf_url);

    let state = AppState::new(config)?;
    tokio::spawn(sync::run_scheduler(state.clone()));

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
