use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use lengauers_bistro::{Config, MenuParser, lambda, logging, source};
use serde_json::Value;
use std::sync::Arc;

async fn function_handler(event: LambdaEvent<Value>) -> Result<lambda::MenuResponse, Error> {
    let config = Config::from_env()?;
    let requested = lambda::requested_date(&event);
    tracing::info!("Menu requested for {requested:?}");

    let client = source::build_client()?;
    let parser = Arc::new(MenuParser::new(config.noise_filter()));
    let menu = source::fetch_menu(&client, &config.pdf_url, parser).await?;

    let response = lambda::build_response(menu, requested);
    tracing::info!("Returning {} dishes for {:?}", response.dishes.len(), response.date);
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    logging::init_lambda_logger();

    run(service_fn(function_handler)).await
}
