use reqwest::Client;
use std::sync::Arc;

use crate::error::Result;
use crate::menu::{MenuParser, ParsedMenu};

pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
        .no_proxy()
        .user_agent("lengauers-bistro/0.1")
        .build()?;
    Ok(client)
}

pub async fn download_pdf(client: &Client, url: &str) -> Result<Vec<u8>> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    tracing::debug!("downloaded {} bytes from {url}", bytes.len());
    Ok(bytes.to_vec())
}

/// Plain text of every page, in page order.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)?;
    Ok(pages)
}

pub fn parse_pdf(bytes: &[u8], parser: &MenuParser) -> Result<ParsedMenu> {
    let pages = extract_pages(bytes)?;
    tracing::debug!("extracted {} pages", pages.len());
    Ok(parser.parse_pages(&pages))
}

/// Downloads the menu document and parses it off the async runtime.
pub async fn fetch_menu(client: &Client, url: &str, parser: Arc<MenuParser>) -> Result<ParsedMenu> {
    tracing::info!("Downloading PDF from {url}");
    let bytes = download_pdf(client, url).await?;
    tokio::task::spawn_blocking(move || parse_pdf(&bytes, &parser)).await?
}
