use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{MenuError, Result};
use crate::menu::MenuParser;
use crate::source;
use crate::store::MenuStore;

/// Everything the API handlers and the scheduler share.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Client,
    pub parser: Arc<MenuParser>,
    pub store: MenuStore,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let parser = MenuParser::new(config.noise_filter());
        Ok(Self {
            config: Arc::new(config),
            client: source::build_client()?,
            parser: Arc::new(parser),
            store: MenuStore::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub date: NaiveDate,
    pub items_found: usize,
    pub items_added: usize,
    pub already_existed: bool,
}

/// Fetches the configured document once and stores what it contains.
pub async fn sync_once(state: &AppState) -> Result<SyncReport> {
    let menu = source::fetch_menu(&state.client, &state.config.pdf_url, state.parser.clone()).await?;

    let date = menu.date.ok_or(MenuError::DateNotFound)?;
    if menu.is_empty() {
        return Err(MenuError::NoDishesFound);
    }

    tracing::info!("Found {} items for {date}", menu.dishes.len());
    let items_added = state
        .store
        .insert(date, &menu.dishes, state.config.duplicate_policy);

    Ok(SyncReport {
        date,
        items_found: menu.dishes.len(),
        items_added,
        already_existed: items_added == 0,
    })
}

/// Syncs immediately, then once per configured interval. Never returns.
pub async fn run_scheduler(state: AppState) {
    let mut interval = tokio::time::interval(state.config.sync_interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tracing::info!(
        "Scheduler started. PDF will sync every {} hours",
        state.config.sync_interval_hours
    );

    loop {
        interval.tick().await;
        match sync_once(&state).await {
            Ok(report) => tracing::info!(
                "Sync successful: {} found, {} added for {}",
                report.items_found,
                report.items_added,
                report.date
            ),
            Err(err) => tracing::error!("Sync failed: {err}"),
        }
    }
}
