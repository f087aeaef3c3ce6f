use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::sync::{self, AppState};

#[derive(Deserialize)]
pub struct MenuQuery {
    pub date: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/menu", get(get_menu))
        .route("/api/menu/dates", get(get_dates))
        .route("/api/menu/sync", post(sync_menu))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// `GET /`
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Lengauer's Bistro API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "get_menu": "/api/menu?date=YYYY-MM-DD",
            "available_dates": "/api/menu/dates",
            "manual_sync": "/api/menu/sync (POST)"
        }
    }))
}

/// `GET /api/health`
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// `GET /api/menu?date=YYYY-MM-DD`
pub async fn get_menu(State(state): State<AppState>, Query(params): Query<MenuQuery>) -> Response {
    let Some(raw) = params.date.as_deref() else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'date' parameter".to_string());
    };
    let date = match parse_date_param(raw) {
        Some(date) => date,
        None => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid date format. Use YYYY-MM-DD (e.g., 2026-02-03)".to_string(),
            );
        }
    };

    let items = state.store.menu_for(date);
    if items.is_empty() {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("No menu found for {}", format_date(date)),
        );
    }
    Json(items).into_response()
}

/// `GET /api/menu/dates`
pub async fn get_dates(State(state): State<AppState>) -> impl IntoResponse {
    let dates: Vec<String> = state.store.dates().into_iter().map(format_date).collect();
    Json(json!({ "dates": dates }))
}

/// `POST /api/menu/sync`
pub async fn sync_menu(State(state): State<AppState>) -> Response {
    match sync::sync_once(&state).await {
        Ok(report) => {
            let mut body = json!(report);
            body["success"] = json!(true);
            Json(body).into_response()
        }
        Err(err) => {
            tracing::error!("Failed to sync from PDF: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": format!("Failed to sync from PDF: {err}"),
                })),
            )
                .into_response()
        }
    }
}

fn error_response(status: StatusCode, detail: String) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

pub fn parse_date_param(input: &str) -> Option<NaiveDate> {
    let parts: Vec<_> = input
        .split(|c| c == '-' || c == '/')
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let year = parts[0].parse::<i32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let day = parts[2].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}
