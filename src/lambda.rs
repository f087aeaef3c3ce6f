use chrono::NaiveDate;
use lambda_runtime::LambdaEvent;
use serde::Serialize;
use serde_json::Value;

use crate::api::parse_date_param;
use crate::menu::{Dish, ParsedMenu};

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub date: Option<NaiveDate>,
    pub found: bool,
    pub dishes: Vec<Dish>,
}

/// Reads `key` from the payload itself, then from `queryStringParameters`,
/// then from `pathParameters`.
pub fn parse_payload<T>(event: &LambdaEvent<Value>, key: &str) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    lookup_payload(&event.payload, key)
}

fn lookup_payload<T>(payload: &Value, key: &str) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    payload
        .get(key)
        .or_else(|| {
            payload
                .get("queryStringParameters")
                .and_then(|qs| qs.get(key))
        })
        .or_else(|| payload.get("pathParameters").and_then(|pp| pp.get(key)))
        .and_then(|v| {
            if let Some(s) = v.as_str() {
                if let Ok(result) = serde_json::from_str::<T>(s) {
                    return Some(result);
                }
                let quoted = format!("\"{}\"", s);
                if let Ok(result) = serde_json::from_str::<T>(&quoted) {
                    return Some(result);
                }
            }
            serde_json::from_value(v.clone()).ok()
        })
}

pub fn requested_date(event: &LambdaEvent<Value>) -> Option<NaiveDate> {
    parse_payload::<String>(event, "date").and_then(|raw| parse_date_param(&raw))
}

/// Answers with the parsed document, or with no dishes when the caller asked
/// for a different date than the document carries.
pub fn build_response(menu: ParsedMenu, requested: Option<NaiveDate>) -> MenuResponse {
    match requested {
        Some(date) if menu.date != Some(date) => MenuResponse {
            date: Some(date),
            found: false,
            dishes: Vec::new(),
        },
        _ => MenuResponse {
            date: menu.date,
            found: !menu.dishes.is_empty(),
            dishes: menu.dishes,
        },
    }
}
