use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

/// A currency-marked amount found inside a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceMatch {
    pub value: Decimal,
    pub matched_span: String,
}

impl PriceMatch {
    /// Removes the first occurrence of the matched token from `line` and
    /// returns the trimmed rest.
    pub fn strip(&self, line: &str) -> String {
        line.replacen(&self.matched_span, "", 1).trim().to_string()
    }
}

fn price_patterns() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // € 12.50, EUR 12,50
            Regex::new(r"(?:€|EUR)\s*(\d+[.,]\d{2})").unwrap(),
            // 12,50 €
            Regex::new(r"(\d+[.,]\d{2})\s*€").unwrap(),
        ]
    })
}

/// Finds the first price in `line`. Patterns are tried in priority order and
/// the first one with any hit decides; a hit that does not convert to a
/// number leaves the line without a price.
pub fn find_price(line: &str) -> Option<PriceMatch> {
    let caps = price_patterns().iter().find_map(|re| re.captures(line))?;
    let token = caps.get(0)?;
    let amount = caps.get(1)?.as_str().replace(',', ".");

    match Decimal::from_str(&amount) {
        Ok(value) => Some(PriceMatch {
            value,
            matched_span: token.as_str().to_string(),
        }),
        Err(err) => {
            tracing::debug!("ignoring malformed price {:?}: {err}", token.as_str());
            None
        }
    }
}
