use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const DATE_FORMATS: [&str; 3] = ["%d.%m.%Y", "%d/%m/%Y", "%Y-%m-%d"];

fn date_patterns() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4})").unwrap(),
            Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").unwrap(),
        ]
    })
}

/// Finds the first date literal in `text` and returns it as `DD.MM.YYYY`.
///
/// The dotted form is searched first; the slashed form only when no dotted
/// literal exists anywhere in the text.
pub fn find_date_literal(text: &str) -> Option<String> {
    let caps = date_patterns().iter().find_map(|re| re.captures(text))?;
    let day = caps.get(1)?.as_str();
    let month = caps.get(2)?.as_str();
    let year = caps.get(3)?.as_str();
    Some(format!("{day:0>2}.{month:0>2}.{year}"))
}

/// Parses a normalized date string against the accepted formats in order.
pub fn parse_date_string(input: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Scans raw page text for the menu date.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let literal = find_date_literal(text)?;
    let date = parse_date_string(&literal);
    if date.is_none() {
        tracing::debug!("date literal {literal} matched no known format");
    }
    date
}
