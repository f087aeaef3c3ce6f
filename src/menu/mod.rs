//! Recovers the menu date and `(dish, price)` records from the plain text of
//! a daily menu document.

pub mod date;
pub mod noise;
pub mod pages;
pub mod price;
pub mod segment;

use rust_decimal::Decimal;
use serde::Serialize;

pub use date::extract_date;
pub use noise::{DEFAULT_NOISE_KEYWORDS, NoiseFilter};
pub use pages::{MenuParser, ParsedMenu};
pub use price::{PriceMatch, find_price};
pub use segment::{join_fragments, segment_dishes};

/// One line of a page, `index` counted from 0 within the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dish {
    pub name: String,
    pub price: Decimal,
}

pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    text.split('\n')
        .enumerate()
        .map(|(index, text)| Line { index, text })
        .collect()
}
