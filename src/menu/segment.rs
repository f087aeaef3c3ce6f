use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

use super::noise::NoiseFilter;
use super::price::{PriceMatch, find_price};
use super::{Dish, Line};

/// Outcome of walking forward from a line that started a dish name.
enum Lookahead {
    /// A price was found; scanning resumes at `next`.
    Priced { price: PriceMatch, next: usize },
    /// The pending name is dropped; scanning resumes at `resume_at`.
    Abandoned { resume_at: usize },
}

fn header_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,2}\.\d{1,2}\.\d{4}.*:").unwrap())
}

fn is_too_short(trimmed: &str) -> bool {
    trimmed.chars().count() < 3
}

/// Text after the first colon of a running "menu of <date>:" header line.
fn header_remainder(trimmed: &str) -> Option<&str> {
    if !header_pattern().is_match(trimmed) {
        return None;
    }
    let (_, rest) = trimmed.split_once(':')?;
    Some(rest.trim())
}

/// Joins name fragments with single spaces, except after a trailing hyphen
/// where the word continues on the next line.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut name = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 && !name.ends_with('-') {
            name.push(' ');
        }
        name.push_str(fragment.as_ref());
    }
    name
}

/// Walks the lines of one page and emits every dish that ends in a price.
///
/// A line without a price opens a name that may continue over the following
/// lines until one of them carries the price. The pending name is dropped on
/// an empty or very short line, on a noise line, or at the end of the page.
/// Unpriced noise lines never open a name.
pub fn segment_dishes(lines: &[Line<'_>], noise: &NoiseFilter) -> Vec<Dish> {
    let mut dishes = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = &lines[cursor];
        let trimmed = line.text.trim();
        if is_too_short(trimmed) {
            cursor += 1;
            continue;
        }

        if let Some(price) = find_price(trimmed) {
            let residual = price.strip(trimmed);
            let fragments: Vec<&str> = if residual.is_empty() {
                Vec::new()
            } else {
                vec![residual.as_str()]
            };
            finalize(&fragments, price.value, line.index, noise, &mut dishes);
            cursor += 1;
            continue;
        }

        let first = header_remainder(trimmed).unwrap_or(trimmed);
        if noise.is_noise(first) {
            tracing::trace!("skipping noise line {}", line.index);
            cursor += 1;
            continue;
        }

        let mut fragments: Vec<String> = Vec::new();
        if !first.is_empty() {
            fragments.push(first.to_string());
        }

        match lookahead(lines, cursor + 1, &mut fragments, noise) {
            Lookahead::Priced { price, next } => {
                finalize(&fragments, price.value, line.index, noise, &mut dishes);
                cursor = next;
            }
            Lookahead::Abandoned { resume_at } => {
                if !fragments.is_empty() {
                    tracing::trace!(
                        "dropping unpriced name {:?} started at line {}",
                        join_fragments(&fragments),
                        line.index
                    );
                }
                cursor = resume_at;
            }
        }
    }

    dishes
}

fn lookahead(
    lines: &[Line<'_>],
    start: usize,
    fragments: &mut Vec<String>,
    noise: &NoiseFilter,
) -> Lookahead {
    for (offset, line) in lines[start..].iter().enumerate() {
        let position = start + offset;
        let trimmed = line.text.trim();

        if let Some(price) = find_price(trimmed) {
            let residual = price.strip(trimmed);
            if !residual.is_empty() {
                fragments.push(residual);
            }
            return Lookahead::Priced {
                price,
                next: position + 1,
            };
        }

        if is_too_short(trimmed) {
            return Lookahead::Abandoned {
                resume_at: position,
            };
        }

        if noise.is_noise(trimmed) {
            tracing::trace!("noise line {} interrupts pending name", line.index);
            return Lookahead::Abandoned {
                resume_at: position,
            };
        }

        fragments.push(trimmed.to_string());
    }

    Lookahead::Abandoned {
        resume_at: lines.len(),
    }
}

fn finalize<S: AsRef<str>>(
    fragments: &[S],
    price: Decimal,
    started_at: usize,
    noise: &NoiseFilter,
    dishes: &mut Vec<Dish>,
) {
    let joined = join_fragments(fragments);
    let name = joined.trim();

    if name.chars().count() <= 2 || noise.is_noise(name) || price <= Decimal::ZERO {
        tracing::trace!("discarding candidate {name:?} at line {started_at}");
        return;
    }

    tracing::debug!("dish at line {started_at}: {name} ({price})");
    dishes.push(Dish {
        name: name.to_string(),
        price,
    });
}
