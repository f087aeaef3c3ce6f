use chrono::NaiveDate;
use serde::Serialize;

use super::noise::NoiseFilter;
use super::{Dish, date, segment, split_lines};

/// Date and dishes recovered from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedMenu {
    pub date: Option<NaiveDate>,
    pub dishes: Vec<Dish>,
}

impl ParsedMenu {
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

/// Runs date extraction and dish segmentation over the pages of a document.
#[derive(Debug, Clone, Default)]
pub struct MenuParser {
    noise: NoiseFilter,
}

impl MenuParser {
    pub fn new(noise: NoiseFilter) -> Self {
        Self { noise }
    }

    /// The first page with a recognizable date fixes the date for the whole
    /// document. Each page is segmented on its own, so a pending dish name
    /// never continues onto the next page.
    pub fn parse_pages<I, S>(&self, pages: I) -> ParsedMenu
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut menu = ParsedMenu::default();

        for (page_no, page) in pages.into_iter().enumerate() {
            let text = page.as_ref();

            if menu.date.is_none() {
                menu.date = date::extract_date(text);
                if let Some(found) = menu.date {
                    tracing::debug!("menu date {found} found on page {}", page_no + 1);
                }
            }

            let lines = split_lines(text);
            let dishes = segment::segment_dishes(&lines, &self.noise);
            tracing::debug!("page {}: {} dishes", page_no + 1, dishes.len());
            menu.dishes.extend(dishes);
        }

        if menu.date.is_none() {
            tracing::debug!("no menu date in document");
        }
        if menu.is_empty() {
            tracing::debug!("no dishes in document");
        }
        menu
    }

    pub fn parse_text(&self, text: &str) -> ParsedMenu {
        self.parse_pages([text])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_date_wins_across_pages() {
        let parser = MenuParser::default();
        let menu = parser.parse_pages([
            "Kartoffelsuppe € 3,20",
            "Mittwoch 04.02.2026\n\nSchnitzel 9,90 €",
            "Donnerstag 05.02.2026\n\nLasagne 8,50 €",
        ]);
        assert_eq!(menu.date, Some(ymd(2026, 2, 4)));
        let names: Vec<_> = menu.dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Kartoffelsuppe", "Schnitzel", "Lasagne"]);
    }

    #[test]
    fn pending_name_does_not_cross_pages() {
        let parser = MenuParser::default();
        let menu = parser.parse_pages(["Wiener Schnitzel\nmit Pommes", "€ 12.50"]);
        assert!(menu.is_empty());
    }

    #[test]
    fn full_document() {
        let text = "\
Lengauers Bistro
Tageskarte

Dienstag, 03.02.2026: Schnitzel
mit Pommes 9,90 €
Currywurst mit Kartoffelsalat 7,50 €
Vegetarische Lasagne 8,50 €
";
        let menu = MenuParser::default().parse_text(text);
        assert_eq!(menu.date, Some(ymd(2026, 2, 3)));
        assert_eq!(menu.dishes.len(), 3);
        assert_eq!(menu.dishes[0].name, "Schnitzel mit Pommes");
        assert_eq!(menu.dishes[0].price, dec!(9.90));
        assert_eq!(menu.dishes[2].name, "Vegetarische Lasagne");
    }

    #[test]
    fn custom_noise_keywords() {
        let parser = MenuParser::new(NoiseFilter::new(["hinweis"]));
        let menu = parser.parse_text("Tageskarte 4,00 €\nHinweis Pfand 0,50 €");
        assert_eq!(menu.dishes.len(), 1);
        assert_eq!(menu.dishes[0].name, "Tageskarte");
    }

    #[test]
    fn nothing_found() {
        let menu = MenuParser::default().parse_pages(Vec::<String>::new());
        assert_eq!(menu, ParsedMenu::default());
        assert!(MenuParser::default().parse_text("").is_empty());
    }
}
