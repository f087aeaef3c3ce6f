/// Keywords of header, footer and disclaimer lines on the daily menu.
pub const DEFAULT_NOISE_KEYWORDS: [&str; 10] = [
    "tageskarte",
    "speisekarte",
    "menu",
    "seite",
    "page",
    "externe",
    "aufschlag",
    "surcharge",
    "zusätzlich",
    "desserts",
];

/// Substring classifier for lines that are not dishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseFilter {
    keywords: Vec<String>,
}

impl NoiseFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when the lower-cased text contains any keyword.
    pub fn is_noise(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_KEYWORDS)
    }
}
