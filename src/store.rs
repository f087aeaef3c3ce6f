use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::MenuError;
use crate::menu::Dish;

pub const DEFAULT_CATEGORY: &str = "Gericht";

/// What to do with dishes for a date that already has stored items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Skip only dishes whose name is already stored for the date.
    #[default]
    SkipExistingNames,
    /// Skip the whole batch once any item exists for the date.
    SkipExistingDate,
}

impl FromStr for DuplicatePolicy {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip-names" => Ok(Self::SkipExistingNames),
            "skip-date" => Ok(Self::SkipExistingDate),
            other => Err(MenuError::Config {
                message: format!("unknown duplicate policy {other:?}, use skip-names or skip-date"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: u64,
    #[serde(skip)]
    pub date: NaiveDate,
    pub name: String,
    pub category: String,
    pub price: Decimal,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    by_date: BTreeMap<NaiveDate, Vec<MenuItem>>,
}

/// Menu items keyed by date, shared between the API and the sync task.
#[derive(Debug, Clone, Default)]
pub struct MenuStore {
    inner: Arc<Mutex<Inner>>,
}

impl MenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Items stored for `date`, oldest first.
    pub fn menu_for(&self, date: NaiveDate) -> Vec<MenuItem> {
        self.lock().by_date.get(&date).cloned().unwrap_or_default()
    }

    /// Dates with at least one item, newest first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.lock().by_date.keys().rev().copied().collect()
    }

    /// Stores `dishes` under `date` and returns how many were added.
    pub fn insert(&self, date: NaiveDate, dishes: &[Dish], policy: DuplicatePolicy) -> usize {
        let mut inner = self.lock();
        let Inner { next_id, by_date } = &mut *inner;
        let items = by_date.entry(date).or_default();

        if policy == DuplicatePolicy::SkipExistingDate && !items.is_empty() {
            tracing::info!("menu for {date} already stored, skipping {} items", dishes.len());
            return 0;
        }

        let mut names: HashSet<String> = items.iter().map(|item| item.name.clone()).collect();
        let mut added = 0;
        for dish in dishes {
            if !names.insert(dish.name.clone()) {
                tracing::debug!("skipping existing dish {:?} for {date}", dish.name);
                continue;
            }
            *next_id += 1;
            items.push(MenuItem {
                id: *next_id,
                date,
                name: dish.name.clone(),
                category: DEFAULT_CATEGORY.to_string(),
                price: dish.price,
            });
            added += 1;
        }

        if items.is_empty() {
            by_date.remove(&date);
        }

        let skipped = dishes.len() - added;
        if added > 0 {
            tracing::info!("added {added} new menu items for {date}");
        }
        if skipped > 0 {
            tracing::info!("skipped {skipped} existing menu items for {date}");
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()
    }

    fn dish(name: &str, price: Decimal) -> Dish {
        Dish {
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn skip_existing_names() {
        let store = MenuStore::new();
        let first = [dish("Schnitzel", dec!(9.90)), dish("Lasagne", dec!(8.50))];
        assert_eq!(store.insert(date(), &first, DuplicatePolicy::SkipExistingNames), 2);

        let second = [dish("Schnitzel", dec!(10.90)), dish("Currywurst", dec!(7.50))];
        assert_eq!(store.insert(date(), &second, DuplicatePolicy::SkipExistingNames), 1);

        let items = store.menu_for(date());
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Schnitzel", "Lasagne", "Currywurst"]);
        assert_eq!(items[0].price, dec!(9.90));
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), [1, 2, 3]);
        assert!(items.iter().all(|i| i.category == DEFAULT_CATEGORY));
    }

    #[test]
    fn duplicate_names_within_batch() {
        let store = MenuStore::new();
        let batch = [dish("Tagessuppe", dec!(4.00)), dish("Tagessuppe", dec!(4.00))];
        assert_eq!(store.insert(date(), &batch, DuplicatePolicy::SkipExistingNames), 1);
    }

    #[test]
    fn skip_existing_date() {
        let store = MenuStore::new();
        let first = [dish("Schnitzel", dec!(9.90))];
        assert_eq!(store.insert(date(), &first, DuplicatePolicy::SkipExistingDate), 1);

        let second = [dish("Currywurst", dec!(7.50))];
        assert_eq!(store.insert(date(), &second, DuplicatePolicy::SkipExistingDate), 0);
        assert_eq!(store.menu_for(date()).len(), 1);
    }

    #[test]
    fn dates_newest_first() {
        let store = MenuStore::new();
        let later = NaiveDate::from_ymd_opt(2026, 2, 4).unwrap();
        store.insert(date(), &[dish("Schnitzel", dec!(9.90))], DuplicatePolicy::default());
        store.insert(later, &[dish("Lasagne", dec!(8.50))], DuplicatePolicy::default());
        store.insert(
            NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            &[],
            DuplicatePolicy::default(),
        );
        assert_eq!(store.dates(), [later, date()]);
        assert!(store.menu_for(NaiveDate::from_ymd_opt(2026, 2, 5).unwrap()).is_empty());
    }

    #[test]
    fn policy_names() {
        assert_eq!("skip-names".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::SkipExistingNames);
        assert_eq!(" Skip-Date ".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::SkipExistingDate);
        assert!("upsert".parse::<DuplicatePolicy>().is_err());
    }
}
