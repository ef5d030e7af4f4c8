//! # Catalog Types
//!
//! Read-only menu types supplied by the catalog collaborator.
//!
//! The core never creates or edits these - menu/category CRUD lives in
//! a management screen outside this crate. What the core needs is the
//! shape: a menu item groups one or more priced variants (sizes), and
//! the cashier screen filters items by category tab and search text.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::ALL_CATEGORY;

// =============================================================================
// Types
// =============================================================================

/// A menu category, e.g. "Dimsum Kukus" or "Minuman".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A purchasable size/configuration of a menu item with its own price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuVariant {
    /// Unique variant id. Doubles as the cart line id.
    pub id: String,
    /// The menu item this variant belongs to.
    pub menu_item_id: String,
    /// Size label shown to the cashier, e.g. "Kecil" / "Besar".
    pub size: String,
    /// Unit price. Non-negative by catalog contract.
    pub price: Money,
}

/// A menu item with its variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Category name for tab filtering.
    pub category: String,
    /// Emoji used as the item's placeholder image.
    pub emoji: Option<String>,
    pub variants: Vec<MenuVariant>,
}

// =============================================================================
// Filtering
// =============================================================================

/// Builds the category tab row: the synthetic "Semua" (All) entry
/// followed by every catalog category in the order supplied.
pub fn category_tabs(categories: &[Category]) -> Vec<String> {
    let mut tabs = Vec::with_capacity(categories.len() + 1);
    tabs.push(ALL_CATEGORY.to_string());
    tabs.extend(categories.iter().map(|c| c.name.clone()));
    tabs
}

/// Filters menu items by the selected category tab and a
/// case-insensitive name search. "Semua" matches every category; an
/// empty search term matches every item.
pub fn filter_menu<'a>(items: &'a [MenuItem], category: &str, search: &str) -> Vec<&'a MenuItem> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| category == ALL_CATEGORY || item.category == category)
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<MenuItem> {
        vec![
            MenuItem {
                id: "m1".into(),
                name: "Dimsum Ayam".into(),
                category: "Dimsum Kukus".into(),
                emoji: Some("🥟".into()),
                variants: vec![],
            },
            MenuItem {
                id: "m2".into(),
                name: "Es Teh".into(),
                category: "Minuman".into(),
                emoji: None,
                variants: vec![],
            },
        ]
    }

    #[test]
    fn test_category_tabs_prepends_all() {
        let categories = vec![
            Category {
                id: "c1".into(),
                name: "Dimsum Kukus".into(),
            },
            Category {
                id: "c2".into(),
                name: "Minuman".into(),
            },
        ];

        let tabs = category_tabs(&categories);
        assert_eq!(tabs, vec!["Semua", "Dimsum Kukus", "Minuman"]);
    }

    #[test]
    fn test_filter_all_category_matches_everything() {
        let items = sample_items();
        let filtered = filter_menu(&items, ALL_CATEGORY, "");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_by_category_and_search() {
        let items = sample_items();

        let by_category = filter_menu(&items, "Minuman", "");
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "Es Teh");

        let by_search = filter_menu(&items, ALL_CATEGORY, "ayam");
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].name, "Dimsum Ayam");

        let no_match = filter_menu(&items, "Minuman", "ayam");
        assert!(no_match.is_empty());
    }
}
