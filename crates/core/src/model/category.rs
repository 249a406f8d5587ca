use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::locale::Locale;

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// The three fixed subject groupings of the civics question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gov,
    History,
    Civics,
}

impl Category {
    /// Fixed category order; also the cycle order for balanced-test remainders.
    pub const ALL: [Category; 3] = [Category::Gov, Category::History, Category::Civics];

    /// Short key used in routes and storage keys.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Gov => "gov",
            Category::History => "history",
            Category::Civics => "civics",
        }
    }

    /// Display label for the given locale, as shipped in the question data.
    #[must_use]
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Category::Gov) => "American Government",
            (Locale::En, Category::History) => "American History",
            (Locale::En, Category::Civics) => "Integrated Civics",
            (Locale::Es, Category::Gov) => "Gobierno",
            (Locale::Es, Category::History) => "Historia",
            (Locale::Es, Category::Civics) => "Educación Cívica Integrada",
            (Locale::Zh, Category::Gov) => "美国政府",
            (Locale::Zh, Category::History) => "美国历史",
            (Locale::Zh, Category::Civics) => "综合公民",
        }
    }

    /// Maps a localized display label back to its category.
    #[must_use]
    pub fn from_label(locale: Locale, label: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.label(locale) == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gov" => Ok(Category::Gov),
            "history" => Ok(Category::History),
            "civics" => Ok(Category::Civics),
            other => Err(ParseCategoryError(other.to_owned())),
        }
    }
}

//
// ─── CATEGORY FILTER ───────────────────────────────────────────────────────────
//

/// Category selection for browsing and sampling: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns true when a question in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == wanted,
        }
    }

    /// Short key used in routes and storage keys (`"all"` for the sentinel).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.key(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip_for_every_locale() {
        for locale in Locale::ALL {
            for category in Category::ALL {
                let label = category.label(locale);
                assert_eq!(Category::from_label(locale, label), Some(category));
            }
        }
    }

    #[test]
    fn unknown_label_maps_to_none() {
        assert_eq!(Category::from_label(Locale::En, "Geography"), None);
    }

    #[test]
    fn filter_all_matches_everything() {
        for category in Category::ALL {
            assert!(CategoryFilter::All.matches(category));
        }
    }

    #[test]
    fn filter_only_matches_its_category() {
        let filter = CategoryFilter::Only(Category::History);
        assert!(filter.matches(Category::History));
        assert!(!filter.matches(Category::Gov));
    }

    #[test]
    fn filter_parses_keys_and_sentinel() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "civics".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Civics)
        );
        assert!("geography".parse::<CategoryFilter>().is_err());
    }
}
