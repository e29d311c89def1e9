//! Search criteria over inventory records

use std::fmt;
use std::str::FromStr;

use super::item::{parse_amount, InventoryItem};
use crate::error::{Result, StockError};

/// What a search filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Category,
    PriceRange,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [Self::Name, Self::Category, Self::PriceRange];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::PriceRange => "price range",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SearchField {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "price range" | "price_range" | "price" => Ok(Self::PriceRange),
            other => Err(StockError::InvalidArgument(format!(
                "unknown search option '{other}', expected name, category or price range"
            ))),
        }
    }
}

/// A single search filter
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCriterion {
    ByName { needle: String, case_insensitive: bool },
    ByCategory { needle: String, case_insensitive: bool },
    /// Inclusive on both ends
    ByPriceRange { min: f64, max: f64 },
}

impl SearchCriterion {
    /// Case-insensitive substring match on the name
    pub fn by_name(needle: impl Into<String>) -> Self {
        Self::ByName {
            needle: needle.into(),
            case_insensitive: true,
        }
    }

    /// Case-insensitive substring match on the category
    pub fn by_category(needle: impl Into<String>) -> Self {
        Self::ByCategory {
            needle: needle.into(),
            case_insensitive: true,
        }
    }

    pub fn by_price_range(min: f64, max: f64) -> Self {
        Self::ByPriceRange { min, max }
    }

    /// Parse the two bounds of a price range from prompt answers
    pub fn price_range_from_inputs(min: &str, max: &str) -> Result<Self> {
        let min = parse_amount(min, "Minimum price")?;
        let max = parse_amount(max, "Maximum price")?;
        Ok(Self::by_price_range(min, max))
    }

    pub fn field(&self) -> SearchField {
        match self {
            Self::ByName { .. } => SearchField::Name,
            Self::ByCategory { .. } => SearchField::Category,
            Self::ByPriceRange { .. } => SearchField::PriceRange,
        }
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        match self {
            Self::ByName {
                needle,
                case_insensitive,
            } => contains(&item.name, needle, *case_insensitive),
            Self::ByCategory {
                needle,
                case_insensitive,
            } => contains(&item.category, needle, *case_insensitive),
            Self::ByPriceRange { min, max } => *min <= item.price && item.price <= *max,
        }
    }
}

fn contains(haystack: &str, needle: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}
