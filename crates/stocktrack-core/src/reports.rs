//! Report Engine
//!
//! Read-only aggregations over a borrowed slice of records. Nothing here
//! mutates the catalog or touches storage; rendering is left to the caller.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::inventory::InventoryItem;
use crate::types::{now, Timestamp};

/// Totals across the whole inventory
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Σ quantity
    pub total_quantity: u64,
    /// Σ quantity × price
    pub total_value: f64,
}

/// Stock held in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total_quantity: u64,
    /// `total_quantity / max(total_quantity)` across categories, in `[0, 1]`
    pub scale: f64,
}

/// Per-category stock, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryDistribution {
    pub entries: Vec<CategoryShare>,
}

impl CategoryDistribution {
    pub fn get(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|share| share.category == category)
            .map(|share| share.total_quantity)
    }

    pub fn max_quantity(&self) -> u64 {
        self.entries
            .iter()
            .map(|share| share.total_quantity)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryShare> {
        self.entries.iter()
    }

    pub fn to_map(&self) -> BTreeMap<String, u64> {
        self.entries
            .iter()
            .map(|share| (share.category.clone(), share.total_quantity))
            .collect()
    }
}

/// Point-in-time inventory value; there is no history behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueTrend {
    pub item_count: usize,
    pub total_value: f64,
    pub taken_at: Timestamp,
}

/// Aggregations over one catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct ReportEngine<'a> {
    items: &'a [InventoryItem],
}

impl<'a> ReportEngine<'a> {
    pub fn new(items: &'a [InventoryItem]) -> Self {
        Self { items }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_quantity: self
                .items
                .iter()
                .fold(0, |total, item| total.saturating_add(item.quantity)),
            total_value: self.total_value(),
        }
    }

    /// Records with `quantity < threshold`; an item exactly at the threshold is not low.
    pub fn low_stock(&self, threshold: u64) -> Vec<InventoryItem> {
        self.items
            .iter()
            .filter(|item| item.quantity < threshold)
            .cloned()
            .collect()
    }

    pub fn category_distribution(&self) -> CategoryDistribution {
        let mut order: Vec<&str> = Vec::new();
        let mut totals: HashMap<&str, u64> = HashMap::new();
        for item in self.items {
            let total = totals.entry(item.category.as_str()).or_insert_with(|| {
                order.push(item.category.as_str());
                0
            });
            *total = total.saturating_add(item.quantity);
        }

        let max = totals.values().copied().max().unwrap_or(0);
        let entries = order
            .into_iter()
            .map(|category| {
                let total_quantity = totals[category];
                CategoryShare {
                    category: category.to_string(),
                    total_quantity,
                    scale: if max == 0 {
                        0.0
                    } else {
                        total_quantity as f64 / max as f64
                    },
                }
            })
            .collect();

        CategoryDistribution { entries }
    }

    pub fn value_trend(&self) -> ValueTrend {
        ValueTrend {
            item_count: self.items.len(),
            total_value: self.total_value(),
            taken_at: now(),
        }
    }

    fn total_value(&self) -> f64 {
        self.items.iter().map(InventoryItem::value).sum()
    }
}
