//! E2E tests for reports computed from a live catalog

use stocktrack_core::inventory::{Catalog, ItemUpdate};
use stocktrack_core::storage::MemoryStore;

fn catalog(entries: &[(&str, &str, &str, &str)]) -> Catalog<MemoryStore> {
    let mut catalog = Catalog::open(MemoryStore::new());
    for (name, category, quantity, price) in entries {
        catalog.add(name, category, quantity, price).unwrap();
    }
    catalog
}

#[test]
fn e2e_low_stock_excludes_threshold() {
    let catalog = catalog(&[
        ("three", "A", "3", "1"),
        ("five", "A", "5", "1"),
        ("seven", "A", "7", "1"),
    ]);

    let low = catalog.reports().low_stock(5);
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "three");
    assert!(catalog.reports().low_stock(0).is_empty());
}

#[test]
fn e2e_category_distribution_groups_quantities() {
    let catalog = catalog(&[("a1", "A", "3", "1"), ("a2", "A", "2", "1"), ("b1", "B", "5", "1")]);

    let distribution = catalog.reports().category_distribution();
    let map = distribution.to_map();
    assert_eq!(map.len(), 2);
    assert_eq!(map["A"], 5);
    assert_eq!(map["B"], 5);
    assert!(distribution.iter().all(|share| share.scale == 1.0));
}

#[test]
fn e2e_reports_follow_mutations() {
    let mut catalog = catalog(&[("bolt", "Hardware", "10", "0.5"), ("saw", "Tools", "2", "20")]);

    let summary = catalog.reports().summary();
    assert_eq!(summary.total_quantity, 12);
    assert!((summary.total_value - 45.0).abs() < 1e-9);

    let saw = catalog.list()[1].id;
    catalog.edit(saw, &ItemUpdate::new().quantity("1")).unwrap();
    let first = catalog.list()[0].id;
    catalog.delete(first).unwrap();

    let trend = catalog.reports().value_trend();
    assert_eq!(trend.item_count, 1);
    assert!((trend.total_value - 20.0).abs() < 1e-9);
}

#[test]
fn e2e_reports_on_empty_catalog() {
    let catalog = catalog(&[]);
    let reports = catalog.reports();

    assert_eq!(reports.summary().total_quantity, 0);
    assert!(reports.low_stock(10).is_empty());
    assert!(reports.category_distribution().is_empty());
    assert_eq!(reports.value_trend().item_count, 0);
}
