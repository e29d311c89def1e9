//! Text rendering for tables and reports

use colored::Colorize;
use std::fmt::Write;

use stocktrack_core::reports::{CategoryDistribution, Summary, ValueTrend};
use stocktrack_core::InventoryItem;

/// Width of the longest distribution bar, in cells
const BAR_WIDTH: usize = 30;

pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn heading(text: &str) -> String {
    format!("\n{}\n", text.cyan().bold())
}

pub fn success(text: &str) -> String {
    text.green().bold().to_string()
}

pub fn failure(text: &str) -> String {
    text.red().bold().to_string()
}

pub fn warning(text: &str) -> String {
    text.yellow().bold().to_string()
}

/// Item table with ID, Name, Category, Quantity and Price columns
pub fn item_table(title: &str, items: &[InventoryItem]) -> String {
    let prices: Vec<String> = items.iter().map(|item| money(item.price)).collect();

    let id_w = column_width("ID", items.iter().map(|i| i.id.to_string().len()));
    let name_w = column_width("Name", items.iter().map(|i| i.name.chars().count()));
    let cat_w = column_width("Category", items.iter().map(|i| i.category.chars().count()));
    let qty_w = column_width("Quantity", items.iter().map(|i| i.quantity.to_string().len()));
    let price_w = column_width("Price", prices.iter().map(String::len));

    let mut out = heading(title);
    let _ = writeln!(
        out,
        "{:^id_w$}  {:<name_w$}  {:<cat_w$}  {:>qty_w$}  {:>price_w$}",
        "ID", "Name", "Category", "Quantity", "Price"
    );
    let rule = id_w + name_w + cat_w + qty_w + price_w + 8;
    let _ = writeln!(out, "{}", "─".repeat(rule));

    for (item, price) in items.iter().zip(&prices) {
        let _ = writeln!(
            out,
            "{}  {}  {}  {:>qty_w$}  {:>price_w$}",
            format!("{:^id_w$}", item.id).cyan(),
            format!("{:<name_w$}", item.name).green(),
            format!("{:<cat_w$}", item.category).magenta(),
            item.quantity,
            price
        );
    }
    out
}

fn column_width(header: &str, cells: impl Iterator<Item = usize>) -> usize {
    cells.fold(header.len(), usize::max)
}

pub fn summary(summary: &Summary) -> String {
    let mut out = heading("Inventory Summary");
    let _ = writeln!(out, "Total items: {}", summary.total_quantity.to_string().bold());
    let _ = writeln!(out, "Total value: {}", money(summary.total_value).bold());
    out
}

/// One proportional bar per category, longest bar for the largest stock
pub fn distribution(distribution: &CategoryDistribution) -> String {
    let mut out = heading("Category-Wise Stock Distribution:");
    let label_w = distribution
        .iter()
        .map(|share| share.category.chars().count())
        .fold(0, usize::max);

    for share in distribution.iter() {
        let filled = (share.scale * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH.saturating_sub(filled))
        );
        let _ = writeln!(
            out,
            "{:<label_w$}  {}  {}",
            share.category,
            bar.blue(),
            share.total_quantity
        );
    }
    out
}

pub fn value_trend(trend: &ValueTrend) -> String {
    let mut out = heading("Inventory Value Trends:");
    let _ = writeln!(out, "{:>11}  {:>11}", "Total Items", "Total Value");
    let _ = writeln!(
        out,
        "{:>11}  {:>11}",
        trend.item_count,
        money(trend.total_value)
    );
    let _ = writeln!(
        out,
        "as of {}",
        trend.taken_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}
