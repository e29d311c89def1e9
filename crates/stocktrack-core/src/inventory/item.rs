//! Inventory records and the parsing rules for user-entered fields

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Catalog-assigned record identifier, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ItemId(u64);

impl ItemId {
    pub const FIRST: ItemId = ItemId(1);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id after this one, or `None` once `u64::MAX` is reached
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl TryFrom<u64> for ItemId {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            Err("item id must be positive".to_string())
        } else {
            Ok(Self(value))
        }
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let not_a_number = || ValidationError::NotANumber {
            field: "ID",
            input: s.to_string(),
        };
        let value: u64 = s.trim().parse().map_err(|_| not_a_number())?;
        ItemId::try_from(value).map_err(|_| not_a_number())
    }
}

/// One inventory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    #[serde(deserialize_with = "whole_quantity")]
    pub quantity: u64,
    #[serde(deserialize_with = "non_negative_price")]
    pub price: f64,
}

impl InventoryItem {
    /// Stock value of this record (`quantity * price`)
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Field-by-field replacement values for an edit.
///
/// `None` and blank text both mean "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw prompt answers, treating blank answers as "unchanged"
    pub fn from_inputs(name: &str, category: &str, quantity: &str, price: &str) -> Self {
        Self {
            name: non_blank(name),
            category: non_blank(category),
            quantity: non_blank(quantity),
            price: non_blank(price),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// True when applying this update would change nothing
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.category, &self.quantity, &self.price]
            .iter()
            .all(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
    }

    /// Validate every supplied field, then return the edited copy of `item`
    pub(crate) fn apply_to(&self, item: &InventoryItem) -> Result<InventoryItem, ValidationError> {
        let mut edited = item.clone();
        if let Some(name) = supplied(&self.name) {
            edited.name = name.to_string();
        }
        if let Some(category) = supplied(&self.category) {
            edited.category = category.to_string();
        }
        if let Some(quantity) = supplied(&self.quantity) {
            edited.quantity = parse_quantity(quantity)?;
        }
        if let Some(price) = supplied(&self.price) {
            edited.price = parse_price(price)?;
        }
        Ok(edited)
    }
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn supplied(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a non-negative, finite number. Zero is accepted.
pub fn parse_amount(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber {
            field,
            input: input.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            input: input.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

pub fn parse_price(input: &str) -> Result<f64, ValidationError> {
    parse_amount(input, "Price")
}

/// Quantities accept any numeric spelling of a whole number ("4", "4.0", "4e0").
pub fn parse_quantity(input: &str) -> Result<u64, ValidationError> {
    if let Ok(quantity) = input.trim().parse::<u64>() {
        return Ok(quantity);
    }
    let value = parse_amount(input, "Quantity")?;
    if value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(ValidationError::NotWhole {
            field: "Quantity",
            value,
        });
    }
    Ok(value as u64)
}

pub(crate) fn validate_name(name: &str) -> Result<String, ValidationError> {
    non_blank(name).ok_or(ValidationError::EmptyName)
}

// Older snapshots may hold quantities written as floats (`5.0`).
fn whole_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Float(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
        Raw::Float(f) => Err(de::Error::custom(format!(
            "quantity {f} is not a non-negative whole number"
        ))),
    }
}

fn non_negative_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let price = f64::deserialize(deserializer)?;
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(de::Error::custom(format!("price {price} is negative")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> InventoryItem {
        InventoryItem {
            id: ItemId::new(3),
            name: "Widget".to_string(),
            category: "Parts".to_string(),
            quantity: 4,
            price: 2.5,
        }
    }

    #[test]
    fn test_quantity_boundaries() {
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("4.0").unwrap(), 4);
        assert!(matches!(
            parse_quantity("-1"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_quantity("2.5"),
            Err(ValidationError::NotWhole { .. })
        ));
        assert!(matches!(
            parse_quantity("lots"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_price_rejects_non_finite() {
        assert_eq!(parse_price("0").unwrap(), 0.0);
        assert_eq!(parse_price("19.99").unwrap(), 19.99);
        for bad in ["NaN", "inf", "-inf", "", "abc"] {
            assert!(
                matches!(parse_price(bad), Err(ValidationError::NotANumber { .. })),
                "{bad} should be rejected"
            );
        }
        assert!(matches!(
            parse_price("-0.01"),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_item_id_parsing() {
        assert_eq!("7".parse::<ItemId>().unwrap(), ItemId::new(7));
        assert!("0".parse::<ItemId>().is_err());
        assert!("-2".parse::<ItemId>().is_err());
        assert!("x".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_blank_update_is_empty() {
        let update = ItemUpdate::from_inputs("", "  ", "", "");
        assert!(update.is_empty());
        assert_eq!(update.apply_to(&widget()).unwrap(), widget());

        assert!(ItemUpdate::new().name(" ").is_empty());
        assert!(!ItemUpdate::new().price("1").is_empty());
    }

    #[test]
    fn test_update_applies_only_supplied_fields() {
        let update = ItemUpdate::new().category("Tools").quantity("9");
        let edited = update.apply_to(&widget()).unwrap();

        assert_eq!(edited.id, ItemId::new(3));
        assert_eq!(edited.name, "Widget");
        assert_eq!(edited.category, "Tools");
        assert_eq!(edited.quantity, 9);
        assert_eq!(edited.price, 2.5);
    }

    #[test]
    fn test_update_with_bad_field_changes_nothing() {
        let update = ItemUpdate::new().name("Gadget").price("-3");
        assert!(update.apply_to(&widget()).is_err());
    }

    #[test]
    fn test_item_json_shape() {
        let json = serde_json::to_value(widget()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "Widget",
                "category": "Parts",
                "quantity": 4,
                "price": 2.5
            })
        );
    }

    #[test]
    fn test_item_accepts_float_quantity_from_older_snapshots() {
        let item: InventoryItem = serde_json::from_str(
            r#"{"id": 1, "name": "Bolt", "category": "Parts", "quantity": 5.0, "price": 0.1}"#,
        )
        .unwrap();
        assert_eq!(item.quantity, 5);
    }

    #[test]
    fn test_item_rejects_invalid_stored_values() {
        let zero_id = r#"{"id": 0, "name": "a", "category": "b", "quantity": 1, "price": 1}"#;
        let negative_price = r#"{"id": 1, "name": "a", "category": "b", "quantity": 1, "price": -1}"#;
        let fractional = r#"{"id": 1, "name": "a", "category": "b", "quantity": 1.5, "price": 1}"#;

        assert!(serde_json::from_str::<InventoryItem>(zero_id).is_err());
        assert!(serde_json::from_str::<InventoryItem>(negative_price).is_err());
        assert!(serde_json::from_str::<InventoryItem>(fractional).is_err());
    }

    #[test]
    fn test_value() {
        assert_eq!(widget().value(), 10.0);
    }
}
