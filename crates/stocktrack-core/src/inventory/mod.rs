//! Inventory Catalog
//!
//! The catalog is the only owner and mutator of inventory records. It assigns
//! ids, validates user-entered fields and persists the full record list after
//! every change.
//!
//! # Id assignment
//!
//! On open the next id is `max(id) + 1` (or `1` for an empty catalog). From
//! then on it only moves forward, so ids freed by `delete` are not handed out
//! again by the same catalog and gaps are never compacted.
//!
//! # Example
//!
//! ```
//! use stocktrack_core::inventory::{Catalog, ItemUpdate, SearchCriterion};
//! use stocktrack_core::storage::MemoryStore;
//!
//! let mut catalog = Catalog::open(MemoryStore::new());
//! let bolt = catalog.add("Bolt", "Hardware", "120", "0.15").unwrap();
//! catalog.add("Hammer", "Tools", "4", "18.50").unwrap();
//!
//! catalog.edit(bolt.id, &ItemUpdate::new().quantity("100")).unwrap();
//!
//! let tools = catalog.search(&SearchCriterion::by_category("tool"));
//! assert_eq!(tools.len(), 1);
//! assert_eq!(catalog.reports().summary().total_quantity, 104);
//! ```

pub mod catalog;
pub mod item;
pub mod search;

pub use catalog::{Catalog, ItemList};
pub use item::{parse_amount, parse_price, parse_quantity, InventoryItem, ItemId, ItemUpdate};
pub use search::{SearchCriterion, SearchField};
