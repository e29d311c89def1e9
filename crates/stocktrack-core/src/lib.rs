//! Stocktrack Core - inventory records, accounts and reports
//!
//! Stocktrack Core holds everything in the inventory tracker that carries an
//! invariant: the record catalog, the account directory, the snapshot store
//! behind both, and the report formulas.
//!
//! # Architecture
//!
//! Leaves first:
//!
//! 1. **Storage** (`storage`): whole-collection JSON snapshots, atomic writes,
//!    corrupt-snapshot recovery with a visible warning
//! 2. **Inventory** (`inventory`): the catalog, id assignment, validation, search
//! 3. **Accounts** (`accounts`): sign-up, login, SHA-256 password digests
//! 4. **Reports** (`reports`): summary, low stock, category distribution, value
//! 5. **Session** (`session`): explicit session value and the role-gated menu table
//!
//! # Quick Start
//!
//! ```
//! use stocktrack_core::{Catalog, Directory, MenuAction, Role};
//! use stocktrack_core::storage::MemoryStore;
//!
//! let mut directory = Directory::open(MemoryStore::new());
//! directory.sign_up("bob", "x", "x", Role::Admin).unwrap();
//! let session = directory.login("bob", "x").unwrap();
//!
//! let mut catalog = Catalog::open(MemoryStore::new());
//! session.authorize(MenuAction::AddItem).unwrap();
//! catalog.add("Bolt", "Hardware", "3", "0.10").unwrap();
//!
//! let low = catalog.reports().low_stock(5);
//! assert_eq!(low.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations, clippy::all)]

pub mod accounts;
pub mod config;
pub mod error;
pub mod inventory;
pub mod reports;
pub mod session;
pub mod storage;
pub mod types;

// Re-export commonly used types for convenience
pub use accounts::{Account, Directory};
pub use config::StockConfig;
pub use error::{AuthError, Result, StockError, ValidationError};
pub use inventory::{Catalog, InventoryItem, ItemId, ItemUpdate, SearchCriterion, SearchField};
pub use reports::{CategoryDistribution, ReportEngine, Summary, ValueTrend};
pub use session::{MenuAction, Session};
pub use storage::{Loaded, SnapshotStore, StorageWarning};
pub use types::{PasswordDigest, Role, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
