//! Catalog: the authoritative in-memory inventory

use std::collections::HashSet;
use std::path::PathBuf;

use super::item::{parse_price, parse_quantity, validate_name, InventoryItem, ItemId, ItemUpdate};
use super::search::SearchCriterion;
use crate::error::{Result, StockError};
use crate::reports::ReportEngine;
use crate::storage::{JsonFileStore, SnapshotStore, StorageWarning};

/// Snapshot type persisted by the catalog
pub type ItemList = Vec<InventoryItem>;

/// Owns every inventory record and writes through to its store.
///
/// Mutations build the new record list first, save it, and only then replace
/// the in-memory list. A failed save therefore leaves both the snapshot and
/// the catalog exactly as they were.
#[derive(Debug)]
pub struct Catalog<S = JsonFileStore<ItemList>> {
    store: S,
    items: ItemList,
    next_id: ItemId,
    load_warning: Option<StorageWarning>,
}

impl Catalog<JsonFileStore<ItemList>> {
    /// Open the catalog stored at `path`
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::open(JsonFileStore::new(path))
    }
}

impl<S: SnapshotStore<ItemList>> Catalog<S> {
    /// Load the current snapshot from `store`
    pub fn open(store: S) -> Self {
        let (mut items, mut load_warning) = store.load().into_parts();

        if let Some(id) = first_duplicate_id(&items) {
            tracing::warn!(store = %store.location(), %id, "duplicate item id in snapshot, starting empty");
            items.clear();
            load_warning = Some(StorageWarning::new(
                store.location(),
                format!("duplicate item id {id}"),
            ));
        }

        let max_id = items.iter().map(|item| item.id).max();
        let next_id = match max_id {
            None => ItemId::FIRST,
            Some(max) => max.checked_next().unwrap_or_else(|| {
                tracing::warn!(store = %store.location(), %max, "item id at upper limit, starting empty");
                items.clear();
                load_warning = Some(StorageWarning::new(
                    store.location(),
                    format!("item id {max} leaves no room for new items"),
                ));
                ItemId::FIRST
            }),
        };

        tracing::debug!(store = %store.location(), items = items.len(), %next_id, "catalog opened");

        Self {
            store,
            items,
            next_id,
            load_warning,
        }
    }

    /// Warning raised while loading, if the snapshot had to be discarded
    pub fn load_warning(&self) -> Option<&StorageWarning> {
        self.load_warning.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All records in insertion order
    pub fn list(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Id the next `add` will assign
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }

    /// Reports over the current records
    pub fn reports(&self) -> ReportEngine<'_> {
        ReportEngine::new(&self.items)
    }

    /// Validate raw input, append a new record and save.
    pub fn add(
        &mut self,
        name: &str,
        category: &str,
        quantity_input: &str,
        price_input: &str,
    ) -> Result<InventoryItem> {
        let following = self
            .next_id
            .checked_next()
            .ok_or(StockError::IdsExhausted(self.next_id))?;
        let item = InventoryItem {
            id: self.next_id,
            name: validate_name(name)?,
            category: category.trim().to_string(),
            quantity: parse_quantity(quantity_input)?,
            price: parse_price(price_input)?,
        };

        let mut items = self.items.clone();
        items.push(item.clone());
        self.commit(items)?;
        self.next_id = following;

        tracing::info!(id = %item.id, name = %item.name, "item added");
        Ok(item)
    }

    /// Replace the supplied fields of record `id` and save.
    pub fn edit(&mut self, id: ItemId, update: &ItemUpdate) -> Result<InventoryItem> {
        let position = self.position(id)?;
        let edited = update.apply_to(&self.items[position])?;

        let mut items = self.items.clone();
        items[position] = edited.clone();
        self.commit(items)?;

        tracing::info!(%id, "item updated");
        Ok(edited)
    }

    /// Remove record `id` and save; returns the removed record.
    pub fn delete(&mut self, id: ItemId) -> Result<InventoryItem> {
        let position = self.position(id)?;

        let mut items = self.items.clone();
        let removed = items.remove(position);
        self.commit(items)?;

        tracing::info!(%id, name = %removed.name, "item deleted");
        Ok(removed)
    }

    /// Records matching `criterion`, in insertion order
    pub fn search(&self, criterion: &SearchCriterion) -> Vec<InventoryItem> {
        let found: Vec<InventoryItem> = self
            .items
            .iter()
            .filter(|item| criterion.matches(item))
            .cloned()
            .collect();
        tracing::debug!(field = %criterion.field(), found = found.len(), "search");
        found
    }

    fn position(&self, id: ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StockError::NotFound(id))
    }

    fn commit(&mut self, items: ItemList) -> Result<()> {
        self.store.save(&items)?;
        self.items = items;
        Ok(())
    }
}

fn first_duplicate_id(items: &[InventoryItem]) -> Option<ItemId> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().map(|item| item.id).find(|id| !seen.insert(*id))
}
