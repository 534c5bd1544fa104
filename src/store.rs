/// Persisted item list over `chrome.storage.local`
///
/// Reads validate; writes do not. `prepend` and `remove_ids` transform the
/// raw stored array, so records the panel cannot display survive every
/// write untouched.
///
/// All mutations are "load, transform the whole array, store the whole
/// array". The read-modify-write is not transactional: two writers racing each other
/// (a double capture, or a capture against a panel delete) lose one side's
/// update and the last write wins.
use crate::config::STORAGE_KEY;
use crate::error::Result;
use crate::item::SavedItem;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// Ordered item list, newest first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemList {
    pub items: Vec<SavedItem>,
}

impl ItemList {
    pub fn new() -> Self {
        ItemList { items: Vec::new() }
    }

    /// Insert at the front. An item whose id is already stored is rejected.
    pub fn prepend(&mut self, item: SavedItem) -> bool {
        if self.get(&item.id).is_some() {
            return false;
        }
        self.items.insert(0, item);
        true
    }

    /// Remove every item whose id is in `ids`, returning how many went away
    pub fn remove_ids(&mut self, ids: &HashSet<String>) -> usize {
        let original_len = self.items.len();
        self.items.retain(|item| !ids.contains(&item.id));
        original_len - self.items.len()
    }

    pub fn get(&self, id: &str) -> Option<&SavedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<SavedItem>> for ItemList {
    fn from(items: Vec<SavedItem>) -> Self {
        ItemList { items }
    }
}

/// Validate a raw stored value into an item list
///
/// A missing or non-array value is an empty list. Records that fail to
/// deserialize, fail validation, or repeat an earlier id are left out.
pub fn parse_stored(value: Value) -> ItemList {
    let Value::Array(records) = value else {
        if !value.is_null() {
            log::warn!("Stored items are not an array, treating as empty");
        }
        return ItemList::new();
    };

    let total = records.len();
    let mut seen = HashSet::new();
    let items: Vec<SavedItem> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<SavedItem>(record).ok())
        .filter(|item| item.is_valid())
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    if items.len() < total {
        log::warn!("Discarded {} malformed stored items", total - items.len());
    }

    ItemList { items }
}

/// A key-value area shared by every extension context
#[allow(async_fn_in_trait)]
pub trait StorageArea {
    /// Missing keys read as `Value::Null`
    async fn get(&self, key: &str) -> Result<Value>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

pub struct ItemStore<A: StorageArea> {
    area: A,
}

impl<A: StorageArea> ItemStore<A> {
    pub fn new(area: A) -> Self {
        ItemStore { area }
    }

    pub fn area(&self) -> &A {
        &self.area
    }

    pub async fn load_all(&self) -> Result<ItemList> {
        let value = self.area.get(STORAGE_KEY).await?;
        Ok(parse_stored(value))
    }

    /// Replace the whole persisted list
    pub async fn save_all(&self, list: &ItemList) -> Result<()> {
        let value = serde_json::to_value(&list.items)?;
        self.area.set(STORAGE_KEY, value).await?;
        log::debug!("Saved {} items", list.len());
        Ok(())
    }

    /// The stored array as-is; a missing or non-array value reads as empty
    async fn load_raw(&self) -> Result<Vec<Value>> {
        match self.area.get(STORAGE_KEY).await? {
            Value::Array(records) => Ok(records),
            _ => Ok(Vec::new()),
        }
    }

    /// Insert `item` at the front, returning whether it was written
    ///
    /// An item whose id is already stored is rejected and nothing is written.
    pub async fn prepend(&self, item: &SavedItem) -> Result<bool> {
        let mut records = self.load_raw().await?;
        if records.iter().any(|record| record_id(record) == Some(item.id.as_str())) {
            return Ok(false);
        }
        records.insert(0, serde_json::to_value(item)?);
        self.area.set(STORAGE_KEY, Value::Array(records)).await?;
        Ok(true)
    }

    /// Delete the given ids; ids not present are ignored
    pub async fn remove_ids(&self, ids: &HashSet<String>) -> Result<usize> {
        let mut records = self.load_raw().await?;
        let original_len = records.len();
        records.retain(|record| !record_id(record).is_some_and(|id| ids.contains(id)));
        let removed = original_len - records.len();
        self.area.set(STORAGE_KEY, Value::Array(records)).await?;
        log::debug!("Removed {} of {} stored records", removed, original_len);
        Ok(removed)
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// In-memory area, resolving every call immediately
#[derive(Debug, Default)]
pub struct MemoryArea {
    values: RefCell<HashMap<String, Value>>,
    writes: Cell<usize>,
}

impl MemoryArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: Value) -> Self {
        let area = Self::new();
        area.values.borrow_mut().insert(key.to_string(), value);
        area
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl StorageArea for MemoryArea {
    async fn get(&self, key: &str) -> Result<Value> {
        Ok(self.values.borrow().get(key).cloned().unwrap_or(Value::Null))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::item::ItemKind;
    use serde_json::json;
    use std::future::Future;
    use std::task::{Context, Poll, Waker};

    /// Drive a future that never suspends (everything over `MemoryArea`)
    pub(crate) fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = std::pin::pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(value) => value,
            Poll::Pending => panic!("memory-backed future suspended"),
        }
    }

    pub(crate) fn create_test_item(id: &str, content: &str) -> SavedItem {
        SavedItem {
            id: id.to_string(),
            content: content.to_string(),
            kind: ItemKind::Text,
            page_title: "Example".to_string(),
            page_url: "https://a.test/".to_string(),
            created_at: "2024-10-28T10:30:00.000Z".to_string(),
        }
    }

    fn ids(list: &ItemList) -> Vec<&str> {
        list.items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut list = ItemList::new();
        list.prepend(create_test_item("a", "first"));
        list.prepend(create_test_item("b", "second"));

        assert_eq!(ids(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_prepend_rejects_duplicate_id() {
        let mut list = ItemList::new();
        assert!(list.prepend(create_test_item("a", "first")));
        assert!(!list.prepend(create_test_item("a", "again")));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_ids() {
        let mut list = ItemList::from(vec![
            create_test_item("a", "1"),
            create_test_item("b", "2"),
            create_test_item("c", "3"),
        ]);
        let targets: HashSet<String> = ["a", "c", "zzz"].iter().map(|s| s.to_string()).collect();

        let removed = list.remove_ids(&targets);

        assert_eq!(removed, 2);
        assert_eq!(ids(&list), vec!["b"]);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut list = ItemList::from(vec![create_test_item("a", "1")]);
        let before = list.clone();
        let targets: HashSet<String> = ["nope".to_string()].into_iter().collect();

        assert_eq!(list.remove_ids(&targets), 0);
        assert_eq!(list, before);
    }

    #[test]
    fn test_parse_stored_non_array() {
        assert!(parse_stored(Value::Null).is_empty());
        assert!(parse_stored(json!({"items": []})).is_empty());
        assert!(parse_stored(json!("garbage")).is_empty());
    }

    #[test]
    fn test_parse_stored_drops_bad_records() {
        let value = json!([
            {"id": "a", "type": "text", "content": "hello"},
            {"id": "b", "type": "video", "content": "nope"},
            {"id": "c", "type": "link", "content": "no url"},
            42,
            {"id": "a", "type": "text", "content": "duplicate"},
            {"id": "d", "type": "link", "content": "Docs", "linkUrl": "https://d.test/"}
        ]);

        let list = parse_stored(value);

        assert_eq!(ids(&list), vec!["a", "d"]);
        assert_eq!(list.items[0].content, "hello");
    }

    #[test]
    fn test_store_prepend_and_load() {
        let store = ItemStore::new(MemoryArea::new());

        assert!(block_on(store.prepend(&create_test_item("a", "first"))).unwrap());
        assert!(block_on(store.prepend(&create_test_item("b", "second"))).unwrap());
        let list = block_on(store.load_all()).unwrap();

        assert_eq!(ids(&list), vec!["b", "a"]);
        assert_eq!(store.area().writes(), 2);
    }

    #[test]
    fn test_store_save_all_replaces_list() {
        let store = ItemStore::new(MemoryArea::new());
        block_on(store.prepend(&create_test_item("a", "first"))).unwrap();
        let list = ItemList::from(vec![create_test_item("x", "1"), create_test_item("y", "2")]);

        block_on(store.save_all(&list)).unwrap();

        assert_eq!(block_on(store.load_all()).unwrap(), list);
    }

    #[test]
    fn test_store_load_malformed_value() {
        let store = ItemStore::new(MemoryArea::with_value(STORAGE_KEY, json!({"not": "a list"})));

        let list = block_on(store.load_all()).unwrap();

        assert!(list.is_empty());
    }

    #[test]
    fn test_store_remove_ids() {
        let store = ItemStore::new(MemoryArea::new());
        for id in ["a", "b", "c"] {
            block_on(store.prepend(&create_test_item(id, id))).unwrap();
        }
        let targets: HashSet<String> = ["b".to_string()].into_iter().collect();

        let removed = block_on(store.remove_ids(&targets)).unwrap();
        let list = block_on(store.load_all()).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(ids(&list), vec!["c", "a"]);
    }

    #[test]
    fn test_store_prepend_duplicate_id_writes_nothing() {
        let store = ItemStore::new(MemoryArea::new());
        block_on(store.prepend(&create_test_item("a", "first"))).unwrap();

        let inserted = block_on(store.prepend(&create_test_item("a", "again"))).unwrap();
        let list = block_on(store.load_all()).unwrap();

        assert!(!inserted);
        assert_eq!(store.area().writes(), 1);
        assert_eq!(list.items[0].content, "first");
    }

    #[test]
    fn test_store_writes_keep_records_the_panel_skips() {
        let seeded = json!([
            {"id": "old", "type": "video", "content": "clip"},
            {"id": "keep", "type": "text", "content": "hello"},
            17
        ]);
        let store = ItemStore::new(MemoryArea::with_value(STORAGE_KEY, seeded));

        block_on(store.prepend(&create_test_item("new", "fresh"))).unwrap();
        let stored = block_on(store.area().get(STORAGE_KEY)).unwrap();

        assert_eq!(stored.as_array().map(Vec::len), Some(4));
        assert_eq!(stored[0]["id"], "new");
        assert_eq!(stored[1], json!({"id": "old", "type": "video", "content": "clip"}));
        assert_eq!(stored[2], json!({"id": "keep", "type": "text", "content": "hello"}));
        assert_eq!(ids(&block_on(store.load_all()).unwrap()), vec!["new", "keep"]);

        let targets: HashSet<String> = ["keep".to_string()].into_iter().collect();
        let removed = block_on(store.remove_ids(&targets)).unwrap();
        let stored = block_on(store.area().get(STORAGE_KEY)).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(stored.as_array().map(Vec::len), Some(3));
        assert_eq!(stored[1]["id"], "old");
        assert_eq!(stored[2], json!(17));
    }

    #[test]
    fn test_store_prepend_over_non_array_value() {
        let store = ItemStore::new(MemoryArea::with_value(STORAGE_KEY, json!("garbage")));

        block_on(store.prepend(&create_test_item("a", "first"))).unwrap();

        assert_eq!(ids(&block_on(store.load_all()).unwrap()), vec!["a"]);
    }
}
