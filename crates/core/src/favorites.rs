use crate::{SlotValue, SLOT_COUNT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

pub const FAVORITES_KEY: &str = "favoriteGames";

/// One finalized hand, slot 1 first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct FavoriteEntry([SlotValue; SLOT_COUNT]);

impl FavoriteEntry {
    pub fn new(cells: [SlotValue; SLOT_COUNT]) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[SlotValue; SLOT_COUNT] {
        &self.0
    }

    /// Missing cells become `empty`, extra cells and non-string cells are ignored.
    fn from_json_lossy(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        let mut cells = [SlotValue::Empty; SLOT_COUNT];
        for (cell, item) in cells.iter_mut().zip(items) {
            *cell = item
                .as_str()
                .map(SlotValue::from_name_lossy)
                .unwrap_or(SlotValue::Empty);
        }
        Some(Self(cells))
    }
}

impl fmt::Display for FavoriteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, cell) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

/// Newest-first list of finalized hands, never longer than its cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesHistory {
    entries: Vec<FavoriteEntry>,
    cap: usize,
}

impl FavoritesHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    pub fn push_front(&mut self, entry: FavoriteEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.cap);
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string(&self.entries).map_err(|err| StoreError::Encode(err.to_string()))
    }

    /// `None` when the body is not JSON or not an array.
    pub fn from_json_lossy(body: &str, cap: usize) -> Option<Self> {
        let parsed: Value = serde_json::from_str(body).ok()?;
        let mut entries: Vec<FavoriteEntry> = parsed
            .as_array()?
            .iter()
            .filter_map(FavoriteEntry::from_json_lossy)
            .collect();
        entries.truncate(cap);
        Some(Self { entries, cap })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("encode error: {0}")]
    Encode(String),
}

/// Get/set of string values under string keys.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

/// Favorites history backed by a [`KeyValueStore`]. Reads are best effort;
/// writes report their error and leave the in-memory history updated.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    history: FavoritesHistory,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn open(store: S, cap: usize) -> Self {
        let history = Self::read(&store, cap);
        Self { store, history }
    }

    fn read(store: &S, cap: usize) -> FavoritesHistory {
        let raw = match store.load(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoritesHistory::new(cap),
            Err(err) => {
                warn!(error = %err, "favorites unreadable, starting empty");
                return FavoritesHistory::new(cap);
            }
        };
        FavoritesHistory::from_json_lossy(&raw, cap).unwrap_or_else(|| {
            warn!("favorites value is not a JSON array, starting empty");
            FavoritesHistory::new(cap)
        })
    }

    /// Re-reads the store, replacing the in-memory history.
    pub fn load(&mut self) -> &FavoritesHistory {
        self.history = Self::read(&self.store, self.history.cap());
        &self.history
    }

    pub fn append(&mut self, entry: FavoriteEntry) -> Result<(), StoreError> {
        self.history.push_front(entry);
        let body = self.history.to_json()?;
        self.store.save(FAVORITES_KEY, &body)?;
        debug!(stored = self.history.len(), "favorites saved");
        Ok(())
    }

    pub fn history(&self) -> &FavoritesHistory {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardType;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Read("denied".to_string()))
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write("quota exceeded".to_string()))
        }
    }

    fn entry_of(card_type: CardType) -> FavoriteEntry {
        FavoriteEntry::new([SlotValue::Card(card_type); SLOT_COUNT])
    }

    #[test]
    fn append_keeps_newest_first_and_caps_length() {
        let mut favorites = FavoritesStore::open(MemoryStore::new(), 5);
        for kind in CardType::ALL.into_iter().take(7) {
            favorites.append(entry_of(kind)).expect("append");
            assert!(favorites.history().len() <= 5);
            assert_eq!(favorites.history().entries()[0], entry_of(kind));
        }
        assert_eq!(favorites.history().len(), 5);
        assert_eq!(
            favorites.history().entries()[4],
            entry_of(CardType::ALL[2])
        );
    }

    #[test]
    fn appended_history_survives_reopen() {
        let mut favorites = FavoritesStore::open(MemoryStore::new(), 5);
        favorites.append(entry_of(CardType::Spade)).expect("append");
        let raw = favorites.store().get(FAVORITES_KEY).expect("saved").to_string();
        assert!(raw.starts_with(r#"[["spade","spade""#));
        let reopened = FavoritesStore::open(MemoryStore::with_value(FAVORITES_KEY, &raw), 5);
        assert_eq!(reopened.history(), favorites.history());
    }

    #[test]
    fn garbage_values_load_as_empty_history() {
        for raw in ["", "not json", "{\"a\":1}", "42", "null"] {
            let favorites = FavoritesStore::open(MemoryStore::with_value(FAVORITES_KEY, raw), 5);
            assert!(favorites.history().is_empty(), "raw value {raw:?}");
        }
    }

    #[test]
    fn lenient_decoding_pads_and_skips() {
        let raw = r#"[["spade","pyramid"], "junk", ["anubis","x","y","z","a","b","c","d","e"]]"#;
        let favorites = FavoritesStore::open(MemoryStore::with_value(FAVORITES_KEY, raw), 5);
        let entries = favorites.history().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].cells()[1], SlotValue::Card(CardType::Pyramid));
        assert_eq!(entries[0].cells()[2], SlotValue::Empty);
        assert_eq!(entries[1].cells()[0], SlotValue::Card(CardType::Anubis));
        assert_eq!(entries[1].cells()[7], SlotValue::Empty);
    }

    #[test]
    fn oversized_stored_history_is_truncated() {
        let one = serde_json::to_string(&[SlotValue::Card(CardType::Oillamp); SLOT_COUNT])
            .expect("encode");
        let raw = format!("[{}]", vec![one; 8].join(","));
        let favorites = FavoritesStore::open(MemoryStore::with_value(FAVORITES_KEY, &raw), 5);
        assert_eq!(favorites.history().len(), 5);
    }

    #[test]
    fn failed_write_still_updates_memory() {
        let mut favorites = FavoritesStore::open(BrokenStore, 5);
        assert!(favorites.history().is_empty());
        let result = favorites.append(entry_of(CardType::Rings));
        assert!(matches!(result, Err(StoreError::Write(_))));
        assert_eq!(favorites.history().len(), 1);
    }
}
