use ejypti_core::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub fn default_favorites_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("EJYPTI_FAVORITES") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".ejypti_favorites.json"))
}

/// Key-value pairs kept as one pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(StoreError::Read(err.to_string())),
        };
        serde_json::from_str(&body).map_err(|err| StoreError::Read(err.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // An unreadable file is replaced rather than blocking the write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        let body = serde_json::to_string_pretty(&values)
            .map_err(|err| StoreError::Encode(err.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StoreError::Write(err.to_string()))?;
        }
        fs::write(&self.path, body).map_err(|err| StoreError::Write(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ejypti_core::{CardType, FavoriteEntry, FavoritesStore, SlotValue, FAVORITES_KEY};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn missing_file_loads_as_absent() {
        let store = FileStore::new(unique_temp_file());
        assert_eq!(store.load(FAVORITES_KEY), Ok(None));
    }

    #[test]
    fn favorites_survive_a_reopen() {
        let file = unique_temp_file();
        let entry = FavoriteEntry::new([SlotValue::Card(CardType::Spade); 8]);
        let mut favorites = FavoritesStore::open(FileStore::new(&file), 5);
        favorites.append(entry).expect("append");
        let reopened = FavoritesStore::open(FileStore::new(&file), 5);
        assert_eq!(reopened.history().entries(), &[entry]);
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn corrupt_file_reads_as_error_and_is_overwritten() {
        let file = unique_temp_file();
        std::fs::write(&file, "{not json").expect("write");
        let mut store = FileStore::new(&file);
        assert!(matches!(store.load(FAVORITES_KEY), Err(StoreError::Read(_))));
        store.save(FAVORITES_KEY, "[]").expect("save");
        assert_eq!(store.load(FAVORITES_KEY), Ok(Some("[]".to_string())));
        let _ = std::fs::remove_file(file);
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "ejypti_cli_persistence_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
