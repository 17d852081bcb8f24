//! Local key-value storage for string arrays.

use crate::error::StorageError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Named string-array entries, written whole.
pub trait KeyValueStore: Send + Sync {
    fn get_strings(&self, key: &str) -> Result<Option<Vec<String>>, StorageError>;

    /// Replace the entry. Returns only once the value is durable.
    fn set_strings(&self, key: &str, values: &[String]) -> Result<(), StorageError>;
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_strings(&self, key: &str) -> Result<Option<Vec<String>>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_strings(&self, key: &str, values: &[String]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

// ─── JsonFileStore ───────────────────────────────────────────────────────────

/// All entries in one JSON object file: `{"key": ["a", "b"], ...}`.
///
/// Writes go to a uniquely named sibling temp file that is then renamed over
/// the original, so a crash mid-write leaves the previous content intact.
///
/// Read-modify-write is serialized per instance only. Use one store per path;
/// two stores on the same file never corrupt it but can lose each other's
/// updates to different keys.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

type Entries = serde_json::Map<String, serde_json::Value>;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Entries::new());
        }
        serde_json::from_slice(&raw).map_err(|e| {
            StorageError::Corrupt(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path).inspect_err(|_| {
            std::fs::remove_file(&tmp).ok();
        })?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_strings(&self, key: &str) -> Result<Option<Vec<String>>, StorageError> {
        let entries = self.read_entries()?;
        match entries.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value::<Vec<String>>(value.clone())
                .map(Some)
                .map_err(|e| StorageError::Corrupt(format!("entry `{key}`: {e}"))),
        }
    }

    fn set_strings(&self, key: &str, values: &[String]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), serde_json::Value::from(values.to_vec()));
        self.write_entries(&entries)
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    /// A fresh, not-yet-existing file path under the temp dir.
    pub fn temp_path(tag: &str) -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "cryptotracker-{}-{}-{}.json",
            tag,
            std::process::id(),
            n
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::temp_path;
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_strings("k").unwrap(), None);
        store.set_strings("k", &strings(&["a", "b"])).unwrap();
        assert_eq!(store.get_strings("k").unwrap(), Some(strings(&["a", "b"])));
    }

    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.get_strings("favorites_uuids").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_keeps_other_entries() {
        let path = temp_path("entries");
        let store = JsonFileStore::new(&path);
        store.set_strings("one", &strings(&["a"])).unwrap();
        store.set_strings("two", &strings(&["b", "c"])).unwrap();
        store.set_strings("one", &strings(&[])).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get_strings("one").unwrap(), Some(Vec::new()));
        assert_eq!(reopened.get_strings("two").unwrap(), Some(strings(&["b", "c"])));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_two_stores_on_one_file_write_cleanly() {
        let path = temp_path("shared");
        let handles: Vec<_> = (0..2)
            .map(|t| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let store = JsonFileStore::new(&path);
                    for i in 0..50 {
                        store
                            .set_strings(&format!("store-{t}"), &[i.to_string()])
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let reopened = JsonFileStore::new(&path);
        assert!(reopened.read_entries().is_ok());
        let prefix = path.file_name().unwrap().to_string_lossy().into_owned();
        let leftovers = std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(&prefix) && name.ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_json_file_store_reports_corruption() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get_strings("k"),
            Err(StorageError::Corrupt(_))
        ));

        std::fs::write(&path, br#"{"k": [1, 2]}"#).unwrap();
        assert!(matches!(
            store.get_strings("k"),
            Err(StorageError::Corrupt(_))
        ));
        std::fs::remove_file(path).ok();
    }
}
