//! Durable local key-value store backing the template fallback.
//!
//! A single JSON file mapping fixed keys to JSON arrays, the desktop
//! equivalent of the browser's local storage. Only the template service
//! uses it today, under [`WRITING_TEMPLATES_KEY`].

use crate::paths::CommentGuardPaths;
use commentguard_core::error::{CommentGuardError, Result};
use commentguard_core::template::{Template, TemplateFallbackStore, WRITING_TEMPLATES_KEY};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// File-backed key → JSON-array store.
///
/// Writes replace the stored array wholesale; the file is small and
/// rewritten atomically enough for a single-process client. A `Mutex`
/// serializes concurrent access from async tasks.
pub struct LocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    /// Opens the store at the default location
    /// (`~/.local/share/commentguard/local_store.json`).
    pub fn new() -> Result<Self> {
        let path = CommentGuardPaths::local_store_file()
            .map_err(|e| CommentGuardError::storage(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Opens a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let map = serde_json::from_str(&content)?;
        Ok(map)
    }

    fn write_map(&self, map: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Returns the JSON array stored under `key`, or an empty one.
    pub fn get_array(&self, key: &str) -> Result<Vec<Value>> {
        let _guard = self.lock.lock().expect("local store lock poisoned");
        let map = self.read_map()?;
        match map.get(key) {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(_) => Err(CommentGuardError::storage(format!(
                "key '{key}' does not hold an array"
            ))),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the JSON array stored under `key`.
    pub fn set_array(&self, key: &str, items: Vec<Value>) -> Result<()> {
        let _guard = self.lock.lock().expect("local store lock poisoned");
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::Array(items));
        self.write_map(&map)
    }
}

impl TemplateFallbackStore for LocalStore {
    fn list(&self) -> Result<Vec<Template>> {
        let items = self.get_array(WRITING_TEMPLATES_KEY)?;
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Into::into))
            .collect()
    }

    fn append(&self, template: Template) -> Result<()> {
        let mut items = self.get_array(WRITING_TEMPLATES_KEY)?;
        items.push(serde_json::to_value(&template)?);
        self.set_array(WRITING_TEMPLATES_KEY, items)
    }

    fn remove(&self, id: &str) -> Result<bool> {
        let items = self.get_array(WRITING_TEMPLATES_KEY)?;
        let before = items.len();
        let kept: Vec<Value> = items
            .into_iter()
            .filter(|item| item.get("id").and_then(Value::as_str) != Some(id))
            .collect();
        let removed = kept.len() < before;
        self.set_array(WRITING_TEMPLATES_KEY, kept)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn template(id: &str, title: &str) -> Template {
        Template {
            id: id.to_string(),
            title: title.to_string(),
            content: "body".to_string(),
            category: None,
            created_at: None,
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::with_path(dir.path().join("local_store.json"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_list() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::with_path(dir.path().join("local_store.json"));

        store.append(template("a", "Greeting")).unwrap();
        store.append(template("b", "Apology")).unwrap();

        let templates = store.list().unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].title, "Greeting");
    }

    #[test]
    fn test_remove_by_id() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::with_path(dir.path().join("local_store.json"));
        store.append(template("a", "Greeting")).unwrap();
        store.append(template("b", "Apology")).unwrap();

        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());

        let templates = store.list().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, "b");
    }

    #[test]
    fn test_templates_live_under_fixed_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_store.json");
        let store = LocalStore::with_path(path.clone());
        store.append(template("a", "Greeting")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(raw.get(WRITING_TEMPLATES_KEY).unwrap().is_array());
    }
}
