use anyhow::Result;
use fd_lock::RwLock;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// A single-key read/write pair, injected wherever a persisted preference is needed.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

type Entries = BTreeMap<String, String>;

#[derive(Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn get_base_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
        let path = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let mut path = dirs::home_dir()
                    .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
                path.push(".upfmt");
                path
            }
        };
        if !path.exists() {
            fs::create_dir_all(&path)?;
        }
        Ok(path)
    }

    pub fn new(base_dir: &Path) -> Self {
        Self::from_path(base_dir.join("prefs.json"))
    }

    pub fn from_path(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                let _ = fs::create_dir_all(parent);
            }
        }
        Self { path }
    }

    fn load(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&data) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // Unreadable preferences mean "no choice made"; the next write replaces the file.
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt preferences file");
                Ok(Entries::new())
            }
        }
    }

    fn save(&self, entries: &Entries) -> Result<()> {
        let data = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, &data)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    // Another instance may be toggling the theme at the same time.
    fn update(&self, f: impl FnOnce(&mut Entries)) -> Result<()> {
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.path.with_extension("lock"))?;
        let mut lock = RwLock::new(lock_file);
        let _guard = lock.write()?;

        let mut entries = self.load()?;
        f(&mut entries);
        self.save(&entries)
    }
}

impl PreferenceStore for Storage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<Entries>,
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_storage_set_get() -> Result<()> {
        let dir = tempdir()?;
        let storage = Storage::new(dir.path());

        storage.set("theme", "dark")?;
        assert_eq!(storage.get("theme")?, Some("dark".to_string()));

        // A second handle on the same file sees the write.
        let reopened = Storage::new(dir.path());
        assert_eq!(reopened.get("theme")?, Some("dark".to_string()));

        Ok(())
    }

    #[test]
    fn test_storage_load_nonexistent() -> Result<()> {
        let dir = tempdir()?;
        let storage = Storage::from_path(dir.path().join("nested").join("prefs.json"));

        assert_eq!(storage.get("theme")?, None);

        Ok(())
    }

    #[test]
    fn test_storage_remove_keeps_other_keys() -> Result<()> {
        let dir = tempdir()?;
        let storage = Storage::new(dir.path());

        storage.set("theme", "light")?;
        storage.set("other", "value")?;
        storage.remove("theme")?;

        assert_eq!(storage.get("theme")?, None);
        assert_eq!(storage.get("other")?, Some("value".to_string()));
        assert!(!dir.path().join("prefs.tmp").exists());

        Ok(())
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_is_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json")?;
        let storage = Storage::new(dir.path());

        assert_eq!(storage.get("theme")?, None);

        storage.set("theme", "light")?;
        assert_eq!(storage.get("theme")?, Some("light".to_string()));
        assert!(fs::read_to_string(&path)?.contains(r#""theme": "light""#));

        Ok(())
    }

    #[test]
    fn test_corrupt_file_theme_follows_system() -> Result<()> {
        use crate::theme::{Theme, ThemeController};

        let dir = tempdir()?;
        fs::write(dir.path().join("prefs.json"), "{not json")?;
        let themes = ThemeController::new(Storage::new(dir.path()));

        assert_eq!(themes.effective(true)?, Theme::Dark);
        themes.set_stored(None)?;
        assert_eq!(themes.stored()?, None);

        Ok(())
    }

    #[test]
    fn test_base_dir_override_is_created() -> Result<()> {
        let dir = tempdir()?;
        let base = dir.path().join("data");
        let resolved = Storage::get_base_dir(Some(&base))?;
        assert_eq!(resolved, base);
        assert!(base.is_dir());
        Ok(())
    }

    #[test]
    fn test_memory_store() -> Result<()> {
        let store = MemoryStore::default();
        assert_eq!(store.get("theme")?, None);
        store.set("theme", "dark")?;
        assert_eq!(store.get("theme")?, Some("dark".to_string()));
        store.remove("theme")?;
        assert_eq!(store.get("theme")?, None);
        Ok(())
    }
}
