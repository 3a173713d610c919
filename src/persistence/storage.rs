use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A local key-value slot store holding string payloads
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .context(format!("Failed to create data directory: {}", dir.display()))?;

        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            bail!("Invalid storage key '{}'", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .context(format!("Failed to read storage slot: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        // Readers only ever see a complete payload
        let mut file = fs::File::create(&tmp_path)
            .context(format!("Failed to create temp file: {}", tmp_path.display()))?;
        file.write_all(value.as_bytes())
            .context("Failed to write storage slot")?;
        file.sync_all().context("Failed to sync storage slot")?;

        fs::rename(&tmp_path, &path)
            .context(format!("Failed to replace storage slot: {}", path.display()))?;
        Ok(())
    }
}

/// Process-local storage, lost on exit
#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory storage lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory storage lock poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
