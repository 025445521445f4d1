//! JSON persistence for ~/.skyward/ files and the best-score store.

use crate::core::constants::{BEST_SCORE_FILE, DATA_DIR_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Get the ~/.skyward/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.skyward/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(_) => return T::default(),
    };
    match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable save file");
            T::default()
        }
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

/// Where the single best-score value lives between sessions.
pub trait BestScoreStore {
    /// Stored best score; 0 when absent or unreadable.
    fn load(&self) -> u32;

    fn save(&mut self, best: u32) -> io::Result<()>;
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for Box<T> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, best: u32) -> io::Result<()> {
        (**self).save(best)
    }
}

/// Best score in a JSON file (`{"best_score": N}`).
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at ~/.skyward/best_score.json.
    pub fn in_data_dir() -> io::Result<Self> {
        Ok(Self::new(data_path(BEST_SCORE_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonScoreStore {
    fn load(&self) -> u32 {
        load_json_or_default::<BestScoreRecord>(&self.path).best_score
    }

    fn save(&mut self, best: u32) -> io::Result<()> {
        save_json(&self.path, &BestScoreRecord { best_score: best })
    }
}

/// In-process store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub value: u32,
    pub writes: u32,
}

impl MemoryScoreStore {
    pub fn with_value(value: u32) -> Self {
        Self { value, writes: 0 }
    }
}

impl BestScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, best: u32) -> io::Result<()> {
        self.value = best;
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("skyward_persist_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_data_path_format() {
        let path = data_path("test.json").expect("data_path should succeed");
        assert!(path.to_string_lossy().ends_with(".skyward/test.json"));
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let store = JsonScoreStore::new(temp_path("missing_best.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("roundtrip_best.json");
        let mut store = JsonScoreStore::new(&path);
        store.save(17).expect("save should succeed");

        let reopened = JsonScoreStore::new(&path);
        assert_eq!(reopened.load(), 17);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_corrupt_values_load_zero() {
        for (name, contents) in [
            ("garbage.json", "not json at all"),
            ("string.json", r#"{"best_score": "twelve"}"#),
            ("negative.json", r#"{"best_score": -4}"#),
        ] {
            let path = temp_path(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, contents).unwrap();
            assert_eq!(JsonScoreStore::new(&path).load(), 0, "{name}");
            fs::remove_file(path).ok();
        }
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryScoreStore::with_value(3);
        assert_eq!(store.load(), 3);
        store.save(9).unwrap();
        assert_eq!(store.load(), 9);
        assert_eq!(store.writes, 1);
    }
}
