//! Progress manager
//!
//! Reads and writes the progress record under the platform data directory
//! (`~/.local/share/critter-rescue` on Linux and the equivalents
//! elsewhere). A missing or corrupt file is never fatal: loading degrades
//! to defaults with a warning, because losing a best score beats refusing
//! to start.

use super::types::{ProgressData, ProgressError, CURRENT_PROGRESS_VERSION};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ProgressManager {
    progress_path: PathBuf,
}

impl ProgressManager {
    /// Creates a manager rooted at the platform data directory.
    pub fn new() -> Result<Self, ProgressError> {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_directory(base.join("critter-rescue"))
    }

    /// Creates a manager rooted at an explicit directory, creating it if
    /// needed. Tests point this at a scratch directory.
    pub fn with_directory(directory: impl AsRef<Path>) -> Result<Self, ProgressError> {
        let dir = directory.as_ref().to_path_buf();

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        Ok(ProgressManager {
            progress_path: dir.join("progress.json"),
        })
    }

    /// Loads the progress record, falling back to defaults when the file
    /// is absent or unreadable.
    pub fn load(&self) -> ProgressData {
        if !self.progress_path.exists() {
            return ProgressData::default();
        }

        let parsed = fs::read_to_string(&self.progress_path)
            .map_err(ProgressError::from)
            .and_then(|json| serde_json::from_str::<ProgressData>(&json).map_err(Into::into))
            .and_then(|data| {
                if data.version > CURRENT_PROGRESS_VERSION {
                    Err(ProgressError::InvalidVersion(data.version))
                } else {
                    Ok(data)
                }
            });

        match parsed {
            Ok(data) => data,
            Err(e) => {
                eprintln!(
                    "Warning: could not read {} ({}), starting fresh",
                    self.progress_path.display(),
                    e
                );
                ProgressData::default()
            }
        }
    }

    /// Merges a finished session into the record and writes it back.
    ///
    /// The best score only moves up and the beaten flag only flips on.
    /// Returns the merged record.
    pub fn record_session(&self, score: u32, beaten: bool) -> Result<ProgressData, ProgressError> {
        let mut data = self.load();
        data.version = CURRENT_PROGRESS_VERSION;
        data.best_score = data.best_score.max(score);
        data.beaten |= beaten;
        data.saved_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let json = serde_json::to_string_pretty(&data)?;
        fs::write(&self.progress_path, json)?;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_manager(tag: &str) -> (ProgressManager, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "critter-rescue-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        let manager = ProgressManager::with_directory(&dir).unwrap();
        (manager, dir)
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let (manager, dir) = scratch_manager("defaults");

        let data = manager.load();
        assert_eq!(data, ProgressData::default());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_record_then_load_round_trips() {
        let (manager, dir) = scratch_manager("roundtrip");

        let written = manager.record_session(700, true).unwrap();
        assert!(written.beaten);
        assert_eq!(written.best_score, 700);
        assert!(!written.saved_at.is_empty());

        let loaded = manager.load();
        assert_eq!(loaded, written);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_best_score_only_moves_up_and_beaten_sticks() {
        let (manager, dir) = scratch_manager("merge");

        manager.record_session(500, true).unwrap();
        let merged = manager.record_session(200, false).unwrap();

        assert_eq!(merged.best_score, 500);
        assert!(merged.beaten);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_corrupt_file_degrades_to_defaults() {
        let (manager, dir) = scratch_manager("corrupt");

        fs::write(dir.join("progress.json"), "not json at all").unwrap();
        assert_eq!(manager.load(), ProgressData::default());

        let _ = fs::remove_dir_all(dir);
    }
}
