//! File-backed settings storage.
//!
//! Both documents are small, so every operation is a whole-file read or a
//! whole-file write on the calling thread.  The packaged custom template is
//! embedded at compile time with `include_str!`, which means seeding works
//! even when the binary runs from a read-only location.

use std::path::{Path, PathBuf};

use kotato_settings_core::ManagerConfig;

use crate::application::settings_manager::{SettingsStorage, StorageError};

/// Template copied to the custom document on first run.
pub const CUSTOM_TEMPLATE: &str = include_str!("../../../assets/default-settings-custom.json");

/// [`SettingsStorage`] over `<working_dir>/tdata/*.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    default_path: PathBuf,
    custom_path: PathBuf,
}

impl FileStorage {
    pub fn new(config: &ManagerConfig) -> Self {
        Self {
            default_path: config.default_file_path(),
            custom_path: config.custom_file_path(),
        }
    }
}

impl SettingsStorage for FileStorage {
    fn read_default(&self) -> Result<Vec<u8>, StorageError> {
        read_file(&self.default_path)
    }

    fn write_default(&self, contents: &str) -> Result<(), StorageError> {
        write_file(&self.default_path, contents)
    }

    fn read_custom(&self) -> Result<Vec<u8>, StorageError> {
        read_file(&self.custom_path)
    }

    fn write_custom(&self, contents: &str) -> Result<(), StorageError> {
        write_file(&self.custom_path, contents)
    }

    fn seed_custom(&self) -> Result<(), StorageError> {
        write_file(&self.custom_path, CUSTOM_TEMPLATE)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, StorageError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StorageError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Truncates and rewrites `path`, creating its directory if needed.
fn write_file(path: &Path, contents: &str) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use kotato_settings_core::parse_document;
    use uuid::Uuid;

    fn temp_config() -> ManagerConfig {
        ManagerConfig::with_working_dir(
            std::env::temp_dir().join(format!("ktg_storage_test_{}", Uuid::new_v4())),
        )
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        // Arrange
        let config = temp_config();
        let storage = FileStorage::new(&config);

        // Act
        let result = storage.read_custom();

        // Assert
        assert!(matches!(result, Err(StorageError::NotFound(p)) if p == config.custom_file_path()));
    }

    #[test]
    fn test_write_creates_tdata_directory() {
        let config = temp_config();
        let storage = FileStorage::new(&config);

        storage.write_default("{}").expect("write must succeed");

        assert!(config.data_dir().is_dir());
        assert_eq!(storage.read_default().unwrap(), b"{}".to_vec());

        std::fs::remove_dir_all(&config.working_dir).ok();
    }

    #[test]
    fn test_write_truncates_previous_contents() {
        let config = temp_config();
        let storage = FileStorage::new(&config);

        storage.write_custom("a much longer first version").unwrap();
        storage.write_custom("short").unwrap();

        assert_eq!(storage.read_custom().unwrap(), b"short".to_vec());

        std::fs::remove_dir_all(&config.working_dir).ok();
    }

    #[test]
    fn test_seed_custom_writes_template() {
        let config = temp_config();
        let storage = FileStorage::new(&config);

        storage.seed_custom().unwrap();

        let written = storage.read_custom().unwrap();
        assert_eq!(written, CUSTOM_TEMPLATE.as_bytes());

        std::fs::remove_dir_all(&config.working_dir).ok();
    }

    #[test]
    fn test_template_is_an_empty_commented_object() {
        let document = parse_document(CUSTOM_TEMPLATE.as_bytes()).expect("template must parse");
        assert!(document.is_empty());
    }

    #[test]
    fn test_reading_a_directory_is_an_io_error() {
        let config = temp_config();
        std::fs::create_dir_all(config.custom_file_path()).unwrap();
        let storage = FileStorage::new(&config);

        let result = storage.read_custom();

        assert!(matches!(result, Err(StorageError::Io { .. })));

        std::fs::remove_dir_all(&config.working_dir).ok();
    }
}
