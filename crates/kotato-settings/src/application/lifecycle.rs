//! SettingsService: start/write/finish lifecycle around the manager.
//!
//! The host application owns exactly one `SettingsService` for the lifetime of
//! the process.  It is created empty; the first [`start`](SettingsService::start)
//! builds the [`SettingsManager`] and runs its startup sequence, later calls
//! are ignored.  [`write`](SettingsService::write) and
//! [`finish`](SettingsService::finish) do nothing until then, so callers
//! never need to check whether settings have been loaded yet.

use kotato_settings_core::ManagerConfig;

use super::settings_manager::{SettingsManager, SettingsStorage};

/// Process-wide settings lifecycle.
pub struct SettingsService<S> {
    manager: Option<SettingsManager<S>>,
}

impl<S> Default for SettingsService<S> {
    fn default() -> Self {
        Self { manager: None }
    }
}

impl<S: SettingsStorage> SettingsService<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the manager and loads both documents.
    ///
    /// Returns `false` (and drops `storage`) if already started.
    pub fn start(&mut self, storage: S, config: &ManagerConfig) -> bool {
        if self.manager.is_some() {
            return false;
        }
        let mut manager = SettingsManager::new(storage, config);
        manager.fill();
        self.manager = Some(manager);
        true
    }

    /// Debounced write request.  No-op before start.
    pub fn write(&mut self) {
        if let Some(manager) = self.manager.as_mut() {
            manager.write(false);
        }
    }

    /// Forced write for shutdown.  No-op before start.
    pub fn finish(&mut self) {
        if let Some(manager) = self.manager.as_mut() {
            manager.finish();
        }
    }

    pub fn manager(&self) -> Option<&SettingsManager<S>> {
        self.manager.as_ref()
    }

    pub fn manager_mut(&mut self) -> Option<&mut SettingsManager<S>> {
        self.manager.as_mut()
    }

    /// Drives the debounce timer; never completes before start.
    pub async fn tick(&mut self) {
        match self.manager.as_mut() {
            Some(manager) => manager.tick().await,
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::settings_manager::{MockSettingsStorage, StorageError};
    use std::path::PathBuf;

    /// Storage for a first run: no files yet, every write succeeds.
    fn fresh_storage() -> MockSettingsStorage {
        let mut storage = MockSettingsStorage::new();
        storage
            .expect_read_default()
            .returning(|| Err(StorageError::NotFound(PathBuf::from("default.json"))));
        storage.expect_write_default().returning(|_| Ok(()));
        storage
            .expect_read_custom()
            .returning(|| Err(StorageError::NotFound(PathBuf::from("custom.json"))));
        storage.expect_seed_custom().returning(|| Ok(()));
        storage
    }

    #[test]
    fn test_write_and_finish_before_start_are_noops() {
        let mut service: SettingsService<MockSettingsStorage> = SettingsService::new();

        service.write();
        service.finish();

        assert!(service.manager().is_none());
    }

    #[test]
    fn test_start_is_idempotent() {
        // Arrange
        let mut service = SettingsService::new();
        let config = ManagerConfig::default();

        // Act
        let first = service.start(fresh_storage(), &config);
        // The second storage must never be touched.
        let second = service.start(MockSettingsStorage::new(), &config);

        // Assert
        assert!(first);
        assert!(!second);
        assert!(service.manager().is_some());
    }

    #[test]
    fn test_write_after_start_schedules() {
        let mut service = SettingsService::new();
        service.start(fresh_storage(), &ManagerConfig::default());

        service.write();

        assert!(service.manager().is_some_and(|m| m.is_write_pending()));
    }

    #[test]
    fn test_finish_flushes_pending_write() {
        // Arrange
        let mut storage = fresh_storage();
        storage.expect_write_custom().times(1).returning(|_| Ok(()));
        let mut service = SettingsService::new();
        service.start(storage, &ManagerConfig::default());
        service.write();

        // Act
        service.finish();

        // Assert
        assert!(service.manager().is_some_and(|m| !m.is_write_pending()));
    }
}
