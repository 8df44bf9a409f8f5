//! Settings manager configuration.
//!
//! [`ManagerConfig`] tells the manager where its documents live, how long to
//! wait before flushing a pending write, and which application version the
//! default document must carry.  The host application builds it once at
//! startup (from CLI arguments in the headless binary) and hands it over.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Version of the running application, stamped into the default document.
///
/// A default document carrying any other version is regenerated on start.
pub const APP_VERSION: i64 = 1_004_009;

/// Quiet period between the first write request and the flush.
pub const DEFAULT_WRITE_DELAY: Duration = Duration::from_millis(5000);

/// Directory, relative to the working directory, holding both documents.
pub const DATA_DIR: &str = "tdata";

pub const DEFAULT_FILE_NAME: &str = "kotato-settings-default.json";
pub const CUSTOM_FILE_NAME: &str = "kotato-settings-custom.json";

/// Runtime configuration for the settings manager.
///
/// # Example
///
/// ```rust
/// use kotato_settings_core::ManagerConfig;
///
/// let cfg = ManagerConfig::default();
/// assert!(cfg.custom_file_path().ends_with("tdata/kotato-settings-custom.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Base directory; documents live under `<working_dir>/tdata/`.
    pub working_dir: PathBuf,

    /// Debounce window for non-forced write requests.
    pub write_delay: Duration,

    /// Version the default document must match.
    pub app_version: i64,
}

impl Default for ManagerConfig {
    /// | Field         | Default          |
    /// |---------------|------------------|
    /// | working_dir   | `.`              |
    /// | write_delay   | 5 seconds        |
    /// | app_version   | [`APP_VERSION`]  |
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            write_delay: DEFAULT_WRITE_DELAY,
            app_version: APP_VERSION,
        }
    }
}

impl ManagerConfig {
    /// Builds a config rooted at `working_dir` with default timing and version.
    pub fn with_working_dir(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// `<working_dir>/tdata`
    pub fn data_dir(&self) -> PathBuf {
        self.working_dir.join(DATA_DIR)
    }

    /// Path of the generated, versioned default document.
    pub fn default_file_path(&self) -> PathBuf {
        self.data_dir().join(DEFAULT_FILE_NAME)
    }

    /// Path of the user-editable custom document.
    pub fn custom_file_path(&self) -> PathBuf {
        self.data_dir().join(CUSTOM_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_write_delay_is_5s() {
        let cfg = ManagerConfig::default();
        assert_eq!(cfg.write_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_default_version_is_app_version() {
        assert_eq!(ManagerConfig::default().app_version, APP_VERSION);
    }

    #[test]
    fn test_paths_are_under_tdata() {
        // Arrange
        let cfg = ManagerConfig::with_working_dir("/opt/ktg");

        // Act / Assert
        assert_eq!(
            cfg.default_file_path(),
            PathBuf::from("/opt/ktg/tdata/kotato-settings-default.json")
        );
        assert_eq!(
            cfg.custom_file_path(),
            PathBuf::from("/opt/ktg/tdata/kotato-settings-custom.json")
        );
        assert_eq!(cfg.data_dir(), PathBuf::from("/opt/ktg/tdata"));
    }

    #[test]
    fn test_with_working_dir_keeps_default_timing() {
        let cfg = ManagerConfig::with_working_dir("somewhere");
        assert_eq!(cfg.write_delay, DEFAULT_WRITE_DELAY);
    }
}
