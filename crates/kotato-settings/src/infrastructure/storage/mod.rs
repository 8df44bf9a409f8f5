//! Storage infrastructure: settings document persistence.
//!
//! The `files` sub-module implements
//! [`SettingsStorage`](crate::application::settings_manager::SettingsStorage)
//! over the real file system:
//!
//! - Reading and replacing the default and custom documents under
//!   `<working_dir>/tdata/`.
//! - Creating the `tdata` directory on first write.
//! - Seeding the custom document from the template compiled into the binary.

pub mod files;
