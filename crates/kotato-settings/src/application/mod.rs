//! Application layer for the settings manager.
//!
//! - **`write_scheduler`** – The Idle/Pending debounce state machine.  Pure:
//!   it decides when to flush but performs no I/O.
//!
//! - **`settings_manager`** – Owns the [`ConfigState`](kotato_settings_core::ConfigState),
//!   validates/regenerates the default document, merges the custom document
//!   into the state, and flushes it back through the `SettingsStorage` trait.
//!
//! - **`lifecycle`** – The start/write/finish facade the host application
//!   calls: starting is idempotent and writes before start are ignored.

pub mod lifecycle;
pub mod settings_manager;
pub mod write_scheduler;
