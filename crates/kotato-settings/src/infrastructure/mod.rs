//! Infrastructure layer for the settings manager.
//!
//! Contains OS-facing adapters: the file-backed document storage and the
//! line-oriented console used by the headless host binary.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `kotato_settings_core`, but MUST NOT be imported by the `application` layer
//! (except for doc links).

pub mod console;
pub mod storage;
