//! # kotato-settings-core
//!
//! Shared library for the Kotatogram settings manager containing the setting
//! state, the declarative field table and the JSON document codec.
//!
//! This crate does no file-system I/O and owns no timers.  It is used by the
//! `kotato-settings` application crate, which adds storage and the debounced
//! writer on top.
//!
//! # Architecture overview
//!
//! The settings manager keeps two JSON documents on disk:
//!
//! - the **default** document, regenerated whenever its `version` does not
//!   match the running application, listing every option with its built-in
//!   value (purely informational);
//! - the **custom** document, edited by the user and rewritten from the
//!   current state whenever a setting changes.
//!
//! This crate defines:
//!
//! - **`domain`** – [`ConfigState`], the single in-memory copy of every setting,
//!   the [`NetBoost`] level type and [`ManagerConfig`].
//!
//! - **`schema`** – How settings map to JSON.  [`schema::fields::FIELDS`] is a
//!   table of (key, alias, JSON type, validator, setter, getter) entries; one
//!   generic routine applies a parsed document to the state, and one generic
//!   routine serializes the state back into a document.

pub mod domain;
pub mod schema;

pub use domain::config::{ManagerConfig, APP_VERSION};
pub use domain::net_boost::NetBoost;
pub use domain::state::ConfigState;
pub use schema::document::{parse_document, render_document, ConfigDocument, DocumentError};
pub use schema::fields::{apply_document, apply_option, find_field, ApplySummary, FieldOutcome};
pub use schema::writer::{custom_document, default_document};
