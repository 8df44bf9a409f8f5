//! Domain types for the settings manager.
//!
//! Everything here is plain data: no file access, no clocks, no async.
//!
//! - [`state::ConfigState`] – current value of every setting.
//! - [`net_boost::NetBoost`] – the network speed boost level.
//! - [`config::ManagerConfig`] – where the documents live and how long the
//!   writer waits before flushing.

pub mod config;
pub mod net_boost;
pub mod state;

pub use config::ManagerConfig;
pub use net_boost::NetBoost;
pub use state::ConfigState;
