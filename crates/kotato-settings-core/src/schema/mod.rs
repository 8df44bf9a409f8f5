//! Mapping between [`ConfigState`](crate::ConfigState) and JSON documents.
//!
//! - [`document`] – parsing (comment-tolerant) and pretty rendering.
//! - [`fields`] – the field table and the generic read-and-apply routine.
//! - [`writer`] – builds the custom and default documents from state.

pub mod document;
pub mod fields;
pub mod writer;
