//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and the validated [`config::Degree`]
//! - Error types
//! - Identifiers ([`NodeId`])

pub mod config;
mod node_id;

pub use crate::error::{Error, Result};
pub use node_id::NodeId;
