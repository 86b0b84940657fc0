//! Common types and utilities shared across cachesim.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and the TOML config model
//! - Error types
//! - Identifiers (BlockId)

mod block_id;
pub mod config;
pub mod error;

pub use block_id::{BlockId, BlockSet};
pub use error::{Error, Result};
