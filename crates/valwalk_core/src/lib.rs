//! # valwalk_core
//!
//! Walk-and-rewrite engine for valwalk values.
//!
//! This crate provides:
//! - The [`Walker`] traversal driver and its [`WalkerBuilder`]
//! - The [`Rewrite`] outcome returned by callbacks
//! - Configuration loading ([`WalkConfig`])
//! - Ready-made callbacks in [`callbacks`]
//!
//! ## Example
//!
//! ```rust
//! use valwalk_core::{callbacks, walk};
//! use valwalk_value::{Record, Value};
//!
//! let mut value = Value::from(
//!     Record::new("Counter")
//!         .with_field("hits", 1)
//!         .with_field("history", Value::seq([10u8, 20])),
//! );
//!
//! walk(&mut value, callbacks::increment_integers);
//!
//! assert_eq!(value.to_string(), "Counter { hits: 2, history: [11, 21] }");
//! ```

pub mod callbacks;
mod config;
mod error;
mod walker;

pub use config::{Filter, WalkConfig};
pub use error::WalkError;
pub use walker::{Rewrite, WalkStats, Walker, WalkerBuilder, try_walk, walk};

#[cfg(test)]
pub mod test_utils;
