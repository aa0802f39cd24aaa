//! # valwalk_value
//!
//! Dynamic value model for valwalk.
//!
//! This crate provides the [`Value`] type walked by `valwalk_core` and the
//! shape table that decides how each value is dispatched.
//!
//! ## Shapes
//!
//! - **Leaves**: booleans, characters, every integer, float and complex width,
//!   text, callables, and the empty dynamic wrapper
//! - **Nodes**: records, maps and sequences
//! - **Indirections**: pointers and non-empty dynamic wrappers
//! - **Unsupported**: opaque foreign handles
//!
//! Maps, sequences and pointers live in shared cells, so they can be written
//! through even when reached by shared reference. Records are plain values.
//!
//! ## Example
//!
//! ```rust
//! use valwalk_value::{Class, NodeKind, Record, Value, classify};
//!
//! let inner = Record::new("Inner").with_field("count", 1);
//! let outer = Value::from(Record::new("Outer").with_field("inner", inner));
//!
//! assert_eq!(classify(&outer), Class::Node(NodeKind::Record));
//! assert_eq!(classify(&Value::ptr(outer.clone())), Class::Indirection);
//! ```

mod display;
mod kind;
mod value;

pub use kind::{Class, Kind, NodeKind, classify};
pub use value::{
    Callable, Complex, Field, Key, MapRef, Opaque, Ptr, Record, SeqRef, Value, Visibility,
};
