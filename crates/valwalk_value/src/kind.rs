//! Shape classification.
//!
//! Every [`Value`] has a [`Kind`], and every kind belongs to exactly one
//! [`Class`]. The walker consults this table at each recursion step to decide
//! whether a value is visited as a leaf, descended into as a node, followed as
//! an indirection, or skipped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;

/// The runtime shape of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    C64,
    C128,
    Str,
    Func,
    Dynamic,
    Record,
    Map,
    Seq,
    Ptr,
    Opaque,
}

/// Which kind of children a node has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Named fields.
    Record,
    /// Keyed entries.
    Map,
    /// Indexed elements.
    Seq,
}

/// The dispatch class of a [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Class {
    /// No recursable children.
    Leaf,
    /// Recursed into.
    Node(NodeKind),
    /// Followed before classification.
    Indirection,
    /// Not understood by the walker; skipped without a callback.
    Unsupported,
}

impl Kind {
    /// Returns the dispatch class of this kind.
    ///
    /// `Dynamic` is listed as a leaf: a wrapper that still holds something is
    /// unwrapped by the walker before classification, so only an empty
    /// wrapper is ever dispatched through this table.
    pub const fn class(self) -> Class {
        match self {
            Kind::Bool
            | Kind::Char
            | Kind::I8
            | Kind::I16
            | Kind::I32
            | Kind::I64
            | Kind::Isize
            | Kind::U8
            | Kind::U16
            | Kind::U32
            | Kind::U64
            | Kind::Usize
            | Kind::F32
            | Kind::F64
            | Kind::C64
            | Kind::C128
            | Kind::Str
            | Kind::Func
            | Kind::Dynamic => Class::Leaf,
            Kind::Record => Class::Node(NodeKind::Record),
            Kind::Map => Class::Node(NodeKind::Map),
            Kind::Seq => Class::Node(NodeKind::Seq),
            Kind::Ptr => Class::Indirection,
            Kind::Opaque => Class::Unsupported,
        }
    }

    /// Returns true for every signed and unsigned integer width.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::Isize
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
                | Kind::Usize
        )
    }

    /// Returns the lowercase name used in printed output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::C64 => "c64",
            Kind::C128 => "c128",
            Kind::Str => "str",
            Kind::Func => "func",
            Kind::Dynamic => "dynamic",
            Kind::Record => "record",
            Kind::Map => "map",
            Kind::Seq => "seq",
            Kind::Ptr => "ptr",
            Kind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Class {
    /// Returns true if this is [`Class::Leaf`].
    pub const fn is_leaf(self) -> bool {
        matches!(self, Class::Leaf)
    }

    /// Returns true if this is any [`Class::Node`].
    pub const fn is_node(self) -> bool {
        matches!(self, Class::Node(_))
    }
}

/// Classifies a value by its shape.
#[inline]
pub fn classify(value: &Value) -> Class {
    value.kind().class()
}
