//! Ready-made callbacks.
//!
//! - [`print_values`] / [`print_kinds`] write one indented line per visit and
//!   never change anything
//! - [`increment_integers`] adds one to every integer leaf

use std::io::{self, Write};

use valwalk_value::Value;

use crate::Rewrite;

/// Returns the indentation for `depth`: nothing at the root, otherwise
/// `marker` repeated `depth` times and a trailing space.
pub fn indent(depth: usize, marker: &str) -> String {
    if depth == 0 {
        return String::new();
    }
    let mut indent = marker.repeat(depth);
    indent.push(' ');
    indent
}

/// Creates a callback that writes `"{indent}{value} ({kind})"` lines to `out`.
pub fn print_values<W: Write>(
    mut out: W,
    marker: &str,
) -> impl FnMut(&Value, usize) -> io::Result<Rewrite> + use<W> {
    let marker = marker.to_string();
    move |value, depth| {
        writeln!(out, "{}{} ({})", indent(depth, &marker), value, value.kind())?;
        Ok(Rewrite::Unchanged)
    }
}

/// Creates a callback that writes `"{indent}{kind}"` lines to `out`.
pub fn print_kinds<W: Write>(
    mut out: W,
    marker: &str,
) -> impl FnMut(&Value, usize) -> io::Result<Rewrite> + use<W> {
    let marker = marker.to_string();
    move |value, depth| {
        writeln!(out, "{}{}", indent(depth, &marker), value.kind())?;
        Ok(Rewrite::Unchanged)
    }
}

/// Replaces every integer leaf with its successor, wrapping on overflow.
pub fn increment_integers(value: &Value, _depth: usize) -> Rewrite {
    let next = match *value {
        Value::I8(n) => Value::I8(n.wrapping_add(1)),
        Value::I16(n) => Value::I16(n.wrapping_add(1)),
        Value::I32(n) => Value::I32(n.wrapping_add(1)),
        Value::I64(n) => Value::I64(n.wrapping_add(1)),
        Value::Isize(n) => Value::Isize(n.wrapping_add(1)),
        Value::U8(n) => Value::U8(n.wrapping_add(1)),
        Value::U16(n) => Value::U16(n.wrapping_add(1)),
        Value::U32(n) => Value::U32(n.wrapping_add(1)),
        Value::U64(n) => Value::U64(n.wrapping_add(1)),
        Value::Usize(n) => Value::Usize(n.wrapping_add(1)),
        _ => return Rewrite::Unchanged,
    };
    Rewrite::Replace(next)
}
