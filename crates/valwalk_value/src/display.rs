//! Human-readable rendering of values.

use std::fmt;

use crate::{Complex, Key, Record, Value};

const BORROWED: &str = "<borrowed>";

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::Isize(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::Usize(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::C64(v) => write_complex(f, v),
            Value::C128(v) => write_complex(f, v),
            Value::Str(v) => f.write_str(v),
            Value::Func(func) => write!(f, "fn {}", func.name()),
            Value::Dynamic(None) | Value::Ptr(None) => f.write_str("nil"),
            Value::Dynamic(Some(inner)) => write!(f, "{inner}"),
            Value::Record(record) => write!(f, "{record}"),
            Value::Map(map) => match map.try_borrow() {
                Some(entries) => {
                    f.write_str("{")?;
                    for (i, (key, value)) in entries.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{key}: {value}")?;
                    }
                    f.write_str("}")
                }
                None => f.write_str(BORROWED),
            },
            Value::Seq(seq) => match seq.try_borrow() {
                Some(items) => {
                    f.write_str("[")?;
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{item}")?;
                    }
                    f.write_str("]")
                }
                None => f.write_str(BORROWED),
            },
            Value::Ptr(Some(ptr)) => match ptr.try_borrow() {
                Some(pointee) => write!(f, "&{}", *pointee),
                None => write!(f, "&{BORROWED}"),
            },
            Value::Opaque(handle) => write!(f, "<{}>", handle.type_name()),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{} {{}}", self.type_name());
        }

        write!(f, "{} {{ ", self.type_name())?;
        for (i, field) in self.fields().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field.name, field.value)?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(v) => write!(f, "{v}"),
            Key::Int(v) => write!(f, "{v}"),
            Key::Uint(v) => write!(f, "{v}"),
            Key::Char(v) => write!(f, "{v}"),
            Key::Str(v) => f.write_str(v),
        }
    }
}

fn write_complex<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: &Complex<T>) -> fmt::Result {
    write!(f, "({}{:+}i)", value.re, value.im)
}
