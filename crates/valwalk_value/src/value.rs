//! Value definition.
//!
//! The dynamic value type walked by valwalk.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::Kind;

/// A dynamically shaped value.
///
/// Records are value types: cloning a record copies its fields. Maps,
/// sequences and pointers are reference types: cloning a `Value` holding one
/// of them shares the underlying cell, so writes through one handle are seen
/// through every other.
///
/// # Example
///
/// ```rust
/// use valwalk_value::{Kind, Record, Value};
///
/// let point = Value::from(
///     Record::new("Point")
///         .with_field("x", 1)
///         .with_field("y", 2),
/// );
///
/// assert_eq!(point.kind(), Kind::Record);
/// assert_eq!(point.to_string(), "Point { x: 1, y: 2 }");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    C64(Complex<f32>),
    C128(Complex<f64>),
    Str(String),
    Func(Callable),

    /// A dynamically typed wrapper. `None` is the empty wrapper.
    Dynamic(Option<Box<Value>>),

    Record(Record),
    Map(MapRef),
    Seq(SeqRef),

    /// A pointer. `None` is the null pointer.
    Ptr(Option<Ptr>),

    /// A foreign handle the walker cannot look into.
    Opaque(Opaque),
}

impl Value {
    /// Returns the shape of this value.
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Char(_) => Kind::Char,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::C64(_) => Kind::C64,
            Value::C128(_) => Kind::C128,
            Value::Str(_) => Kind::Str,
            Value::Func(_) => Kind::Func,
            Value::Dynamic(_) => Kind::Dynamic,
            Value::Record(_) => Kind::Record,
            Value::Map(_) => Kind::Map,
            Value::Seq(_) => Kind::Seq,
            Value::Ptr(_) => Kind::Ptr,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    /// Creates the empty dynamic wrapper.
    #[inline]
    pub const fn nil() -> Self {
        Value::Dynamic(None)
    }

    /// Creates the null pointer.
    #[inline]
    pub const fn null_ptr() -> Self {
        Value::Ptr(None)
    }

    /// Wraps a value in a dynamic wrapper.
    ///
    /// The empty wrapper stays empty rather than being wrapped again, so a
    /// wrapper's content can be replaced with [`Value::nil`].
    pub fn dynamic(value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Dynamic(None) => Value::Dynamic(None),
            value => Value::Dynamic(Some(Box::new(value))),
        }
    }

    /// Allocates a new pointer cell holding `value`.
    pub fn ptr(value: impl Into<Value>) -> Self {
        Value::Ptr(Some(Ptr::new(value.into())))
    }

    /// Creates a new sequence.
    pub fn seq<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Creates a new map.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the record if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the record mutably if this is one.
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the text if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for the null pointer and the empty wrapper.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Ptr(None) | Value::Dynamic(None))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::nil()
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Complex<f32> => C64,
    Complex<f64> => C128,
    String => Str,
    Callable => Func,
    Record => Record,
    MapRef => Map,
    SeqRef => Seq,
    Opaque => Opaque,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Ptr> for Value {
    fn from(value: Ptr) -> Self {
        Value::Ptr(Some(value))
    }
}

/// A complex number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    #[inline]
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Visibility of a record field.
///
/// Private fields are carried along by copies but never visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A named field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub visibility: Visibility,
    pub value: Value,
}

impl Field {
    /// Returns true if the walker may visit this field.
    #[inline]
    pub const fn is_accessible(&self) -> bool {
        matches!(self.visibility, Visibility::Public)
    }
}

/// A struct-like value with a type name and a fixed, ordered set of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<Field>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a public field.
    pub fn with_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(name, Visibility::Public, value)
    }

    /// Appends a private field.
    pub fn with_private(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(name, Visibility::Private, value)
    }

    fn with(
        mut self,
        name: impl Into<String>,
        visibility: Visibility,
        value: impl Into<Value>,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            visibility,
            value: value.into(),
        });
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field storage is fixed-size; only values can change.
    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    /// Returns the value of the named field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Returns the value of the named field mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|field| field.name == name)
            .map(|field| &mut field.value)
    }

    /// Replaces the value of the named field, returning the old value.
    ///
    /// Returns `None` and leaves the record untouched if there is no such field.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Option<Value> {
        self.get_mut(name)
            .map(|slot| std::mem::replace(slot, value.into()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Char(char),
    Str(String),
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<u64> for Key {
    fn from(value: u64) -> Self {
        Key::Uint(value)
    }
}

impl From<char> for Key {
    fn from(value: char) -> Self {
        Key::Char(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

/// A shared, mutable pointer cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Ptr(Rc<RefCell<Value>>);

impl Ptr {
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrows the pointee.
    ///
    /// # Panics
    ///
    /// Panics if the pointee is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, Value> {
        self.0.borrow()
    }

    /// Borrows the pointee mutably.
    ///
    /// # Panics
    ///
    /// Panics if the pointee is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Value> {
        self.0.borrow_mut()
    }

    /// Returns true if both pointers refer to the same cell.
    pub fn ptr_eq(&self, other: &Ptr) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn try_borrow(&self) -> Option<Ref<'_, Value>> {
        self.0.try_borrow().ok()
    }
}

/// A shared, mutable, insertion-ordered map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapRef(Rc<RefCell<IndexMap<Key, Value>>>);

impl MapRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn borrow(&self) -> Ref<'_, IndexMap<Key, Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, IndexMap<Key, Value>> {
        self.0.borrow_mut()
    }

    /// Returns a copy of the value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Inserts or overwrites an entry, returning the previous value.
    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn ptr_eq(&self, other: &MapRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn try_borrow(&self) -> Option<Ref<'_, IndexMap<Key, Value>>> {
        self.0.try_borrow().ok()
    }
}

impl FromIterator<(Key, Value)> for MapRef {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

/// A shared, mutable sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeqRef(Rc<RefCell<Vec<Value>>>);

impl SeqRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn ptr_eq(&self, other: &SeqRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn try_borrow(&self) -> Option<Ref<'_, Vec<Value>>> {
        self.0.try_borrow().ok()
    }
}

impl FromIterator<Value> for SeqRef {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

type NativeFn = dyn Fn(&[Value]) -> Value;

/// A named callable.
///
/// Callables compare equal only to clones of themselves.
#[derive(Clone)]
pub struct Callable {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl Callable {
    pub fn new(name: &str, func: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").field("name", &self.name).finish()
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

/// A foreign handle.
///
/// Opaque values are never classified as leaves or nodes, so the walker
/// neither visits nor replaces them. They compare equal only to clones of
/// themselves.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    handle: Rc<dyn Any>,
}

impl Opaque {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            handle: Rc::new(value),
        }
    }

    /// Returns the Rust type name of the wrapped handle.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opaque")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }
}
