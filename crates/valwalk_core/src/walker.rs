//! Recursive walk-and-rewrite engine.
//!
//! A [`Walker`] visits every node and leaf reachable from a root [`Value`],
//! hands each one to a callback together with its nesting depth, and writes
//! any [`Rewrite::Replace`] the callback returns back into the structure.
//!
//! Replacements are written in place when the slot holding the value is
//! settable. When it is not, the replacement is handed back to the owner: a
//! map rewrites the entry, a dynamic wrapper rewraps its content, and a record
//! is copied on the first changed field and the copy is handed further up.
//!
//! | Slot                      | Settable |
//! |---------------------------|----------|
//! | root of [`Walker::go`]    | yes      |
//! | root of [`Walker::go_value`] | no    |
//! | record field              | same as its record |
//! | sequence element          | yes      |
//! | pointee                   | yes      |
//! | map value                 | no       |
//! | dynamic wrapper content   | no       |

use std::convert::Infallible;
use std::fmt;

use tracing::{debug, trace};
use valwalk_value::{Class, MapRef, NodeKind, Ptr, Record, SeqRef, Value, classify};

use crate::{Filter, WalkConfig, WalkError};

/// What a callback wants done with the value it was shown.
///
/// Also the result of every recursive step: `Replace` tells the owner of the
/// slot to install the value, `Unchanged` tells it to leave the slot alone.
#[derive(Debug, Clone, PartialEq, Default)]
#[must_use]
pub enum Rewrite {
    /// Keep the current value.
    #[default]
    Unchanged,
    /// Put this value in place of the current one.
    Replace(Value),
}

impl Rewrite {
    /// Creates a replacement.
    pub fn replace(value: impl Into<Value>) -> Self {
        Rewrite::Replace(value.into())
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Rewrite::Unchanged)
    }

    /// Returns the replacement, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Rewrite::Unchanged => None,
            Rewrite::Replace(value) => Some(value),
        }
    }
}

/// Counters for a single traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Number of callback invocations.
    pub callbacks: usize,
    /// Number of records copied because a field changed behind a slot that
    /// was not settable.
    pub records_cloned: usize,
    /// Number of values skipped because their shape is not understood.
    pub unsupported_skipped: usize,
}

type WalkFn<'a, E> = dyn FnMut(&Value, usize) -> Result<Rewrite, E> + 'a;

/// A location holding the value being walked.
enum Slot<'v> {
    Settable(&'v mut Value),
    Fixed(&'v Value),
}

impl Slot<'_> {
    fn get(&self) -> &Value {
        match self {
            Slot::Settable(value) => value,
            Slot::Fixed(value) => value,
        }
    }

    /// Installs `value` if the slot is settable, otherwise hands it back.
    fn put(self, value: Value) -> Rewrite {
        match self {
            Slot::Settable(target) => {
                *target = value;
                Rewrite::Unchanged
            }
            Slot::Fixed(_) => Rewrite::Replace(value),
        }
    }
}

/// Traversal driver.
///
/// A walker owns its callback and filter. Depth is tracked per call, so a
/// walker can be reused for any number of traversals, one at a time.
///
/// # Example
///
/// ```rust
/// use valwalk_core::{Rewrite, Walker};
/// use valwalk_value::Value;
///
/// let mut value = Value::seq([5, 10]);
///
/// let mut walker = Walker::new(|value, _depth| match value {
///     Value::I32(n) => Rewrite::replace(n + 1),
///     _ => Rewrite::Unchanged,
/// });
/// walker.go(&mut value).unwrap();
///
/// assert_eq!(value, Value::seq([6, 11]));
/// ```
pub struct Walker<'a, E = Infallible> {
    callback: Box<WalkFn<'a, E>>,
    filter: Filter,
    stats: WalkStats,
}

impl<'a> Walker<'a, Infallible> {
    /// Creates a walker over every leaf and node with an infallible callback.
    pub fn new<F>(mut callback: F) -> Self
    where
        F: FnMut(&Value, usize) -> Rewrite + 'a,
    {
        Self::try_new(move |value, depth| Ok(callback(value, depth)))
    }
}

impl<'a, E> Walker<'a, E> {
    /// Creates a walker over every leaf and node with a fallible callback.
    ///
    /// The first error returned by the callback stops the traversal and is
    /// returned unchanged from [`go`](Self::go) or [`go_value`](Self::go_value).
    pub fn try_new<F>(callback: F) -> Self
    where
        F: FnMut(&Value, usize) -> Result<Rewrite, E> + 'a,
    {
        Self {
            callback: Box::new(callback),
            filter: Filter::All,
            stats: WalkStats::default(),
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Returns the counters of the most recent traversal.
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Walks `root` in place.
    ///
    /// The root is settable: leaf replacements anywhere in the tree are
    /// written where they occur, and a node callback that replaces the root
    /// itself replaces `*root`.
    pub fn go(&mut self, root: &mut Value) -> Result<(), E> {
        self.stats = WalkStats::default();
        if let Rewrite::Replace(value) = self.walk_value(Slot::Settable(&mut *root), 0)? {
            *root = value;
        }
        self.finish();
        Ok(())
    }

    /// Walks `root` without write access to it.
    ///
    /// Values behind shared cells (sequence elements, map entries, pointees)
    /// are still rewritten in place. Records reached without a settable slot
    /// are copied on the first changed field, and a changed root comes back
    /// as [`Rewrite::Replace`]. `root` itself is never modified.
    pub fn go_value(&mut self, root: &Value) -> Result<Rewrite, E> {
        self.stats = WalkStats::default();
        let rewrite = self.walk_value(Slot::Fixed(root), 0)?;
        self.finish();
        Ok(rewrite)
    }

    fn finish(&self) {
        debug!(
            callbacks = self.stats.callbacks,
            records_cloned = self.stats.records_cloned,
            unsupported_skipped = self.stats.unsupported_skipped,
            "walk finished"
        );
    }

    fn invoke(&mut self, value: &Value, depth: usize) -> Result<Rewrite, E> {
        self.stats.callbacks += 1;
        (self.callback)(value, depth)
    }

    fn walk_value(&mut self, slot: Slot<'_>, depth: usize) -> Result<Rewrite, E> {
        if matches!(slot.get(), Value::Dynamic(Some(_))) {
            return self.walk_dynamic(slot, depth);
        }

        if let Value::Ptr(ptr) = slot.get() {
            let Some(ptr) = ptr.clone() else {
                trace!(depth, "null pointer not followed");
                return Ok(Rewrite::Unchanged);
            };
            return self.walk_pointee(&ptr, depth);
        }

        match classify(slot.get()) {
            Class::Leaf => self.walk_leaf(slot, depth),
            Class::Node(kind) => self.walk_node(slot, kind, depth),
            // Both indirections were followed above.
            Class::Indirection => Ok(Rewrite::Unchanged),
            Class::Unsupported => {
                self.stats.unsupported_skipped += 1;
                trace!(depth, kind = %slot.get().kind(), "unsupported value skipped");
                Ok(Rewrite::Unchanged)
            }
        }
    }

    fn walk_dynamic(&mut self, slot: Slot<'_>, depth: usize) -> Result<Rewrite, E> {
        let rewrite = match slot.get() {
            // The content of a wrapper is never settable through the wrapper.
            Value::Dynamic(Some(inner)) => self.walk_value(Slot::Fixed(&**inner), depth)?,
            _ => Rewrite::Unchanged,
        };

        Ok(match rewrite {
            Rewrite::Unchanged => Rewrite::Unchanged,
            Rewrite::Replace(value) => slot.put(Value::dynamic(value)),
        })
    }

    /// The pointer slot is never replaced; the pointee is.
    fn walk_pointee(&mut self, ptr: &Ptr, depth: usize) -> Result<Rewrite, E> {
        let mut pointee = ptr.borrow_mut();
        if let Rewrite::Replace(value) = self.walk_value(Slot::Settable(&mut *pointee), depth)? {
            *pointee = value;
        }
        Ok(Rewrite::Unchanged)
    }

    fn walk_leaf(&mut self, slot: Slot<'_>, depth: usize) -> Result<Rewrite, E> {
        if !self.filter.visits_leaves() {
            return Ok(Rewrite::Unchanged);
        }

        match self.invoke(slot.get(), depth)? {
            Rewrite::Unchanged => Ok(Rewrite::Unchanged),
            Rewrite::Replace(value) => Ok(slot.put(value)),
        }
    }

    fn walk_node(&mut self, slot: Slot<'_>, kind: NodeKind, depth: usize) -> Result<Rewrite, E> {
        // A node replacement supersedes the whole subtree: the original
        // children are not visited.
        if self.filter.visits_nodes()
            && let Rewrite::Replace(value) = self.invoke(slot.get(), depth)?
        {
            return Ok(Rewrite::Replace(value));
        }

        let depth = depth + 1;
        match (kind, slot) {
            (NodeKind::Record, Slot::Settable(value)) => match value.as_record_mut() {
                Some(record) => self.walk_record_in_place(record, depth),
                None => Ok(Rewrite::Unchanged),
            },
            (NodeKind::Record, Slot::Fixed(value)) => match value.as_record() {
                Some(record) => self.walk_record_copy_on_write(record, depth),
                None => Ok(Rewrite::Unchanged),
            },
            (NodeKind::Map, slot) => match slot.get() {
                Value::Map(map) => self.walk_map(map, depth),
                _ => Ok(Rewrite::Unchanged),
            },
            (NodeKind::Seq, slot) => match slot.get() {
                Value::Seq(seq) => self.walk_seq(seq, depth),
                _ => Ok(Rewrite::Unchanged),
            },
        }
    }

    fn walk_record_in_place(&mut self, record: &mut Record, depth: usize) -> Result<Rewrite, E> {
        for field in record.fields_mut().iter_mut() {
            if !field.is_accessible() {
                continue;
            }
            if let Rewrite::Replace(value) =
                self.walk_value(Slot::Settable(&mut field.value), depth)?
            {
                field.value = value;
            }
        }
        Ok(Rewrite::Unchanged)
    }

    fn walk_record_copy_on_write(&mut self, record: &Record, depth: usize) -> Result<Rewrite, E> {
        let mut copy: Option<Record> = None;

        for (index, field) in record.fields().iter().enumerate() {
            if !field.is_accessible() {
                continue;
            }
            let Rewrite::Replace(value) = self.walk_value(Slot::Fixed(&field.value), depth)? else {
                continue;
            };

            let copy = copy.get_or_insert_with(|| {
                self.stats.records_cloned += 1;
                trace!(
                    record = record.type_name(),
                    field = field.name.as_str(),
                    depth,
                    "copying record for write"
                );
                record.clone()
            });
            copy.fields_mut()[index].value = value;
        }

        Ok(copy.map_or(Rewrite::Unchanged, |record| {
            Rewrite::Replace(Value::Record(record))
        }))
    }

    /// Map values are not settable: a replacement is handed back and written
    /// into its entry before the next entry is visited. Keys are never walked.
    fn walk_map(&mut self, map: &MapRef, depth: usize) -> Result<Rewrite, E> {
        let mut entries = map.borrow_mut();
        for value in entries.values_mut() {
            if let Rewrite::Replace(next) = self.walk_value(Slot::Fixed(&*value), depth)? {
                *value = next;
            }
        }
        Ok(Rewrite::Unchanged)
    }

    fn walk_seq(&mut self, seq: &SeqRef, depth: usize) -> Result<Rewrite, E> {
        let mut items = seq.borrow_mut();
        for item in items.iter_mut() {
            if let Rewrite::Replace(value) = self.walk_value(Slot::Settable(&mut *item), depth)? {
                *item = value;
            }
        }
        Ok(Rewrite::Unchanged)
    }
}

impl<E> fmt::Debug for Walker<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("filter", &self.filter)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Walker`] with a non-default filter.
///
/// # Example
///
/// ```rust
/// use valwalk_core::{Filter, Rewrite, WalkerBuilder};
/// use valwalk_value::Value;
///
/// let mut kinds = Vec::new();
/// let mut walker = WalkerBuilder::new()
///     .filter(Filter::NodesOnly)
///     .callback(|value: &Value, depth| {
///         kinds.push((value.kind().as_str(), depth));
///         Rewrite::Unchanged
///     })
///     .build()
///     .unwrap();
///
/// walker.go(&mut Value::seq([Value::seq([1])])).unwrap();
/// drop(walker);
///
/// assert_eq!(kinds, [("seq", 0), ("seq", 1)]);
/// ```
pub struct WalkerBuilder<'a, E = Infallible> {
    callback: Option<Box<WalkFn<'a, E>>>,
    filter: Filter,
}

impl<'a> WalkerBuilder<'a, Infallible> {
    /// Creates a builder with no callback and [`Filter::All`].
    pub fn new() -> Self {
        Self {
            callback: None,
            filter: Filter::All,
        }
    }

    /// Sets an infallible callback.
    pub fn callback<F>(self, mut callback: F) -> Self
    where
        F: FnMut(&Value, usize) -> Rewrite + 'a,
    {
        self.try_callback(move |value, depth| Ok(callback(value, depth)))
    }
}

impl Default for WalkerBuilder<'_, Infallible> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E> WalkerBuilder<'a, E> {
    /// Sets a fallible callback.
    pub fn try_callback<E2, F>(self, callback: F) -> WalkerBuilder<'a, E2>
    where
        F: FnMut(&Value, usize) -> Result<Rewrite, E2> + 'a,
    {
        WalkerBuilder {
            callback: Some(Box::new(callback)),
            filter: self.filter,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Applies the traversal settings of a [`WalkConfig`].
    pub fn config(self, config: &WalkConfig) -> Self {
        self.filter(config.filter)
    }

    /// Builds the walker.
    ///
    /// Fails with [`WalkError::MissingCallback`] if no callback was set.
    pub fn build(self) -> Result<Walker<'a, E>, WalkError> {
        let callback = self.callback.ok_or(WalkError::MissingCallback)?;
        Ok(Walker {
            callback,
            filter: self.filter,
            stats: WalkStats::default(),
        })
    }
}

/// Walks `root` in place with an infallible callback.
pub fn walk<F>(root: &mut Value, callback: F)
where
    F: FnMut(&Value, usize) -> Rewrite,
{
    let Ok(()) = Walker::new(callback).go(root);
}

/// Walks `root` in place with a fallible callback.
pub fn try_walk<F, E>(root: &mut Value, callback: F) -> Result<(), E>
where
    F: FnMut(&Value, usize) -> Result<Rewrite, E>,
{
    Walker::try_new(callback).go(root)
}
