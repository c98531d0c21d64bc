use crate::{error::ModelError, value::Value};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

///
/// Shared
///
/// Reference-counted container with a one-way frozen flag.
/// Writes are checked against the flag while the write lock is held, so a
/// container never changes after `freeze` returns.
///

pub(crate) struct Shared<T> {
    inner: Arc<SharedInner<T>>,
}

struct SharedInner<T> {
    frozen: AtomicBool,
    data: RwLock<T>,
}

impl<T> Shared<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            inner: Arc::new(SharedInner {
                frozen: AtomicBool::new(false),
                data: RwLock::new(data),
            }),
        }
    }

    pub(crate) fn is_frozen(&self) -> bool {
        self.inner.frozen.load(Ordering::Acquire)
    }

    pub(crate) fn freeze(&self) {
        let _guard = self.inner.data.write();
        self.inner.frozen.store(true, Ordering::Release);
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.data.read()
    }

    pub(crate) fn write(
        &self,
        target: &'static str,
        key: impl ToString,
    ) -> Result<RwLockWriteGuard<'_, T>, ModelError> {
        let guard = self.inner.data.write();
        if self.inner.frozen.load(Ordering::Acquire) {
            return Err(ModelError::read_only(target, key.to_string()));
        }

        Ok(guard)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

///
/// Record
///
/// Plain data object: string keys mapped to values.
/// Cloning a `Record` clones the handle; both handles see the same entries.
/// Use `deep_copy` for an independent copy.
///

#[derive(Clone)]
pub struct Record(Shared<BTreeMap<String, Value>>);

impl Record {
    const TARGET: &'static str = "frozen record";

    #[must_use]
    pub fn new() -> Self {
        Self(Shared::new(BTreeMap::new()))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn insert(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, ModelError> {
        let key = key.into();
        let mut entries = self.0.write(Self::TARGET, &key)?;

        Ok(entries.insert(key, value.into()))
    }

    pub fn remove(&self, key: &str) -> Result<Option<Value>, ModelError> {
        let mut entries = self.0.write(Self::TARGET, key)?;

        Ok(entries.remove(key))
    }

    /// Snapshot of the keys, in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().cloned().collect()
    }

    /// Snapshot of the values, in key order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.0.read().values().cloned().collect()
    }

    /// Snapshot of the entries, in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.0.is_frozen()
    }

    /// Shallow freeze: entries can no longer be added, replaced or removed.
    pub fn freeze(&self) {
        self.0.freeze();
    }

    /// True when both handles point at the same record.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }

    /// Build a record from a JSON object.
    #[cfg(feature = "json")]
    pub fn from_json(json: serde_json::Value) -> Result<Self, ModelError> {
        match Value::from(json) {
            Value::Record(record) => Ok(record),
            other => Err(ModelError::InvalidShape {
                expected: "record",
                actual: other.kind().label(),
            }),
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

// both sides are snapshotted first; no lock is held while entries are compared
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        let ours = self.0.read().clone();
        let theirs = other.0.read().clone();

        ours == theirs
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.read().iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Shared::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }
}

///
/// List
///
/// Ordered sequence of values with the same handle semantics as `Record`.
///

#[derive(Clone)]
pub struct List(Shared<Vec<Value>>);

impl List {
    const TARGET: &'static str = "frozen list";

    #[must_use]
    pub fn new() -> Self {
        Self(Shared::new(Vec::new()))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    pub fn push(&self, value: impl Into<Value>) -> Result<(), ModelError> {
        let mut items = self.0.write(Self::TARGET, "push")?;
        items.push(value.into());

        Ok(())
    }

    /// Replace the item at `index`, returning the previous value.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<Value, ModelError> {
        let mut items = self.0.write(Self::TARGET, index)?;
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfBounds { index, len })?;

        Ok(std::mem::replace(slot, value.into()))
    }

    /// Snapshot of the items.
    #[must_use]
    pub fn items(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.0.is_frozen()
    }

    /// Shallow freeze: items can no longer be pushed or replaced.
    pub fn freeze(&self) {
        self.0.freeze();
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.items() == other.items()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.read().iter()).finish()
    }
}

impl<V> FromIterator<V> for List
where
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(Shared::new(iter.into_iter().map(Into::into).collect()))
    }
}
