use std::ops::Index;

use indexmap::{map, IndexMap};

use crate::error::{Error, Result};
use crate::value::{Payload, Value};

/// An NBT compound: string keys mapped to values, in insertion order.
///
/// Iteration, and therefore encoding, follows the order keys were first
/// inserted. Replacing the value of an existing key keeps its position.
/// Equality ignores order: two compounds are equal when they hold the same
/// keys with equal values.
///
/// ```
/// # use nbtree::Compound;
/// let mut c = Compound::new();
/// c.insert("a", 1);
/// c.insert("c", 2);
/// c.insert("b", 3);
/// c.insert("c", 4);
///
/// let keys: Vec<&str> = c.keys().collect();
/// assert_eq!(keys, ["a", "c", "b"]);
/// assert_eq!(c.get_as::<i32>("c").unwrap(), &4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: IndexMap<String, Value>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a value under `key`. If the key already exists its value is
    /// replaced in place and the old value returned, otherwise the entry goes
    /// at the end.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Look up `key` and narrow its value to `T`.
    ///
    /// Fails with [`ErrorKind::KeyNotFound`][`crate::error::ErrorKind::KeyNotFound`]
    /// if there is no such key, or a type mismatch if the value is not a `T`.
    pub fn get_as<T: Payload>(&self, key: &str) -> Result<&T> {
        self.get(key)
            .ok_or_else(|| Error::key_not_found(key))?
            .try_as()
    }

    pub fn get_as_mut<T: Payload>(&mut self, key: &str) -> Result<&mut T> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| Error::key_not_found(key))?
            .try_as_mut()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove the entry for `key`, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Iterate with mutable values. Keys cannot be changed.
    pub fn iter_mut(&mut self) -> map::IterMut<'_, String, Value> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// Wrap this compound as the root of a document named `name`, giving the
    /// shape that [`to_bytes`][`crate::to_bytes`] expects and
    /// [`from_bytes`][`crate::from_bytes`] returns.
    pub fn into_root(self, name: impl Into<String>) -> Value {
        let mut wrapper = Compound::with_capacity(1);
        wrapper.insert(name, self);
        Value::Compound(wrapper)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        compound.extend(iter);
        compound
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Compound {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a mut Compound {
    type Item = (&'a String, &'a mut Value);
    type IntoIter = map::IterMut<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter_mut()
    }
}

/// Panics if the key is missing, as `HashMap` does. Use [`Compound::get`] or
/// [`Compound::get_as`] when it might be.
impl Index<&str> for Compound {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.entries.get(key) {
            Some(value) => value,
            None => panic!("no entry for key {:?} in compound", key),
        }
    }
}
