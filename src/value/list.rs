use std::{marker::PhantomData, slice};

use crate::error::{Error, Result};
use crate::value::{Payload, Value};
use crate::Tag;

/// An NBT list: values that all have the same tag.
///
/// The list records its element tag separately from its elements so that an
/// empty list still has one. [`List::new`] records [`Tag::End`], which is what
/// an empty list normally looks like on the wire, and the first value pushed
/// decides the tag from then on.
///
/// ```
/// # use nbtree::{List, Tag};
/// let mut list = List::new();
/// list.push(1).unwrap();
/// list.push(2).unwrap();
/// assert_eq!(list.element_tag(), Tag::Int);
///
/// // Wrong kind, list unchanged.
/// assert!(list.push(3i16).is_err());
/// assert_eq!(list.len(), 2);
///
/// let sum: i32 = list.iter_as::<i32>().unwrap().sum();
/// assert_eq!(sum, 3);
/// ```
///
/// Elements can be replaced with [`List::set`] or have their payload changed
/// through [`List::get_as_mut`], but never borrowed as a `&mut Value`, so an
/// element can not change kind behind the list's back.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    tag: Tag,
    items: Vec<Value>,
}

impl List {
    /// An empty list recording [`Tag::End`].
    pub fn new() -> Self {
        Self {
            tag: Tag::End,
            items: Vec::new(),
        }
    }

    /// An empty list that already records `tag`. Only values of that kind can
    /// be pushed, and it encodes with that tag even while empty.
    pub fn with_tag(tag: Tag) -> Self {
        Self {
            tag,
            items: Vec::new(),
        }
    }

    /// Build from parts already known to agree, eg. straight off the wire.
    pub(crate) fn from_parts(tag: Tag, items: Vec<Value>) -> Self {
        debug_assert!(items.iter().all(|v| v.tag() == tag));
        Self { tag, items }
    }

    /// The recorded element tag.
    pub fn element_tag(&self) -> Tag {
        self.tag
    }

    fn check(&self, value: &Value) -> Result<()> {
        match self.tag {
            Tag::End if self.items.is_empty() => Ok(()),
            tag if tag == value.tag() => Ok(()),
            tag => Err(Error::type_mismatch(tag, value.tag())),
        }
    }

    /// Append a value. Fails with a type mismatch, leaving the list untouched,
    /// if the value is of a different kind to the recorded tag.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(&value)?;
        self.tag = value.tag();
        self.items.push(value);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let len = self.items.len();
        let value = value.into();
        let slot = self
            .items
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, len))?;

        if slot.tag() != value.tag() {
            return Err(Error::type_mismatch(slot.tag(), value.tag()));
        }
        Ok(std::mem::replace(slot, value))
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn get_as<T: Payload>(&self, index: usize) -> Result<&T> {
        self.items
            .get(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, self.items.len()))?
            .try_as()
    }

    pub fn get_as_mut<T: Payload>(&mut self, index: usize) -> Result<&mut T> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, len))?
            .try_as_mut()
    }

    /// Remove the last element. The recorded tag stays, even if the list
    /// becomes empty.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    /// Remove every element and go back to recording [`Tag::End`].
    pub fn clear(&mut self) {
        self.items.clear();
        self.tag = Tag::End;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    fn check_payload<T: Payload>(&self) -> Result<()> {
        match self.tag {
            Tag::End => Ok(()),
            tag if tag == T::TAG => Ok(()),
            tag => Err(Error::type_mismatch(T::TAG, tag)),
        }
    }

    /// Iterate over the payloads of the elements as `T`.
    ///
    /// Fails up front if the list records a different tag. An empty list
    /// recording `End` gives an empty iterator for any `T`.
    ///
    /// ```
    /// # use nbtree::{nbt, Compound};
    /// let list = nbt!([{"name": "a"}, {"name": "b"}]);
    /// let names: Vec<&str> = list
    ///     .as_list()
    ///     .unwrap()
    ///     .iter_as::<Compound>()
    ///     .unwrap()
    ///     .map(|c| c.get_as::<String>("name").unwrap().as_str())
    ///     .collect();
    /// assert_eq!(names, ["a", "b"]);
    /// ```
    pub fn iter_as<T: Payload>(&self) -> Result<TypedIter<'_, T>> {
        self.check_payload::<T>()?;
        Ok(TypedIter {
            inner: self.items.iter(),
            _marker: PhantomData,
        })
    }

    /// Iterate over mutable payloads of the elements as `T`.
    pub fn iter_as_mut<T: Payload>(&mut self) -> Result<TypedIterMut<'_, T>> {
        self.check_payload::<T>()?;
        Ok(TypedIterMut {
            inner: self.items.iter_mut(),
            _marker: PhantomData,
        })
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Value>> for List {
    type Error = Error;

    /// Fails with a type mismatch unless every value is of the same kind.
    fn try_from(items: Vec<Value>) -> Result<Self> {
        let tag = match items.first() {
            Some(first) => first.tag(),
            None => return Ok(List::new()),
        };
        if let Some(bad) = items.iter().find(|v| v.tag() != tag) {
            return Err(Error::type_mismatch(tag, bad.tag()));
        }
        Ok(Self { tag, items })
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Iterator over list elements as a payload type. See [`List::iter_as`].
#[derive(Debug)]
pub struct TypedIter<'a, T> {
    inner: slice::Iter<'a, Value>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: Payload> Iterator for TypedIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // The list was checked to hold only T, so this never skips.
        self.inner.by_ref().find_map(T::from_value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: Payload> ExactSizeIterator for TypedIter<'a, T> {}

/// Iterator over mutable list elements as a payload type. See
/// [`List::iter_as_mut`].
#[derive(Debug)]
pub struct TypedIterMut<'a, T> {
    inner: slice::IterMut<'a, Value>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: Payload> Iterator for TypedIterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(T::from_value_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: Payload> ExactSizeIterator for TypedIterMut<'a, T> {}
