//! String-keyed, insertion-ordered dictionary.
//!
//! Keys are kept in a vector index-aligned with a [`List`] of values. Lookup
//! is a linear scan. Removal moves the last entry into the freed position,
//! so positions are not stable across `remove`.
//!
//! A dict that acts as an object owns procedures whose receiver parameter
//! (the empty-string key) must point back at the dict. [`Dict::set_location`]
//! performs that binding and is rerun whenever a dict is built or copied.

use std::fmt;
use std::mem;

use crate::errors::{reserve_str, reserve_vec, ValueError, ValueResult};
use crate::limits::{DICT_INCREMENT, MAX_LEN};
use crate::list::List;
use crate::stack::ensure_sufficient_stack;
use crate::value::{Heap, Value};

pub struct Dict {
    keys: Vec<String>,
    values: List,
}

impl Dict {
    /// Empty dict with room for `space` entries.
    pub fn with_space(space: usize) -> ValueResult<Self> {
        let values = List::with_space(space)?;
        let mut keys = Vec::new();
        reserve_vec(&mut keys, space)?;
        Ok(Dict { keys, values })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn space(&self) -> usize {
        self.values.space()
    }

    /// Change the committed capacity. Never drops entries.
    pub fn resize(&mut self, space: usize) -> ValueResult<()> {
        self.values.resize(space)?;
        let len = self.keys.len();
        if space > self.keys.capacity() {
            reserve_vec(&mut self.keys, space - len)?;
        } else {
            self.keys.shrink_to(space);
        }
        Ok(())
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// 1-based position of `key`, or 0 when absent.
    pub fn has_key(&self, key: &str) -> usize {
        self.index_of(key).map_or(0, |i| i + 1)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.at(self.index_of(key)?)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let i = self.index_of(key)?;
        self.values.at_mut(i)
    }

    /// Insert a deep copy of `value` under `key`.
    ///
    /// An existing key keeps its position and has its value replaced.
    pub fn insert(&mut self, key: &str, value: &Value) -> ValueResult<&mut Value> {
        let copy = value.deep_copy()?;
        self.insert_owned(key, copy)
    }

    /// Insert `value` under `key` without copying.
    pub fn insert_owned(&mut self, key: &str, value: Value) -> ValueResult<&mut Value> {
        if let Some(i) = self.index_of(key) {
            let len = self.values.len();
            return self
                .values
                .at_mut(i)
                .map(|slot| {
                    *slot = value;
                    slot
                })
                .ok_or(ValueError::IndexOutOfRange {
                    index: isize::try_from(i).unwrap_or(isize::MAX),
                    len,
                });
        }
        if self.len() == self.space() {
            let target = (self.space() + DICT_INCREMENT).min(MAX_LEN);
            if target <= self.len() {
                return Err(ValueError::CapacityExceeded {
                    requested: self.len() + 1,
                    limit: MAX_LEN,
                });
            }
            tracing::trace!(from = self.space(), to = target, "dict resized");
            self.resize(target)?;
        }
        let mut owned_key = String::new();
        reserve_str(&mut owned_key, key.len())?;
        owned_key.push_str(key);
        self.keys.push(owned_key);
        self.values.push_owned(value)
    }

    /// Remove `key`, moving the last entry into its position.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let i = self.index_of(key)?;
        self.keys.swap_remove(i);
        self.values.swap_remove(i)
    }

    /// Drop every entry, keeping the committed capacity.
    pub fn empty(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    /// Key and value at position `index`.
    pub fn entry_at(&self, index: usize) -> Option<(&str, &Value)> {
        Some((self.keys.get(index)?.as_str(), self.values.at(index)?))
    }

    pub fn value_at_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.at_mut(index)
    }

    /// Replace the value at position `index`, returning the old one.
    pub fn change(&mut self, index: usize, value: Value) -> Option<Value> {
        self.values
            .at_mut(index)
            .map(|slot| mem::replace(slot, value))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn values(&self) -> &List {
        &self.values
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.keys.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Copy of the dict with copied keys and values.
    ///
    /// Receiver bindings inside the copy still point at `self` until the
    /// copy is placed on the heap and passed to [`Dict::set_location`].
    pub fn deep_copy(&self) -> ValueResult<Dict> {
        let mut copy = Dict::with_space(self.space())?;
        for (key, value) in self.iter() {
            let mut owned_key = String::new();
            reserve_str(&mut owned_key, key.len())?;
            owned_key.push_str(key);
            copy.keys.push(owned_key);
            copy.values.push_owned(value.deep_copy()?)?;
        }
        Ok(copy)
    }

    /// Bind every procedure in `dict`, and recursively in nested dicts, to
    /// the dict that directly contains it.
    pub fn set_location(dict: &Heap<Dict>) {
        ensure_sufficient_stack(|| {
            let mut inner = dict.borrow_mut();
            let mut bound = 0usize;
            for value in inner.values.iter_mut() {
                match value {
                    Value::Function(function) => {
                        if function.bind_receiver(dict) {
                            bound += 1;
                        }
                    }
                    Value::Dict(nested) => Dict::set_location(nested),
                    _ => {}
                }
            }
            if bound > 0 {
                tracing::debug!(bound, entries = inner.len(), "bound receivers");
            }
        });
    }

    /// Bytes owned by the dict: keys with terminators plus the value list.
    pub fn byte_size(&self) -> usize {
        let spare_keys = self.space().saturating_sub(self.keys.len());
        mem::size_of::<Dict>()
            + self.keys.iter().map(|key| key.len() + 1).sum::<usize>()
            + spare_keys * mem::size_of::<String>()
            + self.values.byte_size()
    }
}

/// Same entries regardless of order.
impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|theirs| theirs == value))
    }
}

impl fmt::Debug for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
