//! Resizable ordered sequence of owned values.
//!
//! `space` is the capacity the list has committed to. It grows by
//! [`LIST_INCREMENT`] when a push finds the list full and shrinks by the same
//! step after a pop, but only once the slack exceeds a whole increment, so
//! alternating push/pop at a boundary does not reallocate every time.

use std::fmt;
use std::mem;
use std::slice;

use crate::errors::{reserve_vec, ValueError, ValueResult};
use crate::limits::{check_len, LIST_INCREMENT, MAX_LEN};
use crate::value::Value;

/// Ordered, owning sequence of values.
pub struct List {
    items: Vec<Value>,
    space: usize,
}

impl List {
    /// Empty list with room for `space` elements.
    pub fn with_space(space: usize) -> ValueResult<Self> {
        check_len(space)?;
        let mut items = Vec::new();
        reserve_vec(&mut items, space)?;
        Ok(List { items, space })
    }

    /// List owning `items`, with no spare room.
    pub fn from_values(items: Vec<Value>) -> ValueResult<Self> {
        check_len(items.len())?;
        let space = items.len();
        Ok(List { items, space })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Committed capacity.
    #[inline]
    pub fn space(&self) -> usize {
        self.space
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Change the committed capacity. Never drops elements.
    pub fn resize(&mut self, space: usize) -> ValueResult<()> {
        let len = self.items.len();
        if space < len {
            return Err(ValueError::BelowLength {
                requested: space,
                len,
            });
        }
        check_len(space)?;
        if space > self.items.capacity() {
            reserve_vec(&mut self.items, space - len)?;
        } else {
            self.items.shrink_to(space);
        }
        tracing::trace!(from = self.space, to = space, "list resized");
        self.space = space;
        Ok(())
    }

    fn grow(&mut self) -> ValueResult<()> {
        let len = self.items.len();
        if len < self.space {
            return Ok(());
        }
        let target = (self.space + LIST_INCREMENT).min(MAX_LEN);
        if target <= len {
            return Err(ValueError::CapacityExceeded {
                requested: len + 1,
                limit: MAX_LEN,
            });
        }
        self.resize(target)
    }

    fn shrink(&mut self) {
        if self.space - self.items.len() > LIST_INCREMENT {
            let target = self.space - LIST_INCREMENT;
            self.items.shrink_to(target);
            tracing::trace!(from = self.space, to = target, "list shrunk");
            self.space = target;
        }
    }

    /// Append a deep copy of `value`.
    pub fn push(&mut self, value: &Value) -> ValueResult<&mut Value> {
        let copy = value.deep_copy()?;
        self.push_owned(copy)
    }

    /// Append `value` without copying.
    pub fn push_owned(&mut self, value: Value) -> ValueResult<&mut Value> {
        self.grow()?;
        let index = self.items.len();
        self.items.push(value);
        Ok(&mut self.items[index])
    }

    /// Append a `None` slot and return it for the caller to move into.
    pub fn push_slot(&mut self) -> ValueResult<&mut Value> {
        self.push_owned(Value::None)
    }

    /// Move the last element out.
    pub fn pop(&mut self) -> Option<Value> {
        let value = self.items.pop()?;
        self.shrink();
        Some(value)
    }

    /// Drop the last `count` elements (all of them if fewer remain).
    pub fn pop_n(&mut self, count: usize) {
        let keep = self.items.len().saturating_sub(count);
        self.items.truncate(keep);
    }

    /// Normalize a possibly negative index into `[0, len)`.
    fn position(&self, index: isize) -> ValueResult<usize> {
        let len = self.items.len();
        let resolved = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        match resolved {
            Some(i) if i < len => Ok(i),
            _ => Err(ValueError::IndexOutOfRange { index, len }),
        }
    }

    /// Deep copy of the element at `index`; negative indices count from the end.
    pub fn get(&self, index: isize) -> ValueResult<Value> {
        let i = self.position(index)?;
        self.items[i].deep_copy()
    }

    /// Borrow the element at `index`; negative indices count from the end.
    pub fn get_ref(&self, index: isize) -> Option<&Value> {
        let i = self.position(index).ok()?;
        self.items.get(i)
    }

    pub fn get_mut(&mut self, index: isize) -> Option<&mut Value> {
        let i = self.position(index).ok()?;
        self.items.get_mut(i)
    }

    /// Borrow the element at a plain position.
    #[inline]
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Remove and return the element at `index`, shifting successors left.
    pub fn remove(&mut self, index: isize) -> ValueResult<Value> {
        let i = self.position(index)?;
        Ok(self.items.remove(i))
    }

    /// Insert `value` before position `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, value: Value) -> ValueResult<()> {
        let len = self.items.len();
        if index > len {
            return Err(ValueError::IndexOutOfRange {
                index: isize::try_from(index).unwrap_or(isize::MAX),
                len,
            });
        }
        self.grow()?;
        self.items.insert(index, value);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    pub fn change(&mut self, index: isize, value: Value) -> ValueResult<Value> {
        let i = self.position(index)?;
        Ok(mem::replace(&mut self.items[i], value))
    }

    /// Remove the element at `index` by moving the last element into its place.
    pub fn swap_remove(&mut self, index: usize) -> Option<Value> {
        (index < self.items.len()).then(|| self.items.swap_remove(index))
    }

    /// Drop every element, keeping the committed capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Copy of the list with the same capacity and copied elements.
    pub fn deep_copy(&self) -> ValueResult<List> {
        let mut copy = List::with_space(self.space)?;
        for item in &self.items {
            copy.items.push(item.deep_copy()?);
        }
        Ok(copy)
    }

    /// Bytes owned by the list: its header, every element, every spare slot.
    pub fn byte_size(&self) -> usize {
        let spare = self.space - self.items.len();
        mem::size_of::<List>()
            + self.items.iter().map(Value::byte_size).sum::<usize>()
            + spare * mem::size_of::<Value>()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}
