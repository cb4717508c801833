//! Insertion-ordered collection of distinct values.
//!
//! A set is a [`List`] whose insertions are preceded by a membership test
//! using the language's equality, so no two elements compare `Equal`.
//! Lookups are linear.

use std::fmt;
use std::ops::Deref;

use crate::compare::position;
use crate::errors::ValueResult;
use crate::list::List;
use crate::value::Value;

pub struct Set {
    items: List,
}

impl Set {
    /// Empty set with room for `space` elements.
    pub fn with_space(space: usize) -> ValueResult<Self> {
        Ok(Set {
            items: List::with_space(space)?,
        })
    }

    /// 1-based position of an element equal to `value`, or 0.
    pub fn search(&self, value: &Value) -> usize {
        position(&self.items, value)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.search(value) != 0
    }

    /// Insert a copy of `value` unless an equal element is present.
    ///
    /// Returns whether the set grew.
    pub fn insert(&mut self, value: &Value) -> ValueResult<bool> {
        if self.contains(value) {
            return Ok(false);
        }
        self.items.push(value)?;
        Ok(true)
    }

    /// Insert `value` without copying unless an equal element is present.
    pub fn insert_owned(&mut self, value: Value) -> ValueResult<bool> {
        if self.contains(&value) {
            return Ok(false);
        }
        self.items.push_owned(value)?;
        Ok(true)
    }

    /// Remove the element equal to `value`, if any.
    pub fn remove_value(&mut self, value: &Value) -> Option<Value> {
        let found = self.search(value);
        if found == 0 {
            return None;
        }
        self.items.remove(isize::try_from(found - 1).ok()?).ok()
    }

    /// Underlying list. Pushing through it bypasses the uniqueness check.
    pub fn list_mut(&mut self) -> &mut List {
        &mut self.items
    }

    pub fn as_list(&self) -> &List {
        &self.items
    }

    pub fn deep_copy(&self) -> ValueResult<Set> {
        Ok(Set {
            items: self.items.deep_copy()?,
        })
    }

    pub fn byte_size(&self) -> usize {
        self.items.byte_size()
    }
}

impl Deref for Set {
    type Target = List;

    fn deref(&self) -> &List {
        &self.items
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests;
