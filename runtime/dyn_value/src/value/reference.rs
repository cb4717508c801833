//! Non-owning references to other values.
//!
//! A reference observes either an interpreter slot ([`Slot`]) or a dict
//! cell. It never keeps its target alive: once the owner drops the target,
//! reads through the reference see `None`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

use super::{Heap, Slot, Value};
use crate::dict::Dict;

/// How a reference was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefKind {
    /// Transient alias, e.g. an argument passed without copying.
    Alias,
    /// Receiver slot of a procedure bound to its enclosing dict.
    Bound,
}

#[derive(Clone)]
enum Target {
    Slot(Weak<RefCell<Value>>),
    Dict(Weak<RefCell<Dict>>),
}

/// Slots a read follows when targets were overwritten with references.
const MAX_HOPS: usize = 16;

/// Non-owning handle to another value. Never created pointing at another
/// reference; the target may become one later, see [`Reference::read`].
#[derive(Clone)]
pub struct Reference {
    target: Target,
    kind: RefKind,
}

impl Reference {
    /// Alias the value stored in `slot`.
    ///
    /// If the slot already holds a reference, its target is aliased instead,
    /// so chains always resolve in one hop.
    pub fn of_slot(slot: &Slot) -> Self {
        if let Some(current) = slot.try_borrow() {
            if let Value::Reference(existing) = &*current {
                return existing.with_kind(RefKind::Alias);
            }
        }
        Reference {
            target: Target::Slot(slot.observe()),
            kind: RefKind::Alias,
        }
    }

    /// Alias a dict cell.
    pub fn of_dict(dict: &Heap<Dict>) -> Self {
        Reference {
            target: Target::Dict(dict.observe()),
            kind: RefKind::Alias,
        }
    }

    /// Receiver reference binding a procedure to `dict`.
    pub(crate) fn bound(dict: &Heap<Dict>) -> Self {
        Reference {
            target: Target::Dict(dict.observe()),
            kind: RefKind::Bound,
        }
    }

    fn with_kind(&self, kind: RefKind) -> Self {
        Reference {
            target: self.target.clone(),
            kind,
        }
    }

    #[inline]
    pub fn kind(&self) -> RefKind {
        self.kind
    }

    /// Whether the target is still alive.
    pub fn is_alive(&self) -> bool {
        match &self.target {
            Target::Slot(weak) => weak.strong_count() > 0,
            Target::Dict(weak) => weak.strong_count() > 0,
        }
    }

    /// Whether this reference observes `dict`.
    pub fn points_to(&self, dict: &Heap<Dict>) -> bool {
        match &self.target {
            Target::Dict(weak) => dict.is_observed_by(weak),
            Target::Slot(_) => false,
        }
    }

    /// Read the target through `f`.
    ///
    /// A slot that has since been overwritten with another reference is read
    /// through, up to `MAX_HOPS` slots deep. A dropped target, a target
    /// that is mutably borrowed right now, or a chain longer than that
    /// (a slot holding a reference to itself) reads as `None`.
    pub fn read<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        self.read_within(MAX_HOPS, f)
    }

    fn read_within<R>(&self, hops: usize, f: impl FnOnce(&Value) -> R) -> R {
        match &self.target {
            Target::Slot(weak) => {
                let Some(cell) = weak.upgrade() else {
                    return f(&Value::None);
                };
                let Ok(value) = cell.try_borrow() else {
                    return f(&Value::None);
                };
                match &*value {
                    Value::Reference(next) if hops > 0 => next.read_within(hops - 1, f),
                    Value::Reference(_) => f(&Value::None),
                    value => f(value),
                }
            }
            Target::Dict(weak) => match weak.upgrade() {
                Some(cell) => f(&Value::Dict(Heap::view(cell))),
                None => f(&Value::None),
            },
        }
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && match (&self.target, &other.target) {
                (Target::Slot(a), Target::Slot(b)) => a.ptr_eq(b),
                (Target::Dict(a), Target::Dict(b)) => a.ptr_eq(b),
                _ => false,
            }
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            Target::Slot(_) => "slot",
            Target::Dict(_) => "dict",
        };
        write!(f, "{:?}({target}, alive={})", self.kind, self.is_alive())
    }
}
