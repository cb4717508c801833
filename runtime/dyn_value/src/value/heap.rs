//! Single-owner heap cells.
//!
//! A `Heap<T>` owns its contents exactly like a `Box<T>`, but it can hand out
//! non-owning observers. References (`Reference`) hold only those
//! observers, so "does this payload own memory" is answered by the type:
//! `Heap` owns, `Weak` never does.
//!
//! `Heap` is deliberately not `Clone`. The only extra strong handles ever
//! created are short-lived views inside a reference read, which are
//! dropped before the read returns.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

/// Owning, observable heap cell.
pub struct Heap<T>(Rc<RefCell<T>>);

impl<T> Heap<T> {
    /// Move `value` onto the heap.
    pub fn new(value: T) -> Self {
        Heap(Rc::new(RefCell::new(value)))
    }

    /// Shared access to the contents.
    ///
    /// Panics if the contents are currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Shared access, or `None` while the contents are mutably borrowed.
    #[inline]
    pub fn try_borrow(&self) -> Option<Ref<'_, T>> {
        self.0.try_borrow().ok()
    }

    /// Exclusive access to the contents.
    ///
    /// Panics if the contents are currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Heap<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Whether `observer` was taken from this cell.
    #[inline]
    pub(crate) fn is_observed_by(&self, observer: &Weak<RefCell<T>>) -> bool {
        std::ptr::eq(Rc::as_ptr(&self.0), observer.as_ptr())
    }

    /// Non-owning handle to this cell.
    pub(crate) fn observe(&self) -> Weak<RefCell<T>> {
        Rc::downgrade(&self.0)
    }

    /// Temporary strong view over an observed cell.
    pub(crate) fn view(cell: Rc<RefCell<T>>) -> Self {
        Heap(cell)
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_borrow() {
            Some(inner) => inner.fmt(f),
            None => f.write_str("<borrowed>"),
        }
    }
}
