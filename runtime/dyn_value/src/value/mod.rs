//! The tagged dynamic value.
//!
//! # Ownership
//!
//! Every owning variant holds an owning handle (`String`, `Box`, [`Heap`]),
//! so dropping a `Value` releases exactly what it owns and nothing else.
//! `External` and `Reference` payloads are observers and are never freed by
//! the value that holds them.
//!
//! `Value` is intentionally not `Clone`. Duplication is the explicit and
//! fallible [`Value::deep_copy`]; ownership transfer is [`Value::move_from`]
//! (or plain `std::mem::take`).
//!
//! # Constructors
//!
//! ```text
//! let n = Value::int(42);
//! let s = Value::string("hello");
//! let l = Value::list(vec![Value::int(1), Value::int(2)])?;
//!
//! let mut slot = Value::None;
//! slot.set_string("reused")?;   // drops whatever the slot held first
//! ```

mod convert;
mod heap;
mod reference;

use std::cell::{Ref, RefMut};
use std::fmt;
use std::mem;

pub use heap::Heap;
pub use reference::{RefKind, Reference};

use crate::dict::Dict;
use crate::errors::{reserve_str, ValueError, ValueResult};
use crate::function::{Function, NativeFn};
use crate::list::List;
use crate::set::Set;
use crate::stack::ensure_sufficient_stack;

/// Interpreter variable cell that references can observe.
pub type Slot = Heap<Value>;

/// Discriminant of a [`Value`].
///
/// The declaration order is the type ordering used by the operator engine:
/// the result type of a binary operation is the larger of the two operand
/// types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    None,
    Bool,
    Int,
    Float,
    Str,
    List,
    Set,
    Dict,
    Function,
    External,
    Reference,
    Misc,
}

impl ValueType {
    /// Name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::None => "none",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Str => "str",
            ValueType::List => "list",
            ValueType::Set => "set",
            ValueType::Dict => "dict",
            ValueType::Function => "function",
            ValueType::External => "external",
            ValueType::Reference => "reference",
            ValueType::Misc => "misc",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque host pointer. Stored and compared, never dereferenced or freed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct External(*const ());

impl External {
    pub fn new<T>(ptr: *const T) -> Self {
        External(ptr.cast())
    }

    #[inline]
    pub fn addr(self) -> *const () {
        self.0
    }
}

/// Kleene three-valued truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trilean {
    False,
    True,
    Unknown,
}

impl From<bool> for Trilean {
    fn from(b: bool) -> Self {
        if b {
            Trilean::True
        } else {
            Trilean::False
        }
    }
}

/// Runtime value of the scripting language.
#[derive(Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i32),
    Float(f32),
    Str(String),
    List(Box<List>),
    Set(Box<Set>),
    Dict(Heap<Dict>),
    Function(Box<Function>),
    External(External),
    Reference(Reference),
    /// Untyped marker, free for the interpreter to use.
    Misc,
}

// Factory Methods

impl Value {
    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    #[inline]
    pub fn int(n: i32) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f32) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// List owning `items`.
    pub fn list(items: Vec<Value>) -> ValueResult<Self> {
        Ok(Value::List(Box::new(List::from_values(items)?)))
    }

    /// Set built by inserting `items` in order; later duplicates are dropped.
    pub fn set(items: Vec<Value>) -> ValueResult<Self> {
        let mut set = Set::with_space(items.len())?;
        for item in items {
            set.insert_owned(item)?;
        }
        Ok(Value::Set(Box::new(set)))
    }

    /// Dict built by inserting `entries` in order.
    ///
    /// Receiver slots of procedures among the values are bound to the new
    /// dict.
    pub fn dict<K: AsRef<str>>(entries: Vec<(K, Value)>) -> ValueResult<Self> {
        let mut dict = Dict::with_space(entries.len())?;
        for (key, value) in entries {
            dict.insert_owned(key.as_ref(), value)?;
        }
        let heap = Heap::new(dict);
        Dict::set_location(&heap);
        Ok(Value::Dict(heap))
    }

    #[inline]
    pub fn external<T>(ptr: *const T) -> Self {
        Value::External(External::new(ptr))
    }

    /// Alias the value held by `slot`.
    pub fn reference_to(slot: &Slot) -> Self {
        Value::Reference(Reference::of_slot(slot))
    }

    pub fn function(function: Function) -> Self {
        Value::Function(Box::new(function))
    }
}

// Slot Constructors
//
// Each drops the current payload before building the new one, so reusing a
// live slot never leaks and a failed construction leaves `None`.

impl Value {
    pub fn set_none(&mut self) {
        *self = Value::None;
    }

    pub fn set_bool(&mut self, b: bool) {
        *self = Value::Bool(b);
    }

    pub fn set_int(&mut self, n: i32) {
        *self = Value::Int(n);
    }

    pub fn set_float(&mut self, f: f32) {
        *self = Value::Float(f);
    }

    pub fn set_external(&mut self, external: External) {
        *self = Value::External(external);
    }

    /// Store an owned copy of `text`.
    pub fn set_string(&mut self, text: &str) -> ValueResult<()> {
        *self = Value::None;
        let mut owned = String::new();
        reserve_str(&mut owned, text.len())?;
        owned.push_str(text);
        *self = Value::Str(owned);
        Ok(())
    }

    pub fn set_reference(&mut self, slot: &Slot) {
        *self = Value::reference_to(slot);
    }

    /// Empty list with room for `space` elements.
    pub fn set_list(&mut self, space: usize) -> ValueResult<()> {
        *self = Value::None;
        *self = Value::List(Box::new(List::with_space(space)?));
        Ok(())
    }

    /// Empty set with room for `space` elements.
    pub fn set_set(&mut self, space: usize) -> ValueResult<()> {
        *self = Value::None;
        *self = Value::Set(Box::new(Set::with_space(space)?));
        Ok(())
    }

    /// Empty dict with room for `space` entries.
    pub fn set_dict(&mut self, space: usize) -> ValueResult<()> {
        *self = Value::None;
        *self = Value::Dict(Heap::new(Dict::with_space(space)?));
        Ok(())
    }

    pub fn set_function(&mut self, function: Function) {
        *self = Value::function(function);
    }

    pub fn set_native(&mut self, func: NativeFn, tag: u8, info: Option<&str>) -> ValueResult<()> {
        *self = Value::None;
        *self = Value::function(Function::new_native(func, tag, info)?);
        Ok(())
    }

    /// Procedure over a copy of `code`, with a copy of `params` (None or a
    /// dict) as its parameter specification.
    pub fn set_procedure(
        &mut self,
        params: &Value,
        code: &[u8],
        info: Option<&str>,
    ) -> ValueResult<()> {
        *self = Value::None;
        *self = Value::function(Function::new_procedure(params, code, info)?);
        Ok(())
    }
}

// Copy and Move

impl Value {
    /// Deep copy with entirely new owned storage.
    ///
    /// A plain reference copies its target, so the result is never an alias.
    /// A bound receiver reference stays bound (copying the receiver would
    /// recurse into the procedure holding it); copying the enclosing dict
    /// rebinds it to the copy.
    pub fn deep_copy(&self) -> ValueResult<Value> {
        ensure_sufficient_stack(|| match self {
            Value::None => Ok(Value::None),
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::Int(n) => Ok(Value::Int(*n)),
            Value::Float(f) => Ok(Value::Float(*f)),
            Value::Str(s) => {
                let mut copy = String::new();
                reserve_str(&mut copy, s.len())?;
                copy.push_str(s);
                Ok(Value::Str(copy))
            }
            Value::List(list) => Ok(Value::List(Box::new(list.deep_copy()?))),
            Value::Set(set) => Ok(Value::Set(Box::new(set.deep_copy()?))),
            Value::Dict(dict) => {
                let copy = Heap::new(dict.borrow().deep_copy()?);
                Dict::set_location(&copy);
                Ok(Value::Dict(copy))
            }
            Value::Function(function) => Ok(Value::function(function.deep_copy()?)),
            Value::External(external) => Ok(Value::External(*external)),
            Value::Reference(reference) => match reference.kind() {
                RefKind::Alias => reference.read(Value::deep_copy),
                RefKind::Bound => Ok(Value::Reference(reference.clone())),
            },
            Value::Misc => Ok(Value::Misc),
        })
    }

    /// Replace `self` with a deep copy of `src`. On failure `self` is `None`.
    pub fn copy_from(&mut self, src: &Value) -> ValueResult<()> {
        *self = Value::None;
        *self = src.deep_copy()?;
        Ok(())
    }

    /// Move `src` into `self`, leaving `src` as `None`.
    ///
    /// Moving a reference moves a deep copy of its target instead, so a move
    /// never hands out an alias. On failure both sides are `None`.
    pub fn move_from(&mut self, src: &mut Value) -> ValueResult<()> {
        *self = Value::None;
        let moved = mem::take(src);
        *self = match moved {
            Value::Reference(reference) => reference.read(Value::deep_copy)?,
            owned => owned,
        };
        Ok(())
    }
}

// Inspection

impl Value {
    pub fn type_of(&self) -> ValueType {
        match self {
            Value::None => ValueType::None,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
            Value::Set(_) => ValueType::Set,
            Value::Dict(_) => ValueType::Dict,
            Value::Function(_) => ValueType::Function,
            Value::External(_) => ValueType::External,
            Value::Reference(_) => ValueType::Reference,
            Value::Misc => ValueType::Misc,
        }
    }

    /// Type of the value after following a reference.
    pub fn resolved_type(&self) -> ValueType {
        self.with_resolved(Value::type_of)
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[inline]
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_))
    }

    /// Run `f` on the value itself, or on the target of a reference.
    pub fn with_resolved<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        match self {
            Value::Reference(reference) => reference.read(f),
            value => f(value),
        }
    }

    /// Byte length of a string, element count of a container, else 0.
    pub fn length(&self) -> usize {
        self.with_resolved(|value| match value {
            Value::Str(s) => s.len(),
            Value::List(list) => list.len(),
            Value::Set(set) => set.len(),
            Value::Dict(dict) => dict.borrow().len(),
            _ => 0,
        })
    }

    /// Bytes allocated for this value and everything it owns.
    ///
    /// Strings count a terminator byte; lists count every reserved slot.
    pub fn byte_size(&self) -> usize {
        ensure_sufficient_stack(|| {
            let base = mem::size_of::<Value>();
            match self {
                Value::Str(s) => base + s.len() + 1,
                Value::List(list) => base + list.byte_size(),
                Value::Set(set) => base + set.byte_size(),
                Value::Dict(dict) => base + dict.borrow().byte_size(),
                Value::Function(function) => base + function.byte_size(),
                _ => base,
            }
        })
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Set> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_set_mut(&mut self) -> Option<&mut Set> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<Ref<'_, Dict>> {
        match self {
            Value::Dict(dict) => Some(dict.borrow()),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<RefMut<'_, Dict>> {
        match self {
            Value::Dict(dict) => Some(dict.borrow_mut()),
            _ => None,
        }
    }

    /// The dict cell itself, for binding receivers or taking references.
    pub fn dict_heap(&self) -> Option<&Heap<Dict>> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn get_external(&self) -> Option<External> {
        match self {
            Value::External(external) => Some(*external),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Fail unless the value (after resolution) has type `expected`.
    pub fn expect_type(&self, expected: ValueType) -> ValueResult<()> {
        let found = self.resolved_type();
        if found == expected {
            Ok(())
        } else {
            Err(ValueError::TypeMismatch { expected, found })
        }
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(list) => write!(f, "List({list:?})"),
            Value::Set(set) => write!(f, "Set({set:?})"),
            Value::Dict(dict) => write!(f, "Dict({dict:?})"),
            Value::Function(function) => write!(f, "Function({function:?})"),
            Value::External(external) => write!(f, "External({:p})", external.addr()),
            Value::Reference(reference) => write!(f, "Reference({reference:?})"),
            Value::Misc => write!(f, "Misc"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

/// Structural equality: same variant, equal payloads.
///
/// This is stricter than the language's `==` (see
/// [`compare`](crate::compare::compare)), which coerces across numeric
/// types and treats floats by value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) | (Value::Misc, Value::Misc) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::External(a), Value::External(b)) => a == b,
            (Value::Reference(a), Value::Reference(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
