//! Dynamic values for the dyn scripting runtime.
//!
//! This crate provides:
//! - The tagged [`Value`] with explicit copy, move and reference semantics
//! - Containers: [`List`], [`Set`] and [`Dict`]
//! - Callables: native functions and bytecode procedures ([`Function`])
//! - The comparison protocol ([`compare`]) and container [`search`]
//! - Text helpers used for rendering ([`strings`])
//!
//! # Ownership Model
//!
//! Exactly one value owns any heap allocation. References observe through
//! `Weak` handles and never keep their target alive. Deep copies allocate
//! fresh storage for everything they reach, except receiver bindings, which
//! are rebound to the copy of the enclosing dict.
//!
//! Everything here is single-threaded: `Value` is neither `Send` nor `Sync`.

mod compare;
mod dict;
mod errors;
mod function;
pub mod limits;
mod list;
mod set;
mod stack;
pub mod strings;
mod value;

pub use compare::{compare, equals, is_container, position, search, Comparison};
pub use dict::Dict;
pub use errors::{ValueError, ValueResult};
pub use function::{Callable, Function, NativeFn, RECEIVER_KEY};
pub use list::List;
pub use set::Set;
pub use stack::ensure_sufficient_stack;
pub use value::{External, Heap, RefKind, Reference, Slot, Trilean, Value, ValueType};
