//! Callable values: native functions and bytecode procedures.

use std::fmt;
use std::mem;

use crate::dict::Dict;
use crate::errors::{reserve_str, reserve_vec, ValueError, ValueResult};
use crate::list::List;
use crate::value::{Heap, Reference, Value, ValueType};

/// Host function callable from scripts. Receives the argument list.
pub type NativeFn = fn(&mut List) -> ValueResult<Value>;

/// Parameter name of the implicit receiver slot.
pub const RECEIVER_KEY: &str = "";

/// What a function runs when called.
pub enum Callable {
    /// Host function; `tag` tells the interpreter how to marshal arguments.
    Native { func: NativeFn, tag: u8 },
    /// Interpreted bytecode with its parameter specification (`None` or a
    /// dict of parameter names to default values).
    Procedure { params: Value, code: Vec<u8> },
}

pub struct Function {
    callable: Callable,
    info: Option<String>,
}

fn copy_info(info: Option<&str>) -> ValueResult<Option<String>> {
    match info {
        Some(text) if !text.is_empty() => {
            let mut owned = String::new();
            reserve_str(&mut owned, text.len())?;
            owned.push_str(text);
            Ok(Some(owned))
        }
        _ => Ok(None),
    }
}

impl Function {
    pub fn new_native(func: NativeFn, tag: u8, info: Option<&str>) -> ValueResult<Self> {
        Ok(Function {
            callable: Callable::Native { func, tag },
            info: copy_info(info)?,
        })
    }

    /// Procedure over copies of `params` and `code`.
    ///
    /// `params` must be `None` or a dict; anything else is a type mismatch.
    pub fn new_procedure(params: &Value, code: &[u8], info: Option<&str>) -> ValueResult<Self> {
        let params = params.with_resolved(|spec| match spec {
            Value::None => Ok(Value::None),
            Value::Dict(_) => spec.deep_copy(),
            other => Err(ValueError::TypeMismatch {
                expected: ValueType::Dict,
                found: other.type_of(),
            }),
        })?;
        let mut bytecode = Vec::new();
        reserve_vec(&mut bytecode, code.len())?;
        bytecode.extend_from_slice(code);
        Ok(Function {
            callable: Callable::Procedure {
                params,
                code: bytecode,
            },
            info: copy_info(info)?,
        })
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    /// Human-readable descriptor, if one was given.
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self.callable, Callable::Procedure { .. })
    }

    pub fn native_fn(&self) -> Option<NativeFn> {
        match self.callable {
            Callable::Native { func, .. } => Some(func),
            Callable::Procedure { .. } => None,
        }
    }

    /// Calling-convention tag of a native function.
    pub fn tag(&self) -> Option<u8> {
        match self.callable {
            Callable::Native { tag, .. } => Some(tag),
            Callable::Procedure { .. } => None,
        }
    }

    pub fn bytecode(&self) -> Option<&[u8]> {
        match &self.callable {
            Callable::Procedure { code, .. } => Some(code),
            Callable::Native { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&Value> {
        match &self.callable {
            Callable::Procedure { params, .. } => Some(params),
            Callable::Native { .. } => None,
        }
    }

    pub fn params_mut(&mut self) -> Option<&mut Value> {
        match &mut self.callable {
            Callable::Procedure { params, .. } => Some(params),
            Callable::Native { .. } => None,
        }
    }

    /// Point the receiver parameter at `receiver`.
    ///
    /// Returns `false` for natives and for procedures without a receiver
    /// parameter.
    pub fn bind_receiver(&mut self, receiver: &Heap<Dict>) -> bool {
        let Callable::Procedure {
            params: Value::Dict(params),
            ..
        } = &mut self.callable
        else {
            return false;
        };
        let mut spec = params.borrow_mut();
        let Some(slot) = spec.get_mut(RECEIVER_KEY) else {
            return false;
        };
        *slot = Value::Reference(Reference::bound(receiver));
        true
    }

    /// Natives are re-wrapped; procedures copy their bytecode and parameters.
    pub fn deep_copy(&self) -> ValueResult<Function> {
        let callable = match &self.callable {
            Callable::Native { func, tag } => Callable::Native {
                func: *func,
                tag: *tag,
            },
            Callable::Procedure { params, code } => {
                let mut bytecode = Vec::new();
                reserve_vec(&mut bytecode, code.len())?;
                bytecode.extend_from_slice(code);
                Callable::Procedure {
                    params: params.deep_copy()?,
                    code: bytecode,
                }
            }
        };
        Ok(Function {
            callable,
            info: copy_info(self.info.as_deref())?,
        })
    }

    pub fn byte_size(&self) -> usize {
        let info = self.info.as_ref().map_or(0, |text| text.len() + 1);
        let body = match &self.callable {
            Callable::Native { .. } => 0,
            Callable::Procedure { params, code } => code.len() + params.byte_size(),
        };
        mem::size_of::<Function>() + info + body
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        let same_callable = match (&self.callable, &other.callable) {
            (Callable::Native { func: a, tag: ta }, Callable::Native { func: b, tag: tb }) => {
                *a as usize == *b as usize && ta == tb
            }
            (
                Callable::Procedure {
                    params: pa,
                    code: ca,
                },
                Callable::Procedure {
                    params: pb,
                    code: cb,
                },
            ) => ca == cb && pa == pb,
            _ => false,
        };
        same_callable && self.info == other.info
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.callable {
            Callable::Native { tag, .. } => write!(f, "Native(tag={tag}")?,
            Callable::Procedure { code, .. } => write!(f, "Procedure({} bytes", code.len())?,
        }
        match &self.info {
            Some(info) => write!(f, ", {info:?})"),
            None => write!(f, ")"),
        }
    }
}
