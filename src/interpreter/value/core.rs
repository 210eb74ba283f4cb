use std::{cell::RefCell, collections::HashSet, rc::Rc};

use crate::{
    error::RuntimeError, interpreter::evaluator::core::EvalResult, util::num::i64_to_f64_checked,
};

/// A list shared between every handle that refers to it.
///
/// `push` and `pop` mutate the list in place, so the change is visible
/// through the variable it is bound to.
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// Represents a runtime value in the interpreter.
///
/// Variables, builtin results and list elements are all `Value`s. Every
/// builtin matches exhaustively on the variants it accepts and reports a
/// `TypeError` for the rest.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision float.
    Float(f64),
    /// A string.
    Str(String),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// An ordered, mutable, indexable sequence with reference semantics.
    List(ListRef),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(v)))
    }
}

impl PartialEq for Value {
    /// Structural equality. Integers and floats compare numerically; lists
    /// compare element by element.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Integer(i), Self::Float(r)) | (Self::Float(r), Self::Integer(i)) => {
                i64_to_f64_checked(*i, ()).is_ok_and(|i| i == *r)
            },
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}

impl Value {
    /// Builds a fresh list value.
    #[must_use]
    pub fn list(items: Vec<Self>) -> Self {
        items.into()
    }

    /// The type name used in error messages and by `cast`.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Str(_) => "String",
            Self::Bool(_) => "Boolean",
            Self::List(_) => "List",
        }
    }

    /// Converts the value to `i64`, or returns an error if not an integer.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(i64)`: The integer value.
    /// - `Err(RuntimeError::TypeError)`: If not an integer.
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::type_error(format!("expected Integer, found {}",
                                                      self.type_name()),
                                              line)),
        }
    }

    /// Converts an integer or float to `f64`.
    ///
    /// # Errors
    /// `TypeError` for non-numeric values, `Overflow` for integers that
    /// cannot be represented exactly.
    pub fn as_float(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Float(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::Overflow { line }),
            _ => Err(RuntimeError::type_error(format!("expected a number, found {}",
                                                      self.type_name()),
                                              line)),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for the conditions of `if`, `while` and `assert`.
    ///
    /// # Example
    /// ```
    /// use dicelang::interpreter::value::core::Value;
    ///
    /// assert!(Value::Bool(true).as_bool(1).unwrap());
    /// assert!(Value::Integer(1).as_bool(1).is_err());
    /// ```
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::type_error(format!("expected Boolean, found {}",
                                                      self.type_name()),
                                              line)),
        }
    }

    /// Borrows the value as a string slice, or returns an error if it is not
    /// a string.
    pub fn as_str(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(RuntimeError::type_error(format!("expected String, found {}",
                                                      self.type_name()),
                                              line)),
        }
    }

    /// Returns a new handle to the underlying list, or an error if the value
    /// is not a list.
    pub fn as_list(&self, line: usize) -> EvalResult<ListRef> {
        match self {
            Self::List(items) => Ok(Rc::clone(items)),
            _ => Err(RuntimeError::type_error(format!("expected List, found {}",
                                                      self.type_name()),
                                              line)),
        }
    }

    /// Returns `true` if this value is `list` itself or holds it at any
    /// depth.
    ///
    /// # Example
    /// ```
    /// use dicelang::interpreter::value::core::Value;
    ///
    /// let inner = Value::list(vec![Value::Integer(1)]);
    /// let outer = Value::list(vec![inner.clone()]);
    /// let handle = inner.as_list(1).unwrap();
    ///
    /// assert!(outer.refers_to(&handle));
    /// assert!(!Value::list(vec![Value::Integer(1)]).refers_to(&handle));
    /// ```
    #[must_use]
    pub fn refers_to(&self, list: &ListRef) -> bool {
        let Self::List(items) = self else { return false };

        let mut pending = vec![Rc::clone(items)];
        let mut seen = HashSet::new();

        while let Some(current) = pending.pop() {
            if Rc::ptr_eq(&current, list) {
                return true;
            }
            if !seen.insert(Rc::as_ptr(&current)) {
                continue;
            }

            for value in current.borrow().iter() {
                if let Self::List(inner) = value {
                    pending.push(Rc::clone(inner));
                }
            }
        }

        false
    }

    /// Truthiness as used by the `Boolean` cast: zero, empty strings and
    /// empty lists are false, everything else is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Float(r) => *r != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::List(items) => !items.borrow().is_empty(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(r) => write!(f, "{r:?}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => {
                write!(f, "[")?;

                for (index, value) in items.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
        }
    }
}
