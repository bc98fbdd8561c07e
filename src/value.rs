//! The tagged value representation flowing through the eval stack, the
//! constant pool, and the globals table.

use std::fmt;
use std::rc::Rc;

use crate::object::{same_object, Object};

#[derive(Debug, Clone)]
pub enum Value {
    /// A value that should never be observed; present only so the enum has a
    /// variant to fall back to if a slot is read before it is written.
    Error,
    Bool(bool),
    Null,
    Number(f64),
    Object(Rc<Object>),
}

impl Value {
    /// `Null`, or `Bool(false)`. Everything else, including `0`, `""` and the
    /// empty list, is truthy.
    pub fn is_falsey(&self) -> bool {
        matches!(self, Value::Null | Value::Bool(false))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<Object>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.as_object().is_some_and(|o| o.is_string())
    }

    pub fn is_list(&self) -> bool {
        self.as_object().is_some_and(|o| o.is_list())
    }

    /// Cross-kind equality: different kinds are never equal, `Null == Null`
    /// is always true, `Bool`/`Number` compare by value, and objects compare
    /// by handle identity (sound for strings because they are interned).
    pub fn values_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => same_object(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Error => write!(f, "Object is uninitialized"),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Object(obj) => match obj.as_ref() {
                Object::Str { bytes, .. } => write!(f, "{bytes}"),
                Object::List { values } => {
                    write!(f, "[")?;
                    for (i, v) in values.borrow().iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{v}")?;
                    }
                    write!(f, "]")
                }
            },
        }
    }
}

/// Shortest round-trippable decimal, the Rust equivalent of C's `%g`:
/// integral doubles print without a trailing `.0`.
fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsey_law() {
        assert!(Value::Null.is_falsey());
        assert!(Value::Bool(false).is_falsey());
        assert!(!Value::Bool(true).is_falsey());
        assert!(!Value::Number(0.0).is_falsey());
        assert!(!Value::Object(Rc::new(Object::new_string(String::new()))).is_falsey());
    }

    #[test]
    fn number_formats_without_trailing_zero() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn object_equality_is_handle_identity() {
        let a = Rc::new(Object::new_string("hi".to_string()));
        let b = Rc::new(Object::new_string("hi".to_string()));
        assert!(!Value::Object(a.clone()).values_equal(&Value::Object(b)));
        assert!(Value::Object(a.clone()).values_equal(&Value::Object(a)));
    }
}
