//!
//! Bulk update assignments: `SET field = <expr>`.
//!

use serde::{Deserialize, Serialize};

use crate::value::Value;
use crate::{DynqError, DynqResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetExpr {
    /// Overwrite with a constant.
    Value(Value),
    /// `field = field + n`
    Add(i64),
    /// `field = field * n`
    Multiply(i64),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub field: String,
    pub expr: SetExpr,
}

impl Assignment {
    pub fn new(field: impl Into<String>, expr: SetExpr) -> Self {
        Self {
            field: field.into(),
            expr,
        }
    }
}

impl SetExpr {
    /// Compute the new value of a field from its current one.
    ///
    /// Arithmetic on null stays null.
    pub fn apply(&self, current: Value) -> DynqResult<Value> {
        match (self, current) {
            (SetExpr::Value(value), _) => Ok(value.clone()),
            (SetExpr::Add(_) | SetExpr::Multiply(_), Value::Null) => Ok(Value::Null),
            (SetExpr::Add(n), Value::Int(i)) => i
                .checked_add(*n)
                .map(Value::Int)
                .ok_or_else(|| DynqError::Store(format!("integer overflow: {} + {}", i, n))),
            (SetExpr::Multiply(n), Value::Int(i)) => i
                .checked_mul(*n)
                .map(Value::Int)
                .ok_or_else(|| DynqError::Store(format!("integer overflow: {} * {}", i, n))),
            (_, other) => Err(DynqError::InvalidSpec(format!(
                "arithmetic on {} value",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(SetExpr::Add(1).apply(Value::Int(10)).unwrap(), Value::Int(11));
        assert_eq!(
            SetExpr::Multiply(2).apply(Value::Int(20)).unwrap(),
            Value::Int(40)
        );
        assert_eq!(SetExpr::Add(1).apply(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn overwrite_ignores_current() {
        let expr = SetExpr::Value(Value::from("guest"));
        assert_eq!(expr.apply(Value::Int(1)).unwrap(), Value::from("guest"));
    }

    #[test]
    fn arithmetic_on_text_is_rejected() {
        assert!(matches!(
            SetExpr::Add(1).apply(Value::from("member1")),
            Err(DynqError::InvalidSpec(_))
        ));
        assert!(matches!(
            SetExpr::Multiply(2).apply(Value::Int(i64::MAX)),
            Err(DynqError::Store(_))
        ));
    }
}
