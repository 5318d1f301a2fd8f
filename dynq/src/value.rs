//!
//! Scalar values bound into predicates and assignments.
//!

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{DynqError, DynqResult};

/// A dynamically typed scalar, the unit of comparison in a predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
        }
    }

    /// Compare two values the way a relational engine would.
    ///
    /// Returns `None` when either side is null or the kinds differ,
    /// in which case no predicate over the pair can match.
    pub fn sql_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// A total order over all values, for sorting.
    ///
    /// Kinds rank `Null < Bool < Int < Text`; values of one kind compare
    /// as in [Value::sql_cmp].
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        self.sql_cmp(other)
            .unwrap_or_else(|| self.rank().cmp(&other.rank()))
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) => 2,
            Value::Text(_) => 3,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

/// Conversion back from a [Value], used when writing assignments into records.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> DynqResult<Self>;
}

fn mismatch(expected: &str, value: &Value) -> DynqError {
    DynqError::InvalidSpec(format!(
        "expected {} value, found {}",
        expected,
        value.kind()
    ))
}

impl FromValue for Value {
    fn from_value(value: Value) -> DynqResult<Self> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> DynqResult<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> DynqResult<Self> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> DynqResult<Self> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide)
            .map_err(|_| DynqError::InvalidSpec(format!("{} does not fit in i32", wide)))
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> DynqResult<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> DynqResult<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_incomparable() {
        assert_eq!(Value::Null.sql_cmp(&Value::Null), None);
        assert_eq!(Value::Int(1).sql_cmp(&Value::Null), None);
        assert_eq!(Value::Int(1).sql_cmp(&Value::from("1")), None);
        assert_eq!(
            Value::Int(1).sql_cmp(&Value::Int(2)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("teamB")), Value::Text("teamB".into()));
    }

    #[test]
    fn total_cmp_ranks_kinds() {
        assert_eq!(Value::Int(1).total_cmp(&Value::Int(0)), Ordering::Greater);
        assert_eq!(Value::Int(1).total_cmp(&Value::from("a")), Ordering::Less);
        assert_eq!(Value::from("a").total_cmp(&Value::Int(0)), Ordering::Greater);
        assert_eq!(Value::Bool(true).total_cmp(&Value::Int(-5)), Ordering::Less);
        assert_eq!(Value::Null.total_cmp(&Value::Null), Ordering::Equal);
        assert_eq!(Value::Null.total_cmp(&Value::Bool(false)), Ordering::Less);
    }

    #[test]
    fn from_value_checks_kind() {
        assert_eq!(i32::from_value(Value::Int(40)).unwrap(), 40);
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
        assert!(matches!(
            String::from_value(Value::Int(3)),
            Err(DynqError::InvalidSpec(_))
        ));
        assert!(i32::from_value(Value::Int(i64::MAX)).is_err());
    }
}
