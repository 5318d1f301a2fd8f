//!
//! Typed column handles.
//!
//! A `Column<V>` names a field and remembers the Rust type of its values,
//! so predicates and assignments built through it cannot mix up types:
//!
//! ```
//! use dynq::Column;
//!
//! const AGE: Column<i32> = Column::new("age");
//! const USERNAME: Column<String> = Column::new("username");
//!
//! let p = AGE.between(10, 40).and(USERNAME.eq("member1".to_string()));
//! assert_eq!(p.conjuncts().len(), 2);
//! ```
//!

use std::ops::Bound;

use crate::assign::{Assignment, SetExpr};
use crate::order::Order;
use crate::predicate::Predicate;
use crate::value::Value;

pub struct Column<V> {
    name: &'static str,
    ty: std::marker::PhantomData<fn() -> V>,
}

impl<V> Clone for Column<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Column<V> {}

impl<V> std::fmt::Debug for Column<V> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "Column({})", self.name)
    }
}

impl<V> Column<V> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            ty: std::marker::PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_null(&self) -> Predicate {
        Predicate::IsNull(self.name.to_string())
    }

    pub fn asc(&self) -> Order {
        Order::asc(self.name)
    }

    pub fn desc(&self) -> Order {
        Order::desc(self.name)
    }
}

impl<V: Into<Value>> Column<V> {
    pub fn eq(&self, value: V) -> Predicate {
        Predicate::Equals(self.name.to_string(), value.into())
    }

    /// Greater than or equal.
    pub fn goe(&self, value: V) -> Predicate {
        self.range(Bound::Included(value.into()), Bound::Unbounded)
    }

    /// Less than or equal.
    pub fn loe(&self, value: V) -> Predicate {
        self.range(Bound::Unbounded, Bound::Included(value.into()))
    }

    pub fn gt(&self, value: V) -> Predicate {
        self.range(Bound::Excluded(value.into()), Bound::Unbounded)
    }

    pub fn lt(&self, value: V) -> Predicate {
        self.range(Bound::Unbounded, Bound::Excluded(value.into()))
    }

    /// Inclusive on both ends.
    pub fn between(&self, low: V, high: V) -> Predicate {
        self.range(Bound::Included(low.into()), Bound::Included(high.into()))
    }

    pub fn is_in(&self, values: impl IntoIterator<Item = V>) -> Predicate {
        Predicate::In(
            self.name.to_string(),
            values.into_iter().map(Into::into).collect(),
        )
    }

    pub fn set(&self, value: V) -> Assignment {
        Assignment::new(self.name, SetExpr::Value(value.into()))
    }

    fn range(&self, lower: Bound<Value>, upper: Bound<Value>) -> Predicate {
        Predicate::Range(self.name.to_string(), lower, upper)
    }
}

/// Column types that support arithmetic assignments.
pub trait Numeric {}

impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for Option<i32> {}
impl Numeric for Option<i64> {}

impl<V: Numeric> Column<V> {
    /// `SET field = field + n`
    pub fn increment_by(&self, n: i64) -> Assignment {
        Assignment::new(self.name, SetExpr::Add(n))
    }

    /// `SET field = field * n`
    pub fn multiply_by(&self, n: i64) -> Assignment {
        Assignment::new(self.name, SetExpr::Multiply(n))
    }
}
