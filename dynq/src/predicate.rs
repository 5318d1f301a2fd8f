//!
//! The predicate algebra.
//!
//! A [Predicate] is an immutable boolean expression tree over named fields.
//! `True` is the identity of conjunction: it never shows up as an operand of
//! `And`, so a tree built from N present conditions has exactly N conjuncts.
//!

use std::cmp::Ordering;
use std::ops::Bound;

use crate::record::Record;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every row. Equivalent to having no WHERE clause.
    True,
    Equals(String, Value),
    Range(String, Bound<Value>, Bound<Value>),
    In(String, Vec<Value>),
    IsNull(String),
    /// Conjunction. [Predicate::and] never nests `And` or keeps `True`
    /// operands; an empty list matches every row.
    And(Vec<Predicate>),
    /// Disjunction. An empty list matches no row.
    Or(Vec<Predicate>),
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::True
    }
}

impl Predicate {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Equals(field.into(), value.into())
    }

    pub fn range(field: impl Into<String>, lower: Bound<Value>, upper: Bound<Value>) -> Self {
        Predicate::Range(field.into(), lower, upper)
    }

    /// Fold any number of predicates into one conjunction.
    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        predicates
            .into_iter()
            .fold(Predicate::True, |acc, predicate| acc.and(predicate))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Predicate::True)
    }

    /// Logical conjunction.
    ///
    /// `True` on either side yields the other side unchanged, and nested
    /// conjunctions are flattened: `a.and(b.and(c))` is `And([a, b, c])`.
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::True, p) | (p, Predicate::True) => p,
            (lhs, rhs) => {
                let mut operands = lhs.into_conjuncts();
                operands.extend(rhs.into_conjuncts());
                Predicate::And(operands)
            }
        }
    }

    /// Logical disjunction. `True` on either side absorbs the other.
    pub fn or(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::True, _) | (_, Predicate::True) => Predicate::True,
            (lhs, rhs) => {
                let mut operands = lhs.into_disjuncts();
                operands.extend(rhs.into_disjuncts());
                Predicate::Or(operands)
            }
        }
    }

    /// Top-level operands of the conjunction this predicate represents.
    pub fn conjuncts(&self) -> &[Predicate] {
        match self {
            Predicate::True => &[],
            Predicate::And(operands) => operands,
            other => std::slice::from_ref(other),
        }
    }

    fn into_conjuncts(self) -> Vec<Predicate> {
        match self {
            Predicate::True => vec![],
            Predicate::And(operands) => operands,
            other => vec![other],
        }
    }

    fn into_disjuncts(self) -> Vec<Predicate> {
        match self {
            Predicate::Or(operands) => operands,
            other => vec![other],
        }
    }

    /// Evaluate against a single record.
    ///
    /// Null never compares equal to, or within range of, anything.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Equals(field, value) => {
                record.get(field).sql_cmp(value) == Some(Ordering::Equal)
            }
            Predicate::Range(field, lower, upper) => {
                let actual = record.get(field);
                above(&actual, lower) && below(&actual, upper)
            }
            Predicate::In(field, values) => {
                let actual = record.get(field);
                values
                    .iter()
                    .any(|value| actual.sql_cmp(value) == Some(Ordering::Equal))
            }
            Predicate::IsNull(field) => record.get(field).is_null(),
            Predicate::And(operands) => operands.iter().all(|p| p.matches(record)),
            Predicate::Or(operands) => operands.iter().any(|p| p.matches(record)),
        }
    }
}

fn above(actual: &Value, lower: &Bound<Value>) -> bool {
    match lower {
        Bound::Unbounded => true,
        Bound::Included(bound) => matches!(
            actual.sql_cmp(bound),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Bound::Excluded(bound) => actual.sql_cmp(bound) == Some(Ordering::Greater),
    }
}

fn below(actual: &Value, upper: &Bound<Value>) -> bool {
    match upper {
        Bound::Unbounded => true,
        Bound::Included(bound) => matches!(
            actual.sql_cmp(bound),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Bound::Excluded(bound) => actual.sql_cmp(bound) == Some(Ordering::Less),
    }
}
