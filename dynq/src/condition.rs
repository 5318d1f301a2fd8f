//!
//! Turning optional search criteria into a single predicate.
//!
//! Absent criteria are dropped before anything is combined, so the
//! result is `True` when nothing is set and a bare leaf when exactly
//! one criterion is set.
//!

use std::ops::Bound;

use crate::predicate::Predicate;
use crate::value::Value;

/// Something that describes a filter, usually a struct of optional
/// criteria deriving `Condition`:
///
/// ```
/// use dynq::{Condition, Predicate};
///
/// #[derive(Default, Condition)]
/// struct MemberSearchCondition {
///     #[condition(eq = "username")]
///     username: Option<String>,
///     #[condition(goe = "age")]
///     age_goe: Option<i32>,
///     #[condition(loe = "age")]
///     age_loe: Option<i32>,
/// }
///
/// let cond = MemberSearchCondition::default();
/// assert_eq!(cond.to_predicate(), Predicate::True);
/// ```
pub trait Condition {
    fn to_predicate(&self) -> Predicate;
}

impl Condition for Predicate {
    fn to_predicate(&self) -> Predicate {
        self.clone()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConditionBuilder {
    predicate: Predicate,
}

impl ConditionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        self.with(value.map(|value| Predicate::Equals(field.to_string(), value.into())))
    }

    /// `field >= value`
    pub fn goe<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        self.range(field, value, |v| (Bound::Included(v), Bound::Unbounded))
    }

    /// `field <= value`
    pub fn loe<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        self.range(field, value, |v| (Bound::Unbounded, Bound::Included(v)))
    }

    pub fn gt<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        self.range(field, value, |v| (Bound::Excluded(v), Bound::Unbounded))
    }

    pub fn lt<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        self.range(field, value, |v| (Bound::Unbounded, Bound::Excluded(v)))
    }

    /// Add an arbitrary predicate, if present.
    pub fn with(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(predicate) => Self {
                predicate: self.predicate.and(predicate),
            },
            None => self,
        }
    }

    pub fn build(self) -> Predicate {
        self.predicate
    }

    fn range<V, F>(self, field: &str, value: Option<V>, bounds: F) -> Self
    where
        V: Into<Value>,
        F: FnOnce(Value) -> (Bound<Value>, Bound<Value>),
    {
        self.with(value.map(|value| {
            let (lower, upper) = bounds(value.into());
            Predicate::Range(field.to_string(), lower, upper)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(
        username: Option<&str>,
        team_name: Option<&str>,
        age_goe: Option<i32>,
        age_loe: Option<i32>,
    ) -> Predicate {
        ConditionBuilder::new()
            .eq("username", username)
            .eq("team.name", team_name)
            .goe("age", age_goe)
            .loe("age", age_loe)
            .build()
    }

    #[test]
    fn nothing_set_is_true() {
        assert_eq!(search(None, None, None, None), Predicate::True);
    }

    #[test]
    fn single_criterion_is_a_bare_leaf() {
        assert_eq!(
            search(None, None, Some(20), None),
            Predicate::Range("age".into(), Bound::Included(Value::Int(20)), Bound::Unbounded)
        );
    }

    #[test]
    fn arity_equals_present_criteria() {
        let usernames = [None, Some("member1")];
        let teams = [None, Some("teamB")];
        let goes = [None, Some(35)];
        let loes = [None, Some(40)];

        for username in usernames {
            for team in teams {
                for goe in goes {
                    for loe in loes {
                        let present = [username.is_some(), team.is_some(), goe.is_some(), loe.is_some()]
                            .iter()
                            .filter(|set| **set)
                            .count();
                        let predicate = search(username, team, goe, loe);

                        assert_eq!(predicate.conjuncts().len(), present);
                        assert!(predicate.conjuncts().iter().all(|p| !p.is_true()));
                        if present > 1 {
                            assert!(matches!(predicate, Predicate::And(_)));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn with_skips_none() {
        let p = ConditionBuilder::new()
            .with(None)
            .with(Some(Predicate::IsNull("username".into())))
            .build();
        assert_eq!(p, Predicate::IsNull("username".into()));
    }
}
