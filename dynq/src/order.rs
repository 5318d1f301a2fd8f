use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

/// Where null values go in the ordering.
///
/// `Default` follows the usual relational convention: nulls sort as
/// larger than any value, i.e. last ascending and first descending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullOrder {
    Default,
    First,
    Last,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
    pub nulls: NullOrder,
}

impl Order {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
            nulls: NullOrder::Default,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
            nulls: NullOrder::Default,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullOrder::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullOrder::Last;
        self
    }

    /// Compare two records on this key.
    pub fn compare<R: Record + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        let lhs = a.get(&self.field);
        let rhs = b.get(&self.field);

        match (lhs.is_null(), rhs.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => self.null_ordering(),
            (false, true) => self.null_ordering().reverse(),
            (false, false) => {
                let ordering = lhs.total_cmp(&rhs);
                match self.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            }
        }
    }

    /// How a null compares against a non-null value.
    fn null_ordering(&self) -> Ordering {
        match (self.nulls, self.direction) {
            (NullOrder::First, _) => Ordering::Less,
            (NullOrder::Last, _) => Ordering::Greater,
            (NullOrder::Default, Direction::Asc) => Ordering::Greater,
            (NullOrder::Default, Direction::Desc) => Ordering::Less,
        }
    }
}

/// Compare by each key in turn, the first non-equal one deciding.
pub fn compare_all<R: Record + ?Sized>(orders: &[Order], a: &R, b: &R) -> Ordering {
    orders
        .iter()
        .map(|order| order.compare(a, b))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::value::Value;

    fn row(username: Option<&str>, age: i64) -> BTreeMap<String, Value> {
        let mut row = BTreeMap::new();
        row.insert("username".to_string(), Value::from(username));
        row.insert("age".to_string(), Value::Int(age));
        row
    }

    fn sorted(mut rows: Vec<BTreeMap<String, Value>>, orders: &[Order]) -> Vec<Value> {
        rows.sort_by(|a, b| compare_all(orders, a, b));
        rows.iter().map(|r| Record::get(r, "username")).collect()
    }

    #[test]
    fn age_desc_then_username_asc_nulls_last() {
        let rows = vec![
            row(None, 100),
            row(Some("member5"), 100),
            row(Some("member6"), 100),
            row(Some("member1"), 10),
        ];

        let usernames = sorted(
            rows,
            &[Order::desc("age"), Order::asc("username").nulls_last()],
        );

        assert_eq!(
            usernames,
            vec![
                Value::from("member5"),
                Value::from("member6"),
                Value::Null,
                Value::from("member1"),
            ]
        );
    }

    #[test]
    fn mixed_kinds_sort_by_kind_then_value() {
        let rows: Vec<BTreeMap<String, Value>> = (0..300)
            .map(|i| {
                let mut row = BTreeMap::new();
                let key = if i % 3 == 0 {
                    Value::Text(format!("t{:03}", i))
                } else {
                    Value::Int(300 - i)
                };
                row.insert("k".to_string(), key);
                row
            })
            .collect();

        let mut asc = rows.clone();
        asc.sort_by(|a, b| compare_all(&[Order::asc("k")], a, b));
        let keys: Vec<Value> = asc.iter().map(|r| Record::get(r, "k")).collect();

        assert_eq!(keys[0], Value::Int(1));
        assert_eq!(keys[199], Value::Int(299));
        assert_eq!(keys[200], Value::from("t000"));
        assert_eq!(keys[299], Value::from("t297"));

        let mut desc = rows;
        desc.sort_by(|a, b| compare_all(&[Order::desc("k")], a, b));
        assert_eq!(Record::get(&desc[0], "k"), Value::from("t297"));
        assert_eq!(Record::get(&desc[299], "k"), Value::Int(1));
    }

    #[test]
    fn default_null_placement() {
        let rows = vec![row(None, 1), row(Some("a"), 2)];

        assert_eq!(
            sorted(rows.clone(), &[Order::asc("username")]),
            vec![Value::from("a"), Value::Null]
        );
        assert_eq!(
            sorted(rows.clone(), &[Order::desc("username")]),
            vec![Value::Null, Value::from("a")]
        );
        assert_eq!(
            sorted(rows, &[Order::desc("username").nulls_last()]),
            vec![Value::from("a"), Value::Null]
        );
    }
}
