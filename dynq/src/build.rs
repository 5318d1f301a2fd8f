//!
//! Rendering predicates, orderings and statements into SQL.
//!
//! `source` and `table` arguments are trusted, developer-supplied SQL
//! fragments (a table name, or a table plus joins). Field names inside
//! predicates, orders and assignments are validated identifiers and all
//! values go through placeholders.
//!

use std::ops::Bound;

use crate::assign::{Assignment, SetExpr};
use crate::builder::QueryBuilder;
use crate::database::Database;
use crate::order::{Direction, NullOrder, Order};
use crate::predicate::Predicate;
use crate::query::Window;
use crate::value::Value;
use crate::DynqResult;

pub trait Build<DB: Database> {
    fn build(&self, builder: &mut QueryBuilder<DB>) -> DynqResult<()>;
}

impl<DB: Database> Build<DB> for Predicate {
    fn build(&self, builder: &mut QueryBuilder<DB>) -> DynqResult<()> {
        match self {
            Predicate::True => builder.push("TRUE"),
            Predicate::Equals(field, value) => {
                builder.push_ident(field)?;
                builder.push(" = ");
                builder.push_bind(value.clone());
            }
            Predicate::Range(field, lower, upper) => match (lower, upper) {
                (Bound::Unbounded, Bound::Unbounded) => builder.push("TRUE"),
                (lower, Bound::Unbounded) => build_lower(builder, field, lower)?,
                (Bound::Unbounded, upper) => build_upper(builder, field, upper)?,
                (lower, upper) => {
                    builder.push("(");
                    build_lower(builder, field, lower)?;
                    builder.push(" AND ");
                    build_upper(builder, field, upper)?;
                    builder.push(")");
                }
            },
            Predicate::In(_, values) if values.is_empty() => builder.push("FALSE"),
            Predicate::In(field, values) => {
                builder.push_ident(field)?;
                builder.push(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        builder.push(", ");
                    }
                    builder.push_bind(value.clone());
                }
                builder.push(")");
            }
            Predicate::IsNull(field) => {
                builder.push_ident(field)?;
                builder.push(" IS NULL");
            }
            Predicate::And(operands) => build_joined(builder, operands, " AND ", "TRUE")?,
            Predicate::Or(operands) => build_joined(builder, operands, " OR ", "FALSE")?,
        }
        Ok(())
    }
}

fn build_lower<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    field: &str,
    bound: &Bound<Value>,
) -> DynqResult<()> {
    build_comparison(builder, field, bound, " >= ", " > ")
}

fn build_upper<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    field: &str,
    bound: &Bound<Value>,
) -> DynqResult<()> {
    build_comparison(builder, field, bound, " <= ", " < ")
}

fn build_comparison<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    field: &str,
    bound: &Bound<Value>,
    inclusive: &str,
    exclusive: &str,
) -> DynqResult<()> {
    let (op, value) = match bound {
        Bound::Included(value) => (inclusive, value),
        Bound::Excluded(value) => (exclusive, value),
        Bound::Unbounded => {
            builder.push("TRUE");
            return Ok(());
        }
    };
    builder.push_ident(field)?;
    builder.push(op);
    builder.push_bind(value.clone());
    Ok(())
}

fn build_joined<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    operands: &[Predicate],
    separator: &str,
    empty: &str,
) -> DynqResult<()> {
    match operands {
        [] => {
            builder.push(empty);
            return Ok(());
        }
        [single] => return single.build(builder),
        _ => {}
    }

    builder.push("(");
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        operand.build(builder)?;
    }
    builder.push(")");
    Ok(())
}

impl<DB: Database> Build<DB> for Order {
    fn build(&self, builder: &mut QueryBuilder<DB>) -> DynqResult<()> {
        builder.push_ident(&self.field)?;
        builder.push(match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        });
        match self.nulls {
            NullOrder::Default => {}
            NullOrder::First => builder.push(" NULLS FIRST"),
            NullOrder::Last => builder.push(" NULLS LAST"),
        }
        Ok(())
    }
}

impl<DB: Database> Build<DB> for Assignment {
    fn build(&self, builder: &mut QueryBuilder<DB>) -> DynqResult<()> {
        builder.push_ident(&self.field)?;
        builder.push(" = ");
        match &self.expr {
            SetExpr::Value(value) => builder.push_bind(value.clone()),
            SetExpr::Add(n) => {
                builder.push_ident(&self.field)?;
                builder.push(" + ");
                builder.push_bind(Value::Int(*n));
            }
            SetExpr::Multiply(n) => {
                builder.push_ident(&self.field)?;
                builder.push(" * ");
                builder.push_bind(Value::Int(*n));
            }
        }
        Ok(())
    }
}

fn build_where<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    predicate: &Predicate,
) -> DynqResult<()> {
    if !predicate.is_true() {
        builder.push(" WHERE ");
        predicate.build(builder)?;
    }
    Ok(())
}

/// `SELECT <projection> FROM <source> [WHERE ..] [ORDER BY ..] [LIMIT ..] [OFFSET ..]`
pub fn select<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    projection: &str,
    source: &str,
    predicate: &Predicate,
    orders: &[Order],
    window: Window,
) -> DynqResult<()> {
    builder.push("SELECT ");
    builder.push(projection);
    builder.push(" FROM ");
    builder.push(source);
    build_where(builder, predicate)?;

    for (i, order) in orders.iter().enumerate() {
        builder.push(if i == 0 { " ORDER BY " } else { ", " });
        order.build(builder)?;
    }

    if let Some(limit) = window.limit {
        builder.push(&format!(" LIMIT {}", limit));
    }
    if window.offset > 0 {
        builder.push(&format!(" OFFSET {}", window.offset));
    }
    Ok(())
}

/// `SELECT COUNT(*) FROM <source> [WHERE ..]`
pub fn count<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    source: &str,
    predicate: &Predicate,
) -> DynqResult<()> {
    builder.push("SELECT COUNT(*) FROM ");
    builder.push(source);
    build_where(builder, predicate)
}

/// `UPDATE <table> SET .. [WHERE ..]`
pub fn update<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    table: &str,
    predicate: &Predicate,
    assignments: &[Assignment],
) -> DynqResult<()> {
    builder.push("UPDATE ");
    builder.push(table);
    builder.push(" SET ");
    for (i, assignment) in assignments.iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        assignment.build(builder)?;
    }
    build_where(builder, predicate)
}

/// `DELETE FROM <table> [WHERE ..]`
pub fn delete<DB: Database>(
    builder: &mut QueryBuilder<DB>,
    table: &str,
    predicate: &Predicate,
) -> DynqResult<()> {
    builder.push("DELETE FROM ");
    builder.push(table);
    build_where(builder, predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::database::postgres::Postgres;
    use crate::DynqError;

    const USERNAME: Column<String> = Column::new("m.username");
    const AGE: Column<i32> = Column::new("m.age");
    const TEAM_NAME: Column<String> = Column::new("t.name");

    const SOURCE: &str = "member m LEFT JOIN team t ON m.team_id = t.id";

    fn render(f: impl FnOnce(&mut QueryBuilder<Postgres>) -> DynqResult<()>) -> (String, Vec<Value>) {
        let mut builder = QueryBuilder::<Postgres>::new();
        f(&mut builder).unwrap();
        builder.build()
    }

    #[test]
    fn select_without_condition_has_no_where() {
        let (sql, args) = render(|b| {
            select(b, "*", "member", &Predicate::True, &[], Window::new(0, 3))
        });
        assert_eq!(sql, "SELECT * FROM member LIMIT 3");
        assert!(args.is_empty());
    }

    #[test]
    fn select_search_page() {
        let predicate = TEAM_NAME
            .eq("teamB".to_string())
            .and(AGE.goe(35))
            .and(AGE.loe(40));

        let (sql, args) = render(|b| {
            select(
                b,
                "m.username, m.age, t.name",
                SOURCE,
                &predicate,
                &[USERNAME.desc()],
                Window::new(1, 2),
            )
        });

        assert_eq!(
            sql,
            "SELECT m.username, m.age, t.name \
             FROM member m LEFT JOIN team t ON m.team_id = t.id \
             WHERE (t.name = $1 AND m.age >= $2 AND m.age <= $3) \
             ORDER BY m.username DESC LIMIT 2 OFFSET 1"
        );
        assert_eq!(
            args,
            vec![Value::from("teamB"), Value::Int(35), Value::Int(40)]
        );
    }

    #[test]
    fn between_renders_both_bounds() {
        let (sql, _) = render(|b| AGE.between(10, 40).build(b));
        assert_eq!(sql, "(m.age >= $1 AND m.age <= $2)");
    }

    #[test]
    fn or_and_in() {
        let predicate = AGE
            .is_in(vec![20, 30])
            .or(USERNAME.is_null())
            .and(AGE.gt(10));
        let (sql, args) = render(|b| predicate.build(b));
        assert_eq!(sql, "((m.age IN ($1, $2) OR m.username IS NULL) AND m.age > $3)");
        assert_eq!(args.len(), 3);

        let (sql, _) = render(|b| AGE.is_in(vec![]).build(b));
        assert_eq!(sql, "FALSE");
    }

    #[test]
    fn hand_built_junctions_render_their_identity() {
        let (sql, _) = render(|b| {
            select(b, "*", "member", &Predicate::And(vec![]), &[], Window::all())
        });
        assert_eq!(sql, "SELECT * FROM member WHERE TRUE");

        let (sql, _) = render(|b| {
            select(b, "*", "member", &Predicate::Or(vec![]), &[], Window::all())
        });
        assert_eq!(sql, "SELECT * FROM member WHERE FALSE");

        let (sql, _) = render(|b| Predicate::And(vec![Predicate::True]).build(b));
        assert_eq!(sql, "TRUE");

        let (sql, args) = render(|b| Predicate::Or(vec![AGE.gt(10)]).build(b));
        assert_eq!(sql, "m.age > $1");
        assert_eq!(args, vec![Value::Int(10)]);
    }

    #[test]
    fn order_with_null_placement() {
        let (sql, _) = render(|b| {
            select(
                b,
                "*",
                "member",
                &Predicate::True,
                &[Order::desc("age"), Order::asc("username").nulls_last()],
                Window::all(),
            )
        });
        assert_eq!(
            sql,
            "SELECT * FROM member ORDER BY age DESC, username ASC NULLS LAST"
        );
    }

    #[test]
    fn count_statement() {
        let (sql, args) = render(|b| count(b, SOURCE, &TEAM_NAME.eq("teamA".to_string())));
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM member m LEFT JOIN team t ON m.team_id = t.id WHERE t.name = $1"
        );
        assert_eq!(args, vec![Value::from("teamA")]);
    }

    #[test]
    fn bulk_statements() {
        let age: Column<i32> = Column::new("age");
        let username: Column<String> = Column::new("username");

        let (sql, args) = render(|b| {
            update(
                b,
                "member",
                &age.lt(28),
                &[username.set("guest".to_string()), age.increment_by(1)],
            )
        });
        assert_eq!(
            sql,
            "UPDATE member SET username = $1, age = age + $2 WHERE age < $3"
        );
        assert_eq!(
            args,
            vec![Value::from("guest"), Value::Int(1), Value::Int(28)]
        );

        let (sql, _) = render(|b| update(b, "member", &Predicate::True, &[age.multiply_by(2)]));
        assert_eq!(sql, "UPDATE member SET age = age * $1");

        let (sql, _) = render(|b| delete(b, "member", &age.gt(18)));
        assert_eq!(sql, "DELETE FROM member WHERE age > $1");
    }

    #[test]
    fn rejects_bad_identifiers() {
        let mut builder = QueryBuilder::<Postgres>::new();
        let result = Predicate::equals("age = 1 OR 1", 1).build(&mut builder);
        assert!(matches!(result, Err(DynqError::InvalidSpec(_))));
    }
}
