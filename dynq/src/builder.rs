use crate::database::Database;
use crate::value::Value;
use crate::{DynqError, DynqResult};

/// Accumulates SQL text and the arguments bound to its placeholders.
pub struct QueryBuilder<DB: Database> {
    db: std::marker::PhantomData<DB>,
    buf: String,
    args: Vec<Value>,
}

impl<DB: Database> Default for QueryBuilder<DB> {
    fn default() -> Self {
        Self::new()
    }
}

impl<DB: Database> QueryBuilder<DB> {
    pub fn new() -> Self {
        Self {
            db: std::marker::PhantomData,
            buf: String::new(),
            args: vec![],
        }
    }

    /// The finished statement and its arguments, in placeholder order.
    pub fn build(self) -> (String, Vec<Value>) {
        (self.buf, self.args)
    }

    pub fn push(&mut self, str: &str) {
        self.buf.push_str(str);
    }

    /// Bind a value through a placeholder. Null is written inline.
    pub fn push_bind(&mut self, value: Value) {
        match value {
            Value::Null => self.push("NULL"),
            value => {
                self.args.push(value);
                DB::write_placeholder(&mut self.buf, self.args.len());
            }
        }
    }

    /// Write a (possibly dotted) column identifier.
    ///
    /// Identifiers come from callers, not from a schema, so anything
    /// that is not a plain `name` or `alias.name` is rejected.
    pub fn push_ident(&mut self, ident: &str) -> DynqResult<()> {
        if !is_identifier_path(ident) {
            return Err(DynqError::InvalidSpec(format!(
                "invalid field identifier `{}`",
                ident
            )));
        }
        self.push(ident);
        Ok(())
    }
}

fn is_identifier_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(is_identifier)
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::postgres::Postgres;

    #[test]
    fn identifiers() {
        assert!(is_identifier_path("age"));
        assert!(is_identifier_path("team.name"));
        assert!(is_identifier_path("_t1.team_id"));
        assert!(!is_identifier_path(""));
        assert!(!is_identifier_path("team."));
        assert!(!is_identifier_path("1abc"));
        assert!(!is_identifier_path("age; DROP TABLE member"));
    }

    #[test]
    fn placeholders_are_numbered_and_null_is_inline() {
        let mut builder = QueryBuilder::<Postgres>::new();
        builder.push_bind(Value::Int(1));
        builder.push(", ");
        builder.push_bind(Value::Null);
        builder.push(", ");
        builder.push_bind(Value::from("x"));

        let (sql, args) = builder.build();
        assert_eq!(sql, "$1, NULL, $2");
        assert_eq!(args, vec![Value::Int(1), Value::from("x")]);
    }
}
