use super::Database;

#[derive(Clone, Debug)]
pub struct Postgres;

impl Database for Postgres {
    fn write_placeholder(buf: &mut String, index: usize) {
        buf.push('$');
        buf.push_str(&index.to_string());
    }
}

#[cfg(feature = "postgres")]
pub use pool::PgStore;

#[cfg(feature = "postgres")]
mod pool {
    use async_trait::*;
    use sqlx::postgres::{PgArguments, PgPool, PgRow};
    use sqlx::Arguments;
    use tracing::debug;

    use super::Postgres;
    use crate::assign::Assignment;
    use crate::build;
    use crate::builder::QueryBuilder;
    use crate::order::Order;
    use crate::predicate::Predicate;
    use crate::query::Window;
    use crate::store::Store;
    use crate::value::Value;
    use crate::{DynqError, DynqResult};

    impl From<sqlx::Error> for DynqError {
        fn from(err: sqlx::Error) -> Self {
            match &err {
                sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_) => DynqError::StoreUnavailable(err.to_string()),
                _ => DynqError::Store(err.to_string()),
            }
        }
    }

    /// A [Store] backed by a Postgres connection pool.
    ///
    /// Reads go against `source`, which may join further tables, so that
    /// predicates can reference joined attributes like `t.name`. Writes
    /// go against the plain `table`.
    pub struct PgStore<R> {
        pool: PgPool,
        table: String,
        source: String,
        projection: String,
        row: std::marker::PhantomData<fn() -> R>,
    }

    impl<R> PgStore<R> {
        pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
            let table = table.into();
            Self {
                pool,
                source: table.clone(),
                table,
                projection: "*".to_string(),
                row: std::marker::PhantomData,
            }
        }

        /// Read from `source` instead of the bare table, e.g.
        /// `member m LEFT JOIN team t ON m.team_id = t.id`.
        pub fn with_source(mut self, source: impl Into<String>) -> Self {
            self.source = source.into();
            self
        }

        /// Select list for reads. Defaults to `*`.
        pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
            self.projection = projection.into();
            self
        }

        pub fn pool(&self) -> &PgPool {
            &self.pool
        }
    }

    fn arguments(values: Vec<Value>) -> PgArguments {
        let mut arguments = PgArguments::default();
        for value in values {
            match value {
                // Written inline by the builder, never bound.
                Value::Null => {}
                Value::Bool(b) => arguments.add(b),
                Value::Int(i) => arguments.add(i),
                Value::Text(s) => arguments.add(s),
            }
        }
        arguments
    }

    fn render(
        func: impl FnOnce(&mut QueryBuilder<Postgres>) -> DynqResult<()>,
    ) -> DynqResult<(String, PgArguments)> {
        let mut builder = QueryBuilder::<Postgres>::new();
        func(&mut builder)?;
        let (sql, args) = builder.build();
        debug!(%sql, args = args.len(), "postgres query");
        Ok((sql, arguments(args)))
    }

    #[async_trait]
    impl<R> Store for PgStore<R>
    where
        R: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        type Row = R;

        async fn count(&self, predicate: &Predicate) -> DynqResult<u64> {
            let (sql, args) = render(|b| build::count(b, &self.source, predicate))?;
            let count = sqlx::query_scalar_with::<sqlx::Postgres, i64, _>(&sql, args)
                .fetch_one(&self.pool)
                .await?;
            Ok(count.max(0) as u64)
        }

        async fn fetch(
            &self,
            predicate: &Predicate,
            orders: &[Order],
            window: Window,
        ) -> DynqResult<Vec<R>> {
            let (sql, args) = render(|b| {
                build::select(b, &self.projection, &self.source, predicate, orders, window)
            })?;
            let rows = sqlx::query_as_with::<sqlx::Postgres, R, _>(&sql, args)
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        }

        async fn update(
            &self,
            predicate: &Predicate,
            assignments: &[Assignment],
        ) -> DynqResult<u64> {
            let (sql, args) = render(|b| build::update(b, &self.table, predicate, assignments))?;
            let result = sqlx::query_with::<sqlx::Postgres, _>(&sql, args)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        }

        async fn delete(&self, predicate: &Predicate) -> DynqResult<u64> {
            let (sql, args) = render(|b| build::delete(b, &self.table, predicate))?;
            let result = sqlx::query_with::<sqlx::Postgres, _>(&sql, args)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        }
    }
}
