use async_trait::*;

use crate::assign::Assignment;
use crate::order::Order;
use crate::predicate::Predicate;
use crate::query::Window;
use crate::DynqResult;

/// The relational engine behind a [PageExecutor](crate::PageExecutor).
///
/// Implementations own connection handling, isolation and SQL dialect.
/// Errors must come back as `StoreUnavailable` when retrying may help
/// and `Store` otherwise; callers see them unchanged.
#[async_trait]
pub trait Store: Send + Sync {
    type Row: Send;

    /// Number of rows matching `predicate`.
    async fn count(&self, predicate: &Predicate) -> DynqResult<u64>;

    /// Matching rows, sorted by `orders`, restricted to `window`.
    async fn fetch(
        &self,
        predicate: &Predicate,
        orders: &[Order],
        window: Window,
    ) -> DynqResult<Vec<Self::Row>>;

    /// Apply `assignments` to every matching row. Returns the affected count.
    async fn update(&self, predicate: &Predicate, assignments: &[Assignment]) -> DynqResult<u64>;

    /// Remove every matching row. Returns the affected count.
    async fn delete(&self, predicate: &Predicate) -> DynqResult<u64>;

    /// Drop any cached reads after a bulk write.
    ///
    /// Stores that read their own writes need not override this.
    async fn invalidate(&self) -> DynqResult<()> {
        Ok(())
    }
}
