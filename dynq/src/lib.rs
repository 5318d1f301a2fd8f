//!
//! Dynamic, composable query conditions executed as pages against
//! an abstract relational store.
//!
//! ```text
//!  search condition ──► ConditionBuilder ──► Predicate
//!                                              │
//!                     order + window ──► QuerySpec
//!                                              │
//!                        PageExecutor ─── Store::fetch / Store::count
//!                                              │
//!                                           Page<Row>
//! ```
//!

pub use dynq_macros::*;

pub mod assign;
pub mod build;
pub mod builder;
pub mod column;
pub mod condition;
pub mod database;
pub mod executor;
pub mod memory;
pub mod order;
pub mod page;
pub mod predicate;
pub mod prelude;
pub mod query;
pub mod record;
pub mod store;
pub mod value;

pub use assign::{Assignment, SetExpr};
pub use column::Column;
pub use condition::{Condition, ConditionBuilder};
pub use executor::{CountMode, ExecutorOptions, PageExecutor};
pub use order::{Direction, NullOrder, Order};
pub use page::Page;
pub use predicate::Predicate;
pub use query::{QuerySpec, Window};
pub use record::Record;
pub use store::Store;
pub use value::{FromValue, Value};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DynqError {
    /// The caller handed over a malformed window, predicate or assignment.
    #[error("Invalid query spec: {0}")]
    InvalidSpec(String),

    /// Transient: the store could not be reached. Safe to retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Query returned more than one row")]
    NonUniqueResult,
}

impl DynqError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, DynqError::StoreUnavailable(_))
    }
}

pub type DynqResult<T> = Result<T, DynqError>;
