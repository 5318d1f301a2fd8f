//!
//! Glob-import for the common types: `use dynq::prelude::*;`
//!

pub use crate::column::Column;
pub use crate::condition::{Condition, ConditionBuilder};
pub use crate::executor::{CountMode, ExecutorOptions, PageExecutor};
pub use crate::order::Order;
pub use crate::page::Page;
pub use crate::predicate::Predicate;
pub use crate::query::QuerySpec;
pub use crate::record::Record;
pub use crate::store::Store;
pub use crate::value::Value;
pub use crate::{DynqError, DynqResult};

pub use dynq_macros::{Condition, Record};
