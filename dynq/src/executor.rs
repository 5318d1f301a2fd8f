use futures_util::future::try_join;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::assign::Assignment;
use crate::order::Order;
use crate::page::Page;
use crate::predicate::Predicate;
use crate::query::{QuerySpec, Window};
use crate::store::Store;
use crate::{DynqError, DynqResult};

/// How `fetch_page` establishes the total row count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// Always issue a count query, concurrently with the content query.
    Exact,
    /// Skip the count query when the content alone determines the total.
    #[default]
    Optimized,
    /// Never count. Pages carry no total.
    Skip,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorOptions {
    pub count_mode: CountMode,
    /// Upper bound on `QuerySpec::limit`, if any.
    pub max_limit: Option<u64>,
}

/// Executes query specs against a [Store], assembling pages.
pub struct PageExecutor<S> {
    store: S,
    options: ExecutorOptions,
}

impl<S: Store> PageExecutor<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, ExecutorOptions::default())
    }

    pub fn with_options(store: S, options: ExecutorOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    /// Fetch one page of `spec`, with the total count as configured.
    pub async fn fetch_page(&self, spec: &QuerySpec) -> DynqResult<Page<S::Row>> {
        self.check_limit(spec.limit())?;

        let predicate = spec.predicate();
        let offset = spec.offset();
        let limit = spec.limit();

        debug!(offset, limit, mode = ?self.options.count_mode, "fetching page");

        let (content, total) = match self.options.count_mode {
            CountMode::Exact => {
                let (content, total) = try_join(
                    self.store.fetch(predicate, spec.orders(), spec.window()),
                    self.store.count(predicate),
                )
                .await?;
                (content, Some(total))
            }
            CountMode::Optimized => {
                let content = self
                    .store
                    .fetch(predicate, spec.orders(), spec.window())
                    .await?;
                let total = match infer_total(offset, limit, content.len() as u64) {
                    Some(total) => {
                        trace!(total, "count query skipped");
                        total
                    }
                    None => self.store.count(predicate).await?,
                };
                (content, Some(total))
            }
            CountMode::Skip => {
                let content = self
                    .store
                    .fetch(predicate, spec.orders(), spec.window())
                    .await?;
                (content, None)
            }
        };

        Ok(Page::new(content, total, offset, limit))
    }

    /// Every matching row.
    pub async fn fetch(&self, predicate: &Predicate, orders: &[Order]) -> DynqResult<Vec<S::Row>> {
        debug!("fetching all");
        self.store.fetch(predicate, orders, Window::all()).await
    }

    /// The single matching row, if any. More than one is an error.
    pub async fn fetch_one(&self, predicate: &Predicate) -> DynqResult<Option<S::Row>> {
        let mut rows = self.store.fetch(predicate, &[], Window::new(0, 2)).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            _ => Err(DynqError::NonUniqueResult),
        }
    }

    /// The first matching row in `orders`, if any.
    pub async fn fetch_first(
        &self,
        predicate: &Predicate,
        orders: &[Order],
    ) -> DynqResult<Option<S::Row>> {
        let rows = self.store.fetch(predicate, orders, Window::new(0, 1)).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn count(&self, predicate: &Predicate) -> DynqResult<u64> {
        self.store.count(predicate).await
    }

    pub async fn exists(&self, predicate: &Predicate) -> DynqResult<bool> {
        let rows = self.store.fetch(predicate, &[], Window::new(0, 1)).await?;
        Ok(!rows.is_empty())
    }

    /// Bulk update, bypassing any row-level caching. Returns the affected count.
    pub async fn update(
        &self,
        predicate: &Predicate,
        assignments: &[Assignment],
    ) -> DynqResult<u64> {
        if assignments.is_empty() {
            return Err(DynqError::InvalidSpec(
                "update needs at least one assignment".to_string(),
            ));
        }

        let affected = self.store.update(predicate, assignments).await?;
        debug!(affected, "bulk update");
        self.store.invalidate().await?;
        Ok(affected)
    }

    /// Bulk delete. Returns the affected count.
    pub async fn delete(&self, predicate: &Predicate) -> DynqResult<u64> {
        let affected = self.store.delete(predicate).await?;
        debug!(affected, "bulk delete");
        self.store.invalidate().await?;
        Ok(affected)
    }

    fn check_limit(&self, limit: u64) -> DynqResult<()> {
        match self.options.max_limit {
            Some(max) if limit > max => Err(DynqError::InvalidSpec(format!(
                "limit {} exceeds maximum of {}",
                limit, max
            ))),
            _ => Ok(()),
        }
    }
}

/// The total row count, when the content of one page already proves it.
///
/// A short first page holds everything. A short, non-empty later page is
/// the last one. Anything else needs a count query.
fn infer_total(offset: u64, limit: u64, len: u64) -> Option<u64> {
    if len >= limit {
        return None;
    }
    if offset == 0 {
        Some(len)
    } else if len > 0 {
        Some(offset + len)
    } else {
        None
    }
}
