//!
//! An in-memory [Store] over a vector of records.
//!
//! Evaluates predicates and orderings in process. Handy as a test double
//! and for small embedded datasets; every call is counted so tests can
//! assert which queries were issued.
//!

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::*;
use parking_lot::RwLock;

use crate::assign::Assignment;
use crate::order::{self, Order};
use crate::predicate::Predicate;
use crate::query::Window;
use crate::record::Record;
use crate::store::Store;
use crate::{DynqError, DynqResult};

/// Number of times each store operation was invoked.
#[derive(Debug, Default)]
pub struct StoreCalls {
    count: AtomicUsize,
    fetch: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
    invalidate: AtomicUsize,
}

impl StoreCalls {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn fetch(&self) -> usize {
        self.fetch.load(Ordering::SeqCst)
    }

    pub fn update(&self) -> usize {
        self.update.load(Ordering::SeqCst)
    }

    pub fn delete(&self) -> usize {
        self.delete.load(Ordering::SeqCst)
    }

    pub fn invalidate(&self) -> usize {
        self.invalidate.load(Ordering::SeqCst)
    }

    fn record(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MemoryStore<R> {
    rows: RwLock<Vec<R>>,
    calls: StoreCalls,
    available: AtomicBool,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl<R> MemoryStore<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: RwLock::new(rows),
            calls: StoreCalls::default(),
            available: AtomicBool::new(true),
        }
    }

    pub fn insert(&self, row: R) {
        self.rows.write().push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    pub fn calls(&self) -> &StoreCalls {
        &self.calls
    }

    /// Simulate an outage: while unavailable every operation fails
    /// with `StoreUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> DynqResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DynqError::StoreUnavailable(
                "memory store is offline".to_string(),
            ))
        }
    }
}

impl<R: Clone> MemoryStore<R> {
    /// Snapshot of all rows in insertion order.
    pub fn rows(&self) -> Vec<R> {
        self.rows.read().clone()
    }
}

#[async_trait]
impl<R> Store for MemoryStore<R>
where
    R: Record + Clone + Send + Sync,
{
    type Row = R;

    async fn count(&self, predicate: &Predicate) -> DynqResult<u64> {
        StoreCalls::record(&self.calls.count);
        self.ensure_available()?;

        let rows = self.rows.read();
        Ok(rows.iter().filter(|row| predicate.matches(*row)).count() as u64)
    }

    async fn fetch(
        &self,
        predicate: &Predicate,
        orders: &[Order],
        window: Window,
    ) -> DynqResult<Vec<R>> {
        StoreCalls::record(&self.calls.fetch);
        self.ensure_available()?;

        let mut matched: Vec<R> = {
            let rows = self.rows.read();
            rows.iter()
                .filter(|row| predicate.matches(*row))
                .cloned()
                .collect()
        };

        // Stable, so ties keep insertion order.
        matched.sort_by(|a, b| order::compare_all(orders, a, b));

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = window
            .limit
            .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(&self, predicate: &Predicate, assignments: &[Assignment]) -> DynqResult<u64> {
        StoreCalls::record(&self.calls.update);
        self.ensure_available()?;

        let mut rows = self.rows.write();

        // Work on a copy so a failing assignment leaves nothing half-applied.
        let mut updated = rows.clone();
        let mut affected = 0;
        for row in updated.iter_mut().filter(|row| predicate.matches(&**row)) {
            for assignment in assignments {
                let current = row.get(&assignment.field);
                let next = assignment.expr.apply(current)?;
                row.set(&assignment.field, next)?;
            }
            affected += 1;
        }

        *rows = updated;
        Ok(affected)
    }

    async fn delete(&self, predicate: &Predicate) -> DynqResult<u64> {
        StoreCalls::record(&self.calls.delete);
        self.ensure_available()?;

        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|row| !predicate.matches(row));
        Ok((before - rows.len()) as u64)
    }

    async fn invalidate(&self) -> DynqResult<()> {
        StoreCalls::record(&self.calls.invalidate);
        Ok(())
    }
}
