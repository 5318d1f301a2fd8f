use crate::order::Order;
use crate::predicate::Predicate;
use crate::{DynqError, DynqResult};

/// The slice of an ordered result set to return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    /// `None` returns every row from `offset` on.
    pub limit: Option<u64>,
}

impl Window {
    pub fn all() -> Self {
        Self {
            offset: 0,
            limit: None,
        }
    }

    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }
}

/// A complete, validated read request: what to match, in which order,
/// and which window of the result to return.
///
/// Purely descriptive; executing it is the job of
/// [PageExecutor](crate::PageExecutor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySpec {
    predicate: Predicate,
    order_by: Vec<Order>,
    offset: u64,
    limit: u64,
}

impl QuerySpec {
    /// Fails with `InvalidSpec` unless `limit > 0` and `offset >= 0`.
    pub fn new(predicate: Predicate, offset: i64, limit: i64) -> DynqResult<Self> {
        if limit <= 0 {
            return Err(DynqError::InvalidSpec(format!(
                "limit must be positive, got {}",
                limit
            )));
        }
        if offset < 0 {
            return Err(DynqError::InvalidSpec(format!(
                "offset must not be negative, got {}",
                offset
            )));
        }

        Ok(Self {
            predicate,
            order_by: vec![],
            offset: offset as u64,
            limit: limit as u64,
        })
    }

    /// Zero-based page number of `page_size` rows.
    pub fn page(predicate: Predicate, page_number: i64, page_size: i64) -> DynqResult<Self> {
        if page_number < 0 {
            return Err(DynqError::InvalidSpec(format!(
                "page number must not be negative, got {}",
                page_number
            )));
        }
        let offset = page_number.checked_mul(page_size).ok_or_else(|| {
            DynqError::InvalidSpec(format!(
                "page {} of size {} is out of range",
                page_number, page_size
            ))
        })?;

        Self::new(predicate, offset, page_size)
    }

    /// Append a sort key. Earlier keys take precedence.
    pub fn order_by(mut self, order: Order) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn orders(&self) -> &[Order] {
        &self.order_by
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn window(&self) -> Window {
        Window::new(self.offset, self.limit)
    }
}
