use serde::Serialize;

/// One window of a result set, plus the size of the whole set when known.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    total_count: Option<u64>,
    offset: u64,
    limit: u64,
}

impl<T> Page<T> {
    /// A total smaller than the content is raised to the content length,
    /// so `content.len() <= total_count` always holds.
    pub fn new(content: Vec<T>, total_count: Option<u64>, offset: u64, limit: u64) -> Self {
        let len = content.len() as u64;
        Self {
            content,
            total_count: total_count.map(|total| total.max(len)),
            offset,
            limit,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Zero-based page number, assuming the offset is page aligned.
    pub fn number(&self) -> u64 {
        self.offset / self.limit.max(1)
    }

    pub fn total_pages(&self) -> Option<u64> {
        let limit = self.limit.max(1);
        self.total_count.map(|total| (total + limit - 1) / limit)
    }

    /// Whether rows exist past this page.
    ///
    /// Without a total this is a guess: a full page may have a successor.
    pub fn has_next(&self) -> bool {
        let end = self.offset + self.content.len() as u64;
        match self.total_count {
            Some(total) => end < total,
            None => self.content.len() as u64 == self.limit,
        }
    }

    pub fn map<U, F>(self, func: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(func).collect(),
            total_count: self.total_count,
            offset: self.offset,
            limit: self.limit,
        }
    }
}
