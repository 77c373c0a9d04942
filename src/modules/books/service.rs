use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use super::filter::ListFilter;
use super::models::{Book, BookDetails, BookPayload, BookSummary};
use super::store::{BookStore, StoreError};
use crate::utils::{Clock, IdGenerator};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("book name is missing")]
    MissingName,

    #[error("readPage ({read_page}) is greater than pageCount ({page_count})")]
    ReadPageExceedsPageCount { read_page: i64, page_count: i64 },

    #[error("book '{0}' not found")]
    NotFound(String),

    #[error("book '{0}' is not retrievable after insert")]
    InsertNotVisible(String),

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BookError {
    /// Client-caused errors are reported as `fail`, the rest as `error`.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BookError::MissingName
                | BookError::ReadPageExceedsPageCount { .. }
                | BookError::NotFound(_)
        )
    }
}

/// Owns the book store and applies the business rules around it.
///
/// Every read-modify-write runs under a single write guard.
pub struct BookService {
    store: RwLock<BookStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl BookService {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store: RwLock::new(BookStore::new()),
            clock,
            ids,
        }
    }

    /// Validate and insert a new book, returning its id.
    pub async fn add(&self, payload: BookPayload) -> Result<String, BookError> {
        let details = BookDetails::try_from(payload)?;
        let id = self.ids.generate();
        let now = self.clock.now()?;
        let book = Book::new(id.clone(), details, now);

        let mut store = self.store.write().await;
        store.insert(book)?;
        if store.get(&id).is_none() {
            return Err(BookError::InsertNotVisible(id));
        }

        tracing::info!(book_id = %id, total = store.len(), "book added");
        Ok(id)
    }

    /// Summaries of every book matching `filter`, in insertion order.
    pub async fn list(&self, filter: &ListFilter) -> Vec<BookSummary> {
        let store = self.store.read().await;
        store
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        let store = self.store.read().await;
        store
            .get(id)
            .cloned()
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    /// Validate the payload, then replace the book in place.
    pub async fn edit(&self, id: &str, payload: BookPayload) -> Result<Book, BookError> {
        let details = BookDetails::try_from(payload)?;
        let now = self.clock.now()?;

        let mut store = self.store.write().await;
        let index = store
            .index_of(id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        let book = store.replace_at(index, details, now)?.clone();

        tracing::info!(book_id = %id, finished = book.finished, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> Result<Book, BookError> {
        let mut store = self.store.write().await;
        let index = store
            .index_of(id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        let removed = store.remove_at(index)?;

        tracing::info!(book_id = %id, total = store.len(), "book deleted");
        Ok(removed)
    }

    /// Number of stored books.
    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}
