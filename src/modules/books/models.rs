use serde::{Deserialize, Serialize};

use super::service::BookError;

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, fixed at creation
    pub id: String,
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    /// Total number of pages
    pub page_count: i64,
    /// Pages read so far
    pub read_page: i64,
    /// Derived: `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    /// ISO-8601, set once at creation
    pub inserted_at: String,
    /// ISO-8601, refreshed on every edit
    pub updated_at: String,
}

impl Book {
    /// Build a new record; both timestamps start at `now`.
    pub fn new(id: String, details: BookDetails, now: String) -> Self {
        Self {
            id,
            finished: details.is_finished(),
            name: details.name,
            year: details.year,
            author: details.author,
            summary: details.summary,
            publisher: details.publisher,
            page_count: details.page_count,
            read_page: details.read_page,
            reading: details.reading,
            inserted_at: now.clone(),
            updated_at: now,
        }
    }

    /// Overwrite every field except `id` and `inserted_at`.
    pub fn apply(&mut self, details: BookDetails, updated_at: String) {
        self.finished = details.is_finished();
        self.name = details.name;
        self.year = details.year;
        self.author = details.author;
        self.summary = details.summary;
        self.publisher = details.publisher;
        self.page_count = details.page_count;
        self.read_page = details.read_page;
        self.reading = details.reading;
        self.updated_at = updated_at;
    }
}

/// Request body for creating or editing a book.
///
/// `name` is the only required field; everything else falls back to its
/// zero value when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    pub reading: bool,
}

/// A payload that passed both business rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub name: String,
    pub year: i64,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    pub reading: bool,
}

impl BookDetails {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

impl TryFrom<BookPayload> for BookDetails {
    type Error = BookError;

    /// Checks, in order: name present, then `read_page <= page_count`.
    fn try_from(payload: BookPayload) -> Result<Self, Self::Error> {
        let name = payload.name.ok_or(BookError::MissingName)?;

        if payload.read_page > payload.page_count {
            return Err(BookError::ReadPageExceedsPageCount {
                read_page: payload.read_page,
                page_count: payload.page_count,
            });
        }

        Ok(Self {
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            reading: payload.reading,
        })
    }
}

/// List projection of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// `data` of add/edit/delete responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookIdData {
    pub book_id: String,
}

/// `data` of the list response.
#[derive(Debug, Clone, Serialize)]
pub struct BooksData {
    pub books: Vec<BookSummary>,
}

/// `data` of the get-by-id response.
#[derive(Debug, Clone, Serialize)]
pub struct BookData {
    pub book: Book,
}
