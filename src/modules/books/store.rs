use thiserror::Error;

use super::models::{Book, BookDetails};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("book id '{0}' is already present")]
    DuplicateId(String),

    #[error("no book at index {index} (store holds {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Ordered in-memory collection of books; insertion order is preserved
/// and ids are unique.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the book with `id`, if any.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Append a book at the end.
    pub fn insert(&mut self, book: Book) -> Result<(), StoreError> {
        if self.index_of(&book.id).is_some() {
            return Err(StoreError::DuplicateId(book.id));
        }
        self.books.push(book);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Overwrite the book at `index`, keeping its `id` and `inserted_at`.
    pub fn replace_at(
        &mut self,
        index: usize,
        details: BookDetails,
        updated_at: String,
    ) -> Result<&Book, StoreError> {
        let len = self.books.len();
        let book = self
            .books
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;
        book.apply(details, updated_at);
        Ok(book)
    }

    /// Remove the book at `index`, shifting later books down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Book, StoreError> {
        if index >= self.books.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.books.len(),
            });
        }
        Ok(self.books.remove(index))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }
}
