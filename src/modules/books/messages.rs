//! User-facing response messages in each supported locale.

use shelf_kernel::settings::Locale;

/// Operation a message belongs to; failure wording depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Succeeded(Operation),
    MissingName(Operation),
    ReadPageExceedsPageCount(Operation),
    NotFound(Operation),
    BookNotFound,
    Failed(Operation),
    InvalidPayload,
}

/// Message catalog bound to one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn text(&self, message: Message) -> &'static str {
        match self.locale {
            Locale::En => english(message),
            Locale::Id => indonesian(message),
        }
    }
}

fn english(message: Message) -> &'static str {
    use Message::*;
    use Operation::*;

    match message {
        Succeeded(Add) => "Book added successfully",
        Succeeded(Update) => "Book updated successfully",
        Succeeded(Delete) => "Book deleted successfully",
        MissingName(Update) => "Failed to update book. Please fill in the book name",
        MissingName(_) => "Failed to add book. Please fill in the book name",
        ReadPageExceedsPageCount(Update) => {
            "Failed to update book. readPage must not be greater than pageCount"
        }
        ReadPageExceedsPageCount(_) => {
            "Failed to add book. readPage must not be greater than pageCount"
        }
        NotFound(Update) => "Failed to update book. Id not found",
        NotFound(_) => "Failed to delete book. Id not found",
        BookNotFound => "Book not found",
        Failed(Add) => "Failed to add book",
        Failed(Update) => "Failed to update book",
        Failed(Delete) => "Failed to delete book",
        InvalidPayload => "Invalid request payload",
    }
}

fn indonesian(message: Message) -> &'static str {
    use Message::*;
    use Operation::*;

    match message {
        Succeeded(Add) => "Buku berhasil ditambahkan",
        Succeeded(Update) => "Buku berhasil diperbarui",
        Succeeded(Delete) => "Buku berhasil dihapus",
        MissingName(Update) => "Gagal memperbarui buku. Mohon isi nama buku",
        MissingName(_) => "Gagal menambahkan buku. Mohon isi nama buku",
        ReadPageExceedsPageCount(Update) => {
            "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
        }
        ReadPageExceedsPageCount(_) => {
            "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
        }
        NotFound(Update) => "Gagal memperbarui buku. Id tidak ditemukan",
        NotFound(_) => "Buku gagal dihapus. Id tidak ditemukan",
        BookNotFound => "Buku tidak ditemukan",
        Failed(Add) => "Buku gagal ditambahkan",
        Failed(Update) => "Buku gagal diperbarui",
        Failed(Delete) => "Buku gagal dihapus",
        InvalidPayload => "Payload permintaan tidak valid",
    }
}
