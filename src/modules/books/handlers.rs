//! Axum handlers for `/books`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use shelf_http::{ApiResponse, AppError};

use super::filter::{ListFilter, ListQuery};
use super::messages::{Message, Messages, Operation};
use super::models::{BookData, BookIdData, BookPayload, BooksData};
use super::service::{BookError, BookService};

/// State shared by every books handler.
#[derive(Clone)]
pub struct BooksState {
    pub service: Arc<BookService>,
    pub messages: Messages,
}

impl BooksState {
    /// Map a domain error to its HTTP form with the operation's wording.
    fn error(&self, operation: Operation, err: BookError) -> AppError {
        let text = |message| self.messages.text(message);
        match err {
            BookError::MissingName => AppError::validation(text(Message::MissingName(operation))),
            BookError::ReadPageExceedsPageCount { .. } => {
                AppError::validation(text(Message::ReadPageExceedsPageCount(operation)))
            }
            BookError::NotFound(_) => AppError::not_found(text(Message::NotFound(operation))),
            other => AppError::internal(text(Message::Failed(operation)), other),
        }
    }

    fn payload(
        &self,
        payload: Result<Json<BookPayload>, JsonRejection>,
    ) -> Result<BookPayload, AppError> {
        payload.map(|Json(payload)| payload).map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "rejected book payload");
            AppError::bad_request(self.messages.text(Message::InvalidPayload))
        })
    }
}

pub async fn add_book(
    State(state): State<BooksState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<BookIdData>), AppError> {
    let payload = state.payload(payload)?;
    let book_id = state
        .service
        .add(payload)
        .await
        .map_err(|err| state.error(Operation::Add, err))?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            state.messages.text(Message::Succeeded(Operation::Add)),
            BookIdData { book_id },
        ),
    ))
}

pub async fn list_books(
    State(state): State<BooksState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResponse<BooksData> {
    // Listing has no error path: an unreadable query string means no filters.
    let query = match query {
        Ok(Query(pairs)) => ListQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "ignoring unreadable list query");
            ListQuery::default()
        }
    };
    let filter = ListFilter::from(query);
    let books = state.service.list(&filter).await;
    ApiResponse::success(BooksData { books })
}

pub async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<BookData>, AppError> {
    let book = state.service.get(&id).await.map_err(|err| match err {
        BookError::NotFound(_) => AppError::not_found(state.messages.text(Message::BookNotFound)),
        other => AppError::from(anyhow::Error::from(other)),
    })?;

    Ok(ApiResponse::success(BookData { book }))
}

pub async fn edit_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<BookIdData>, AppError> {
    let payload = state.payload(payload)?;
    let book = state
        .service
        .edit(&id, payload)
        .await
        .map_err(|err| state.error(Operation::Update, err))?;

    Ok(ApiResponse::with_message(
        state.messages.text(Message::Succeeded(Operation::Update)),
        BookIdData { book_id: book.id },
    ))
}

pub async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<BookIdData>, AppError> {
    let book = state
        .service
        .delete(&id)
        .await
        .map_err(|err| state.error(Operation::Delete, err))?;

    Ok(ApiResponse::with_message(
        state.messages.text(Message::Succeeded(Operation::Delete)),
        BookIdData { book_id: book.id },
    ))
}
