pub mod filter;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod service;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use shelf_kernel::{settings::Settings, InitCtx, Module};

use crate::utils::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
use handlers::BooksState;
use messages::Messages;
use service::BookService;

/// In-memory bookshelf: add, list, fetch, edit, and delete books.
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(service: Arc<BookService>, messages: Messages) -> Self {
        Self {
            state: BooksState { service, messages },
        }
    }

    /// Module wired to the wall clock and random ids.
    pub fn from_settings(settings: &Settings) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ids: Arc<dyn IdGenerator> =
            Arc::new(RandomIdGenerator::new(settings.books.id_length));
        Self::new(
            Arc::new(BookService::new(clock, ids)),
            Messages::new(settings.books.locale),
        )
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            locale = ?self.state.messages.locale(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::list_books).post(handlers::add_book))
            .route(
                "/{id}",
                get(handlers::get_book)
                    .put(handlers::edit_book)
                    .delete(handlers::delete_book),
            )
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let remaining = self.state.service.count().await;
        tracing::info!(
            module = self.name(),
            discarded_books = remaining,
            "books module stopped"
        );
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(settings: &Settings) -> Arc<dyn Module> {
    Arc::new(BooksModule::from_settings(settings))
}

fn error_response(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn success_response(description: &str, data_schema: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "string", "enum": ["success"] },
                        "message": { "type": "string" },
                        "data": data_schema
                    },
                    "required": ["status", "data"]
                }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book_id_data = serde_json::json!({
        "type": "object",
        "properties": { "bookId": { "type": "string" } },
        "required": ["bookId"]
    });
    let id_param = serde_json::json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    });
    let flag_param = |name: &str, description: &str| {
        serde_json::json!({
            "name": name,
            "in": "query",
            "required": false,
            "description": description,
            "schema": { "type": "string" }
        })
    };
    let payload_body = serde_json::json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    });

    serde_json::json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "parameters": [
                        flag_param("name", "Case-insensitive substring of the book name"),
                        flag_param("reading", "`1` for books being read, any other value for the rest"),
                        flag_param("finished", "`1` for finished books, any other value for the rest")
                    ],
                    "responses": {
                        "200": success_response("Matching books", serde_json::json!({
                            "type": "object",
                            "properties": {
                                "books": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/BookSummary" }
                                }
                            }
                        }))
                    }
                },
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": payload_body.clone(),
                    "responses": {
                        "201": success_response("Book added", book_id_data.clone()),
                        "400": error_response("Missing name or readPage greater than pageCount"),
                        "500": error_response("Book could not be added")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a book by id",
                    "tags": ["Books"],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": success_response("The book", serde_json::json!({
                            "type": "object",
                            "properties": { "book": { "$ref": "#/components/schemas/Book" } }
                        })),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Edit a book",
                    "tags": ["Books"],
                    "parameters": [id_param.clone()],
                    "requestBody": payload_body,
                    "responses": {
                        "200": success_response("Book updated", book_id_data.clone()),
                        "400": error_response("Missing name or readPage greater than pageCount"),
                        "404": error_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [id_param],
                    "responses": {
                        "200": success_response("Book deleted", book_id_data),
                        "404": error_response("Book not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer" },
                        "readPage": { "type": "integer" },
                        "finished": { "type": "boolean" },
                        "reading": { "type": "boolean" },
                        "insertedAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": [
                        "id", "name", "year", "author", "summary", "publisher", "pageCount",
                        "readPage", "finished", "reading", "insertedAt", "updatedAt"
                    ]
                },
                "BookPayload": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer" },
                        "readPage": { "type": "integer" },
                        "reading": { "type": "boolean" }
                    },
                    "required": ["name"]
                },
                "BookSummary": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "publisher": { "type": "string" }
                    },
                    "required": ["id", "name", "publisher"]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{ConstantId, FixedClock, SequentialIds};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use shelf_kernel::settings::Locale;
    use tower::ServiceExt;

    fn module(locale: Locale) -> BooksModule {
        let service = BookService::new(
            Arc::new(FixedClock::new(&[
                "2024-01-01T00:00:00.000Z",
                "2024-01-02T00:00:00.000Z",
            ])),
            Arc::new(SequentialIds::default()),
        );
        BooksModule::new(Arc::new(service), Messages::new(locale))
    }

    fn app() -> Router {
        Router::new().nest("/books", module(Locale::En).routes())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn book_a() -> Value {
        json!({
            "name": "A",
            "year": 2020,
            "author": "X",
            "summary": "s",
            "publisher": "P",
            "pageCount": 100,
            "readPage": 100,
            "reading": false
        })
    }

    #[tokio::test]
    async fn add_returns_created_and_book_is_retrievable() {
        let app = app();

        let (status, body) = send(&app, "POST", "/books", Some(book_a())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Book added successfully");
        let id = body["data"]["bookId"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "GET", &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        let book = &body["data"]["book"];
        assert_eq!(book["id"], id.as_str());
        assert_eq!(book["finished"], true);
        assert_eq!(book["insertedAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(book["updatedAt"], "2024-01-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn add_rejects_read_page_over_page_count() {
        let app = app();
        let payload = json!({"name": "B", "pageCount": 50, "readPage": 60});

        let (status, body) = send(&app, "POST", "/books", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert_eq!(
            body["message"],
            "Failed to add book. readPage must not be greater than pageCount"
        );

        let (_, body) = send(&app, "GET", "/books", None).await;
        assert_eq!(body["data"]["books"], json!([]));
    }

    #[tokio::test]
    async fn add_rejects_missing_name() {
        let app = app();
        let payload = json!({"pageCount": 50, "readPage": 60});

        let (status, body) = send(&app, "POST", "/books", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Failed to add book. Please fill in the book name"
        );
    }

    #[tokio::test]
    async fn malformed_payload_is_a_fail_response() {
        let app = app();
        let payload = json!({"name": "A", "pageCount": "many"});

        let (status, body) = send(&app, "POST", "/books", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Invalid request payload");
    }

    #[tokio::test]
    async fn list_projects_and_filters() {
        let app = app();
        send(&app, "POST", "/books", Some(book_a())).await;
        send(
            &app,
            "POST",
            "/books",
            Some(json!({"name": "Foo Bar", "publisher": "Q", "pageCount": 10, "readPage": 2, "reading": true})),
        )
        .await;

        let (status, body) = send(&app, "GET", "/books", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "success",
                "data": {
                    "books": [
                        {"id": "book-0", "name": "A", "publisher": "P"},
                        {"id": "book-1", "name": "Foo Bar", "publisher": "Q"}
                    ]
                }
            })
        );

        let (_, body) = send(&app, "GET", "/books?name=foo", None).await;
        assert_eq!(body["data"]["books"][0]["name"], "Foo Bar");
        assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

        let (_, body) = send(&app, "GET", "/books?reading=1", None).await;
        assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

        let (_, body) = send(&app, "GET", "/books?finished=1&reading=1", None).await;
        assert_eq!(body["data"]["books"], json!([]));
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let (status, body) = send(&app(), "GET", "/books/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": "fail", "message": "Book not found"}));
    }

    #[tokio::test]
    async fn edit_updates_fields_and_keeps_identity() {
        let app = app();
        send(&app, "POST", "/books", Some(book_a())).await;

        let mut changed = book_a();
        changed["name"] = json!("A, second edition");
        changed["readPage"] = json!(20);
        let (status, body) = send(&app, "PUT", "/books/book-0", Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Book updated successfully");
        assert_eq!(body["data"]["bookId"], "book-0");

        let (_, body) = send(&app, "GET", "/books/book-0", None).await;
        let book = &body["data"]["book"];
        assert_eq!(book["name"], "A, second edition");
        assert_eq!(book["finished"], false);
        assert_eq!(book["insertedAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(book["updatedAt"], "2024-01-02T00:00:00.000Z");
    }

    #[tokio::test]
    async fn edit_errors() {
        let app = app();

        let (status, body) = send(&app, "PUT", "/books/nope", Some(json!({"year": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Failed to update book. Please fill in the book name"
        );

        let (status, body) = send(&app, "PUT", "/books/nope", Some(book_a())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Failed to update book. Id not found");
    }

    #[tokio::test]
    async fn rejected_edit_leaves_existing_book_untouched() {
        let app = app();
        send(&app, "POST", "/books", Some(book_a())).await;
        let (_, before) = send(&app, "GET", "/books/book-0", None).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/books/book-0",
            Some(json!({"name": "Z", "pageCount": 1, "readPage": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert_eq!(
            body["message"],
            "Failed to update book. readPage must not be greater than pageCount"
        );

        let (status, body) = send(&app, "PUT", "/books/book-0", Some(json!({"pageCount": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Failed to update book. Please fill in the book name"
        );

        let (_, after) = send(&app, "GET", "/books/book-0", None).await;
        assert_eq!(after, before);
        assert_eq!(after["data"]["book"]["name"], "A");
    }

    #[tokio::test]
    async fn id_collision_is_an_internal_error() {
        let service = BookService::new(
            Arc::new(FixedClock::new(&["2024-01-01T00:00:00.000Z"])),
            Arc::new(ConstantId("same")),
        );
        let app = Router::new().nest(
            "/books",
            BooksModule::new(Arc::new(service), Messages::new(Locale::En)).routes(),
        );

        let (status, _) = send(&app, "POST", "/books", Some(book_a())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "POST", "/books", Some(book_a())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Failed to add book"})
        );

        let (_, body) = send(&app, "GET", "/books", None).await;
        assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn repeated_query_keys_still_list() {
        let app = app();
        send(&app, "POST", "/books", Some(book_a())).await;

        let (status, body) = send(&app, "GET", "/books?name=a&name=b", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["books"][0]["id"], "book-0");

        let (status, body) = send(&app, "GET", "/books?reading=1&reading=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["books"], json!([]));
    }

    #[tokio::test]
    async fn delete_removes_book() {
        let app = app();
        send(&app, "POST", "/books", Some(book_a())).await;

        let (status, body) = send(&app, "DELETE", "/books/book-0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Book deleted successfully");
        assert_eq!(body["data"]["bookId"], "book-0");

        let (status, _) = send(&app, "GET", "/books/book-0", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "DELETE", "/books/book-0", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Failed to delete book. Id not found");
    }

    #[tokio::test]
    async fn indonesian_locale_changes_messages() {
        let app = Router::new().nest("/books", module(Locale::Id).routes());

        let (_, body) = send(&app, "GET", "/books/nope", None).await;
        assert_eq!(body["message"], "Buku tidak ditemukan");
    }

    #[test]
    fn openapi_fragment_describes_both_paths() {
        let spec = openapi_fragment();
        assert!(spec["paths"]["/"]["post"].is_object());
        assert!(spec["paths"]["/{id}"]["delete"].is_object());
        assert!(spec["components"]["schemas"]["Book"].is_object());
    }
}
