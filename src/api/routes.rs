//! API routes configuration module

use crate::api::handlers::{
    create_author, create_book, get_author, list_authors, list_books, list_books_by_author,
};
use crate::db::Database;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `database` - Connection pool shared across handlers; each handler checks out
///   its own connection for the length of the request
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and middleware
pub fn app(database: Database) -> Router {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route("/authors/", get(list_authors).post(create_author))
        .route("/authors/:id", get(get_author))
        .route("/books", get(list_books).post(create_book))
        .route("/books/", get(list_books).post(create_book))
        .route("/books/by_author", get(list_books_by_author))
        .route("/books/by_author/", get(list_books_by_author))
        .layer(Extension(database))
        .layer(TraceLayer::new_for_http())
}
