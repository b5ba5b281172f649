use crate::api::errors::{api_error, ApiError};
use crate::db::{Author, AuthorRepository, Book, BookRepository, Database, DEFAULT_LIMIT};
use axum::http::StatusCode;
use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;
use tracing::info;

/// Offset/limit query parameters shared by every list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    /// Rows to skip
    #[serde(default)]
    pub offset: Option<u32>,
    /// Older name for `offset`. `offset` wins when both are sent.
    #[serde(default)]
    pub skip: Option<u32>,
    /// Maximum rows to return
    #[serde(default)]
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        self.offset.or(self.skip).unwrap_or(0).into()
    }

    pub fn limit(&self) -> i64 {
        self.limit.map(i64::from).unwrap_or(DEFAULT_LIMIT)
    }
}

/// Query parameters for `/books/by_author/`
#[derive(Debug, Deserialize)]
pub struct ByAuthorQuery {
    #[serde(default)]
    pub author_id: Option<i32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ByAuthorQuery {
    fn page(&self) -> Pagination {
        Pagination {
            offset: self.offset,
            skip: self.skip,
            limit: self.limit,
        }
    }
}

/// Request payload for creating an author
#[derive(Debug, Deserialize)]
pub struct CreateAuthorRequest {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Request payload for creating a book
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub author_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Lists authors one page at a time
#[axum::debug_handler]
pub async fn list_authors(
    Query(page): Query<Pagination>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<Author>>, ApiError> {
    let mut conn = database.get_conn()?;
    let authors = AuthorRepository::new(&mut conn)
        .list_authors(page.offset(), page.limit())?;
    Ok(Json(authors))
}

/// Retrieves a single author, 404 when the id is unknown
#[axum::debug_handler]
pub async fn get_author(
    Path(id): Path<i32>,
    Extension(database): Extension<Database>,
) -> Result<Json<Author>, ApiError> {
    let mut conn = database.get_conn()?;
    let mut repo = AuthorRepository::new(&mut conn);

    match repo.get_author(id)? {
        Some(author) => Ok(Json(author)),
        None => Err(api_error(StatusCode::NOT_FOUND, "Author not found")),
    }
}

/// Creates a new author
///
/// # Returns
/// * `Result<Json<Author>, ApiError>` - The stored author, id included
#[axum::debug_handler]
pub async fn create_author(
    Extension(database): Extension<Database>,
    Json(payload): Json<CreateAuthorRequest>,
) -> Result<Json<Author>, ApiError> {
    let mut conn = database.get_conn()?;
    let author = AuthorRepository::new(&mut conn)
        .create_author(&payload.name, payload.bio.as_deref())?;

    info!("Created author {}", author.id);
    Ok(Json(author))
}

#[axum::debug_handler]
pub async fn list_books(
    Query(page): Query<Pagination>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let mut conn = database.get_conn()?;
    let books = BookRepository::new(&mut conn).list_books(page.offset(), page.limit())?;
    Ok(Json(books))
}

/// Lists the books of one author
///
/// A missing `author_id` matches nothing, so the store is not queried at all.
#[axum::debug_handler]
pub async fn list_books_by_author(
    Query(query): Query<ByAuthorQuery>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let Some(author_id) = query.author_id else {
        return Ok(Json(Vec::new()));
    };

    let page = query.page();
    let mut conn = database.get_conn()?;
    let books = BookRepository::new(&mut conn).list_books_by_author(
        author_id,
        page.offset(),
        page.limit(),
    )?;
    Ok(Json(books))
}

/// Creates a new book. The author id is stored as given.
#[axum::debug_handler]
pub async fn create_book(
    Extension(database): Extension<Database>,
    Json(payload): Json<CreateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    let mut conn = database.get_conn()?;
    let book = BookRepository::new(&mut conn).create_book(
        payload.author_id,
        &payload.title,
        payload.description.as_deref(),
    )?;

    info!("Created book {} for author {}", book.id, book.author_id);
    Ok(Json(book))
}
