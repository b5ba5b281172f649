use crate::db::models::{Book, NewBook};
use crate::errors::Error;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Repository for book records
pub struct BookRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> BookRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        BookRepository { conn }
    }

    /// Lists all books in id order, skipping `offset` rows and returning at most `limit`
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn list_books(&mut self, offset: i64, limit: i64) -> Result<Vec<Book>, Error> {
        use crate::schema::books::dsl::*;

        let found = books
            .order_by(id.asc())
            .offset(offset)
            .limit(limit)
            .select(Book::as_select())
            .load(self.conn)?;

        Ok(found)
    }

    /// Lists the books of one author. An unknown `the_author_id` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn list_books_by_author(
        &mut self,
        the_author_id: i32,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Book>, Error> {
        use crate::schema::books::dsl::*;

        let found = books
            .filter(author_id.eq(the_author_id))
            .order_by(id.asc())
            .offset(offset)
            .limit(limit)
            .select(Book::as_select())
            .load(self.conn)?;

        Ok(found)
    }

    /// Inserts a new book and returns the stored row with its assigned id
    ///
    /// The referenced author is not looked up first; only the store schema can reject it.
    ///
    /// # Arguments
    ///
    /// * `author_id` - Id of the owning author
    /// * `title` - Book title
    /// * `description` - Optional description
    ///
    /// # Errors
    ///
    /// Returns an Error if the store rejects the write
    pub fn create_book(
        &mut self,
        author_id: i32,
        title: &str,
        description: Option<&str>,
    ) -> Result<Book, Error> {
        use crate::schema::books;

        let created = diesel::insert_into(books::table)
            .values(&NewBook {
                author_id,
                title,
                description,
            })
            .returning(Book::as_returning())
            .get_result(self.conn)?;

        Ok(created)
    }
}
