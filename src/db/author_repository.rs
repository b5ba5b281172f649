use crate::db::models::{Author, NewAuthor};
use crate::errors::Error;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Repository for author records
pub struct AuthorRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> AuthorRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        AuthorRepository { conn }
    }

    /// Lists authors in id order, skipping `offset` rows and returning at most `limit`
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn list_authors(&mut self, offset: i64, limit: i64) -> Result<Vec<Author>, Error> {
        use crate::schema::authors::dsl::*;

        let found = authors
            .order_by(id.asc())
            .offset(offset)
            .limit(limit)
            .select(Author::as_select())
            .load(self.conn)?;

        Ok(found)
    }

    /// Retrieves a single author by id, `None` when no such row exists
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn get_author(&mut self, author_id: i32) -> Result<Option<Author>, Error> {
        use crate::schema::authors::dsl::*;

        let found = authors
            .filter(id.eq(author_id))
            .select(Author::as_select())
            .first(self.conn)
            .optional()?;

        Ok(found)
    }

    /// Inserts a new author and returns the stored row with its assigned id
    ///
    /// # Arguments
    ///
    /// * `name` - Author's display name
    /// * `bio` - Optional biography
    ///
    /// # Errors
    ///
    /// Returns an Error if the store rejects the write
    pub fn create_author(&mut self, name: &str, bio: Option<&str>) -> Result<Author, Error> {
        use crate::schema::authors;

        let created = diesel::insert_into(authors::table)
            .values(&NewAuthor { name, bio })
            .returning(Author::as_returning())
            .get_result(self.conn)?;

        Ok(created)
    }
}
