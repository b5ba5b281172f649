use crate::schema::{authors, books};
use diesel::{Insertable, Queryable, Selectable};
use serde::Serialize;

/// Represents an author in the database
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = authors)]
pub struct Author {
    /// Store-assigned identifier
    pub id: i32,
    /// Display name of the author
    pub name: String,
    /// Optional biography
    pub bio: Option<String>,
}

/// Insertable form of an author, before the store assigns an id
#[derive(Debug, Insertable)]
#[diesel(table_name = authors)]
pub struct NewAuthor<'a> {
    pub name: &'a str,
    pub bio: Option<&'a str>,
}

/// Represents a book in the database
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = books)]
pub struct Book {
    /// Store-assigned identifier
    pub id: i32,
    /// Reference to the owning author. Not checked against `authors` on insert.
    pub author_id: i32,
    /// Title of the book
    pub title: String,
    /// Optional description or blurb
    pub description: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = books)]
pub struct NewBook<'a> {
    pub author_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
}
