use crate::schema::books;
use diesel::prelude::*;

// To query data from the database
#[derive(Debug, Clone, Queryable, Selectable, Default)]
#[diesel(table_name = books)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub year: Option<i16>,
    pub publisher: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}

// To insert a new book into the database
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub struct NewBook<'a> {
    pub isbn: &'a str,
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub year: Option<i16>,
    pub publisher: Option<&'a str>,
    pub small: Option<&'a str>,
    pub medium: Option<&'a str>,
    pub large: Option<&'a str>,
}

impl<'a> From<&'a controller::NewBook> for NewBook<'a> {
    fn from(book: &'a controller::NewBook) -> Self {
        Self {
            isbn: &book.isbn,
            title: &book.title,
            author: book.author.as_deref(),
            year: book.year,
            publisher: book.publisher.as_deref(),
            small: None,
            medium: None,
            large: None,
        }
    }
}
