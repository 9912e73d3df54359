use crate::error::from_diesel;
use crate::models::books::{Book, NewBook};
use crate::models::reports::{AuthorBookRow, AuthorCountRow};
use crate::schema::books;
use anyhow::Error;
use controller::normalize::normalized_column;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};

pub const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        isbn      varchar(10) PRIMARY KEY,
        title     text NOT NULL,
        author    text,
        year      smallint CHECK (year BETWEEN 0 AND 9999),
        publisher text,
        small     text,
        medium    text,
        large     text
    )
"#;

pub const DROP_TABLE: &str = "DROP TABLE IF EXISTS books";

pub fn create_table(conn: &mut PgConnection) -> QueryResult<()> {
    sql_query(CREATE_TABLE).execute(conn)?;
    Ok(())
}

pub fn drop_table(conn: &mut PgConnection) -> QueryResult<()> {
    sql_query(DROP_TABLE).execute(conn)?;
    Ok(())
}

/// Exact isbn lookup, surrounding whitespace is ignored
pub fn find(conn: &mut PgConnection, isbn: &str) -> QueryResult<Option<Book>> {
    books::table
        .find(isbn.trim())
        .select(Book::as_select())
        .first(conn)
        .optional()
}

/// Books whose normalized author contains `term`, `term` must already be
/// normalized
pub fn by_author(conn: &mut PgConnection, term: &str) -> QueryResult<Vec<AuthorBookRow>> {
    let query = format!(
        "SELECT title, year, publisher, isbn \
         FROM books \
         WHERE {} ILIKE '%' || $1 || '%' \
         ORDER BY title, isbn",
        normalized_column("author")
    );

    log::debug!("Books by author ({})", term);
    sql_query(query).bind::<Text, _>(term).load(conn)
}

pub fn top_authors(conn: &mut PgConnection, n: u32) -> QueryResult<Vec<AuthorCountRow>> {
    let query = "SELECT author, count(*) AS books \
                 FROM books \
                 GROUP BY author \
                 ORDER BY books DESC \
                 LIMIT $1";

    log::debug!("Top {} authors", n);
    sql_query(query).bind::<BigInt, _>(i64::from(n)).load(conn)
}

pub fn insert(conn: &mut PgConnection, book: &NewBook) -> Result<(), Error> {
    diesel::insert_into(books::table)
        .values(book)
        .execute(conn)
        .map_err(from_diesel)?;

    log::debug!("Inserted book {}", book.isbn);
    Ok(())
}

/// Insert many rows at once, used by the bulk loader
pub fn insert_many(conn: &mut PgConnection, books: &[NewBook]) -> QueryResult<usize> {
    diesel::insert_into(books::table).values(books).execute(conn)
}

pub fn isbns(conn: &mut PgConnection) -> QueryResult<Vec<String>> {
    books::table.select(books::isbn).load(conn)
}
