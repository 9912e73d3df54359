pub mod error;
pub mod models;
pub mod repo;
pub mod schema;

use crate::models::books::NewBook;
use crate::models::ratings::NewRating;
use crate::models::users::NewUser;
use anyhow::Error;
use config::Config;
use controller::{
    normalize, AuthorAverage, AuthorBook, AuthorCount, BookAverage, BookCount, Controller,
    TopReviewer,
};
use diesel::pg::PgConnection;
use diesel::prelude::*;

pub fn establish_connection(url: &str) -> Result<PgConnection, Error> {
    Ok(PgConnection::establish(url)?)
}

/// Create every table, in foreign key order
pub fn create_schema(conn: &mut PgConnection) -> QueryResult<()> {
    repo::users::create_table(conn)?;
    repo::books::create_table(conn)?;
    repo::ratings::create_table(conn)?;

    log::info!("Schema ready");
    Ok(())
}

/// Drop every table, ratings first since they reference the others
pub fn drop_schema(conn: &mut PgConnection) -> QueryResult<()> {
    repo::ratings::drop_table(conn)?;
    repo::books::drop_table(conn)?;
    repo::users::drop_table(conn)?;

    log::info!("Schema dropped");
    Ok(())
}

fn non_empty<T>(rows: Vec<T>) -> Option<Vec<T>> {
    if rows.is_empty() {
        None
    } else {
        Some(rows)
    }
}

pub struct BooksController {
    pg_conn: PgConnection,
}

impl BooksController {
    pub fn with_url(url: &str) -> Result<Self, Error> {
        let pg_conn = establish_connection(url)?;
        Ok(Self { pg_conn })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::with_url(config.database_url()?)
    }

}

impl Controller for BooksController {
    fn title_by_isbn(&mut self, isbn: &str) -> Result<Option<String>, Error> {
        let book = repo::books::find(&mut self.pg_conn, isbn)?;
        Ok(book.map(|book| book.title))
    }

    fn books_by_author(&mut self, author: &str) -> Result<Option<Vec<AuthorBook>>, Error> {
        let term = normalize(author);
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }

        let rows = repo::books::by_author(&mut self.pg_conn, term)?;
        Ok(non_empty(rows.into_iter().map(Into::into).collect()))
    }

    fn avg_rating_by_author(&mut self, author: &str) -> Result<Option<AuthorAverage>, Error> {
        let term = normalize(author);
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }

        let row = repo::ratings::avg_by_author(&mut self.pg_conn, term)?;
        Ok(row.map(Into::into))
    }

    fn avg_rating_by_book(
        &mut self,
        title: &str,
        author: &str,
    ) -> Result<Option<Vec<BookAverage>>, Error> {
        let (title, author) = (normalize(title), normalize(author));
        let (title, author) = (title.trim(), author.trim());
        if title.is_empty() || author.is_empty() {
            return Ok(None);
        }

        let rows = repo::ratings::avg_by_book(&mut self.pg_conn, title, author)?;
        Ok(non_empty(rows.into_iter().map(Into::into).collect()))
    }

    fn top_reviewer_avg(&mut self) -> Result<Option<TopReviewer>, Error> {
        let row = repo::ratings::top_reviewer(&mut self.pg_conn)?;
        Ok(row.map(Into::into))
    }

    fn top_authors(&mut self, n: u32) -> Result<Vec<AuthorCount>, Error> {
        let rows = repo::books::top_authors(&mut self.pg_conn, n)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn top_books(&mut self, n: u32) -> Result<Vec<BookCount>, Error> {
        let rows = repo::ratings::top_books(&mut self.pg_conn, n)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    // Each insert gets its own transaction, so it commits on its own and a
    // failure rolls back only itself

    fn insert_book(&mut self, book: &controller::NewBook) -> Result<(), Error> {
        let book = NewBook::from(book);
        self.pg_conn
            .transaction(|conn| repo::books::insert(conn, &book))
    }

    fn insert_user(&mut self, user: &controller::NewUser) -> Result<(), Error> {
        let user = NewUser::from(user);
        self.pg_conn
            .transaction(|conn| repo::users::insert(conn, &user))
    }

    fn insert_rating(&mut self, rating: &controller::NewRating) -> Result<(), Error> {
        let rating = NewRating::from(rating);
        self.pg_conn
            .transaction(|conn| repo::ratings::insert(conn, &rating))
    }
}
