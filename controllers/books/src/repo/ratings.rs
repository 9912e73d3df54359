use crate::error::from_diesel;
use crate::models::ratings::NewRating;
use crate::models::reports::{AuthorAverageRow, BookAverageRow, BookCountRow, TopReviewerRow};
use crate::schema::ratings;
use anyhow::Error;
use controller::normalize::normalized_column;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};

// No uniqueness on purpose, a user may rate the same book several times
pub const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS ratings (
        user_id     integer NOT NULL
            CONSTRAINT fk_ratings_user_id REFERENCES users,
        isbn        varchar(10) NOT NULL
            CONSTRAINT fk_ratings_isbn REFERENCES books,
        book_rating integer NOT NULL
    )
"#;

pub const DROP_TABLE: &str = "DROP TABLE IF EXISTS ratings";

pub fn create_table(conn: &mut PgConnection) -> QueryResult<()> {
    sql_query(CREATE_TABLE).execute(conn)?;
    Ok(())
}

pub fn drop_table(conn: &mut PgConnection) -> QueryResult<()> {
    sql_query(DROP_TABLE).execute(conn)?;
    Ok(())
}

/// Average over every rating of the books written by `author` (normalized),
/// no row when the author has no ratings
pub fn avg_by_author(
    conn: &mut PgConnection,
    author: &str,
) -> QueryResult<Option<AuthorAverageRow>> {
    let query = format!(
        "WITH author_books AS ( \
             SELECT isbn FROM books WHERE {} ILIKE $1 \
         ) \
         SELECT round(avg(r.book_rating), 1)::float8 AS avg_rating, \
                (SELECT count(*) FROM author_books) AS book_count \
         FROM ratings r \
         JOIN author_books b ON b.isbn = r.isbn \
         HAVING count(*) > 0",
        normalized_column("author")
    );

    log::debug!("Average rating by author ({})", author);
    sql_query(query)
        .bind::<Text, _>(author)
        .get_result(conn)
        .optional()
}

pub fn avg_by_book(
    conn: &mut PgConnection,
    title: &str,
    author: &str,
) -> QueryResult<Vec<BookAverageRow>> {
    let query = format!(
        "SELECT round(avg(r.book_rating), 1)::float8 AS avg_rating, b.title, b.author \
         FROM books b \
         JOIN ratings r ON r.isbn = b.isbn \
         WHERE {} ILIKE $1 AND {} ILIKE $2 \
         GROUP BY b.title, b.author \
         ORDER BY b.title, b.author",
        normalized_column("b.title"),
        normalized_column("b.author")
    );

    log::debug!("Average rating of '{}' by {}", title, author);
    sql_query(query)
        .bind::<Text, _>(title)
        .bind::<Text, _>(author)
        .load(conn)
}

/// The user with the most ratings, ties are left to the database
pub fn top_reviewer(conn: &mut PgConnection) -> QueryResult<Option<TopReviewerRow>> {
    let query = "WITH top_reviewer AS ( \
                     SELECT user_id, count(*) AS reviews \
                     FROM ratings \
                     GROUP BY user_id \
                     ORDER BY reviews DESC \
                     LIMIT 1 \
                 ) \
                 SELECT t.user_id, t.reviews, round(avg(r.book_rating), 1)::float8 AS avg_rating \
                 FROM top_reviewer t \
                 JOIN ratings r ON r.user_id = t.user_id \
                 GROUP BY t.user_id, t.reviews";

    log::debug!("Average rating of the top reviewer");
    sql_query(query).get_result(conn).optional()
}

pub fn top_books(conn: &mut PgConnection, n: u32) -> QueryResult<Vec<BookCountRow>> {
    let query = "SELECT b.title, b.author, count(*) AS ratings \
                 FROM books b \
                 JOIN ratings r ON r.isbn = b.isbn \
                 GROUP BY b.title, b.author \
                 ORDER BY ratings DESC \
                 LIMIT $1";

    log::debug!("Top {} books", n);
    sql_query(query).bind::<BigInt, _>(i64::from(n)).load(conn)
}

pub fn insert(conn: &mut PgConnection, rating: &NewRating) -> Result<(), Error> {
    diesel::insert_into(ratings::table)
        .values(rating)
        .execute(conn)
        .map_err(from_diesel)?;

    log::debug!("Inserted rating of {} by {}", rating.isbn, rating.user_id);
    Ok(())
}

pub fn insert_many(conn: &mut PgConnection, ratings: &[NewRating]) -> QueryResult<usize> {
    diesel::insert_into(ratings::table).values(ratings).execute(conn)
}
