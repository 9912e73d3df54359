//! Rows produced by the hand written report queries

use controller::{AuthorAverage, AuthorBook, AuthorCount, BookAverage, BookCount, TopReviewer};
use diesel::sql_types::{BigInt, Double, Integer, Nullable, SmallInt, Text, Varchar};
use diesel::QueryableByName;

#[derive(Debug, Clone, QueryableByName)]
pub struct AuthorBookRow {
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Nullable<SmallInt>)]
    pub year: Option<i16>,
    #[diesel(sql_type = Nullable<Text>)]
    pub publisher: Option<String>,
    #[diesel(sql_type = Varchar)]
    pub isbn: String,
}

impl From<AuthorBookRow> for AuthorBook {
    fn from(row: AuthorBookRow) -> Self {
        Self {
            title: row.title,
            year: row.year,
            publisher: row.publisher,
            isbn: row.isbn,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub struct AuthorAverageRow {
    #[diesel(sql_type = Double)]
    pub avg_rating: f64,
    #[diesel(sql_type = BigInt)]
    pub book_count: i64,
}

impl From<AuthorAverageRow> for AuthorAverage {
    fn from(row: AuthorAverageRow) -> Self {
        Self {
            avg_rating: row.avg_rating,
            book_count: row.book_count,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub struct BookAverageRow {
    #[diesel(sql_type = Double)]
    pub avg_rating: f64,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub author: Option<String>,
}

impl From<BookAverageRow> for BookAverage {
    fn from(row: BookAverageRow) -> Self {
        Self {
            avg_rating: row.avg_rating,
            title: row.title,
            author: row.author,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub struct TopReviewerRow {
    #[diesel(sql_type = Integer)]
    pub user_id: i32,
    #[diesel(sql_type = BigInt)]
    pub reviews: i64,
    #[diesel(sql_type = Double)]
    pub avg_rating: f64,
}

impl From<TopReviewerRow> for TopReviewer {
    fn from(row: TopReviewerRow) -> Self {
        Self {
            user_id: row.user_id,
            reviews: row.reviews,
            avg_rating: row.avg_rating,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub struct AuthorCountRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub author: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub books: i64,
}

impl From<AuthorCountRow> for AuthorCount {
    fn from(row: AuthorCountRow) -> Self {
        Self {
            author: row.author,
            books: row.books,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub struct BookCountRow {
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub author: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub ratings: i64,
}

impl From<BookCountRow> for BookCount {
    fn from(row: BookCountRow) -> Self {
        Self {
            title: row.title,
            author: row.author,
            ratings: row.ratings,
        }
    }
}
