// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod error;
pub mod normalize;
pub mod pager;
pub mod records;
pub mod table;
pub mod values;

use anyhow::Error;

pub use normalize::normalize;
pub use pager::{acknowledger, Acknowledge, EnterToContinue, NoPause, Pager};
pub use records::{
    AuthorAverage, AuthorBook, AuthorCount, BookAverage, BookCount, NewBook, NewRating, NewUser,
    Record, TopReviewer,
};
pub use table::{render_lines, ToTable};
pub use values::{Field, Prototype, Type, Value};

pub type Result<T> = std::result::Result<T, Error>;

/// The catalog of queries the console can run.
///
/// `Ok(None)` means the query ran fine but matched nothing, errors are kept
/// for failures. Free-text arguments are matched after [`normalize`].
pub trait Controller {
    /// Title of the book with exactly this isbn (surrounding whitespace ignored)
    fn title_by_isbn(&mut self, isbn: &str) -> Result<Option<String>>;

    /// Books whose author contains `author`, case and punctuation insensitive
    fn books_by_author(&mut self, author: &str) -> Result<Option<Vec<AuthorBook>>>;

    /// Average rating over every rating of the author's books, together with
    /// how many books the author has
    fn avg_rating_by_author(&mut self, author: &str) -> Result<Option<AuthorAverage>>;

    /// Average rating of the books matching both title and author, one row per
    /// (title, author) pair
    fn avg_rating_by_book(&mut self, title: &str, author: &str)
        -> Result<Option<Vec<BookAverage>>>;

    /// Average rating given by the user with the most ratings
    fn top_reviewer_avg(&mut self) -> Result<Option<TopReviewer>>;

    /// At most `n` authors, ordered by number of books, descending
    fn top_authors(&mut self, n: u32) -> Result<Vec<AuthorCount>>;

    /// At most `n` books, ordered by number of ratings, descending
    fn top_books(&mut self, n: u32) -> Result<Vec<BookCount>>;

    fn insert_book(&mut self, book: &NewBook) -> Result<()>;

    fn insert_user(&mut self, user: &NewUser) -> Result<()>;

    /// Ratings aren't unique, the same user may rate a book more than once
    fn insert_rating(&mut self, rating: &NewRating) -> Result<()>;
}
