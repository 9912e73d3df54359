// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::parser::MenuOption;
use anyhow::Error;
use controller::error::ErrorKind;
use controller::{render_lines, Controller, Field, NewBook, NewRating, NewUser, Prototype, Type};

/// Everything needed to run one menu option
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    TitleByIsbn(String),
    BooksByAuthor(String),
    AuthorAverage(String),
    BookAverage { title: String, author: String },
    TopReviewer,
    InsertUser(NewUser),
    InsertBook(NewBook),
    InsertReview(NewRating),
    TopAuthors(u32),
    TopBooks(u32),
}

/// What to show the operator once a request ran
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Message(String),
    Table(Vec<String>),
}

/// Fields the operator has to fill in for `option`
pub fn fields_for(option: MenuOption) -> Vec<Field<'static>> {
    match option {
        MenuOption::TitleByIsbn => vec![Field::Required("isbn", Type::String)],
        MenuOption::BooksByAuthor | MenuOption::AuthorAverage => {
            vec![Field::Required("author", Type::String)]
        }
        MenuOption::BookAverage => vec![
            Field::Required("title", Type::String),
            Field::Required("author", Type::String),
        ],
        MenuOption::InsertUser => NewUser::fields(),
        MenuOption::InsertBook => NewBook::fields(),
        MenuOption::InsertReview => NewRating::fields(),
        MenuOption::TopAuthors => vec![Field::Required("number of authors", Type::Count)],
        MenuOption::TopBooks => vec![Field::Required("number of books", Type::Count)],
        MenuOption::TopReviewer | MenuOption::Help | MenuOption::Quit => vec![],
    }
}

fn text(proto: &Prototype, name: &'static str) -> Result<String, ErrorKind> {
    proto
        .get(name)
        .ok_or_else(|| ErrorKind::MissingValue(name.to_string()))?
        .as_string()
        .map(str::to_owned)
}

fn count(proto: &Prototype, name: &'static str) -> Result<u32, ErrorKind> {
    proto
        .get(name)
        .ok_or_else(|| ErrorKind::MissingValue(name.to_string()))?
        .as_count()
}

impl Request {
    /// Build the request for `option` out of the values read by [`fields_for`],
    /// `None` for options that don't query anything
    pub fn from_prototype(
        option: MenuOption,
        proto: &Prototype,
    ) -> Result<Option<Self>, ErrorKind> {
        let request = match option {
            MenuOption::TitleByIsbn => Self::TitleByIsbn(text(proto, "isbn")?),
            MenuOption::BooksByAuthor => Self::BooksByAuthor(text(proto, "author")?),
            MenuOption::AuthorAverage => Self::AuthorAverage(text(proto, "author")?),
            MenuOption::BookAverage => Self::BookAverage {
                title: text(proto, "title")?,
                author: text(proto, "author")?,
            },
            MenuOption::TopReviewer => Self::TopReviewer,
            MenuOption::InsertUser => Self::InsertUser(NewUser::from_prototype(proto)?),
            MenuOption::InsertBook => Self::InsertBook(NewBook::from_prototype(proto)?),
            MenuOption::InsertReview => Self::InsertReview(NewRating::from_prototype(proto)?),
            MenuOption::TopAuthors => Self::TopAuthors(count(proto, "number of authors")?),
            MenuOption::TopBooks => Self::TopBooks(count(proto, "number of books")?),
            MenuOption::Help | MenuOption::Quit => return Ok(None),
        };

        Ok(Some(request))
    }
}

/// Run `request` against `controller`.
///
/// Queries with no rows become a message, driver and constraint errors are
/// returned for the caller to report.
pub fn execute<C: Controller>(controller: &mut C, request: &Request) -> Result<Response, Error> {
    let response = match request {
        Request::TitleByIsbn(isbn) => match controller.title_by_isbn(isbn)? {
            Some(title) => Response::Message(format!("Title: {}", title)),
            None => Response::Message(format!("ISBN {} not found", isbn.trim())),
        },

        Request::BooksByAuthor(author) => match controller.books_by_author(author)? {
            Some(books) => Response::Table(render_lines(books.as_slice())),
            None => Response::Message(format!("Author {} not found", author)),
        },

        Request::AuthorAverage(author) => match controller.avg_rating_by_author(author)? {
            Some(avg) => Response::Table(render_lines(std::slice::from_ref(&avg))),
            None => Response::Message(format!("Author {} not found", author)),
        },

        Request::BookAverage { title, author } => {
            match controller.avg_rating_by_book(title, author)? {
                Some(avgs) => Response::Table(render_lines(avgs.as_slice())),
                None => Response::Message(format!("Book {} by {} not found", title, author)),
            }
        }

        Request::TopReviewer => match controller.top_reviewer_avg()? {
            Some(top) => Response::Message(format!(
                "Average rating of user with most reviews (user {}, {} reviews) is {:.1}",
                top.user_id, top.reviews, top.avg_rating
            )),
            None => Response::Message("No ratings found".into()),
        },

        Request::InsertUser(user) => {
            controller.insert_user(user)?;
            Response::Message(format!("User {} inserted", user.user_id))
        }

        Request::InsertBook(book) => {
            controller.insert_book(book)?;
            Response::Message(format!("Book {} inserted", book.isbn))
        }

        Request::InsertReview(rating) => {
            controller.insert_rating(rating)?;
            Response::Message(format!(
                "Rating of {} by user {} inserted",
                rating.isbn, rating.user_id
            ))
        }

        Request::TopAuthors(n) => {
            let authors = controller.top_authors(*n)?;
            if authors.is_empty() {
                Response::Message("No authors found".into())
            } else {
                Response::Table(render_lines(authors.as_slice()))
            }
        }

        Request::TopBooks(n) => {
            let books = controller.top_books(*n)?;
            if books.is_empty() {
                Response::Message("No books found".into())
            } else {
                Response::Table(render_lines(books.as_slice()))
            }
        }
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use controller::{
        normalize, AuthorAverage, AuthorBook, AuthorCount, BookAverage, BookCount, TopReviewer,
        Value,
    };

    /// In-memory stand in for the database
    #[derive(Default)]
    struct MockController {
        books: Vec<NewBook>,
        users: Vec<NewUser>,
        ratings: Vec<NewRating>,
    }

    impl MockController {
        fn author_matches(book: &NewBook, author: &str) -> bool {
            let stored = normalize(book.author.as_deref().unwrap_or_default()).to_lowercase();
            stored == normalize(author).to_lowercase()
        }
    }

    impl Controller for MockController {
        fn title_by_isbn(&mut self, isbn: &str) -> Result<Option<String>, Error> {
            let isbn = isbn.trim();
            Ok(self
                .books
                .iter()
                .find(|b| b.isbn == isbn)
                .map(|b| b.title.clone()))
        }

        fn books_by_author(&mut self, author: &str) -> Result<Option<Vec<AuthorBook>>, Error> {
            let books: Vec<AuthorBook> = self
                .books
                .iter()
                .filter(|b| Self::author_matches(b, author))
                .map(|b| AuthorBook {
                    title: b.title.clone(),
                    year: b.year,
                    publisher: b.publisher.clone(),
                    isbn: b.isbn.clone(),
                })
                .collect();

            Ok(if books.is_empty() { None } else { Some(books) })
        }

        fn avg_rating_by_author(&mut self, author: &str) -> Result<Option<AuthorAverage>, Error> {
            let isbns: Vec<&str> = self
                .books
                .iter()
                .filter(|b| Self::author_matches(b, author))
                .map(|b| b.isbn.as_str())
                .collect();

            let scores: Vec<i32> = self
                .ratings
                .iter()
                .filter(|r| isbns.contains(&r.isbn.as_str()))
                .map(|r| r.book_rating)
                .collect();

            if scores.is_empty() {
                return Ok(None);
            }

            let avg = scores.iter().sum::<i32>() as f64 / scores.len() as f64;
            Ok(Some(AuthorAverage {
                avg_rating: (avg * 10.0).round() / 10.0,
                book_count: isbns.len() as i64,
            }))
        }

        fn avg_rating_by_book(
            &mut self,
            _title: &str,
            _author: &str,
        ) -> Result<Option<Vec<BookAverage>>, Error> {
            Ok(None)
        }

        fn top_reviewer_avg(&mut self) -> Result<Option<TopReviewer>, Error> {
            Ok(self.ratings.first().map(|r| TopReviewer {
                user_id: r.user_id,
                reviews: 1,
                avg_rating: r.book_rating as f64,
            }))
        }

        fn top_authors(&mut self, n: u32) -> Result<Vec<AuthorCount>, Error> {
            Ok(self
                .books
                .iter()
                .take(n as usize)
                .map(|b| AuthorCount {
                    author: b.author.clone(),
                    books: 1,
                })
                .collect())
        }

        fn top_books(&mut self, _n: u32) -> Result<Vec<BookCount>, Error> {
            Ok(vec![])
        }

        fn insert_book(&mut self, book: &NewBook) -> Result<(), Error> {
            if self.books.iter().any(|b| b.isbn == book.isbn) {
                return Err(ErrorKind::DuplicateKey(book.isbn.clone()).into());
            }

            self.books.push(book.clone());
            Ok(())
        }

        fn insert_user(&mut self, user: &NewUser) -> Result<(), Error> {
            self.users.push(user.clone());
            Ok(())
        }

        fn insert_rating(&mut self, rating: &NewRating) -> Result<(), Error> {
            if !self.books.iter().any(|b| b.isbn == rating.isbn) {
                return Err(ErrorKind::MissingReference(rating.isbn.clone()).into());
            }

            self.ratings.push(rating.clone());
            Ok(())
        }
    }

    fn book(isbn: &str, title: &str, author: &str) -> NewBook {
        NewBook {
            isbn: isbn.into(),
            title: title.into(),
            author: Some(author.into()),
            year: Some(1988),
            publisher: Some("Vintage".into()),
        }
    }

    #[test]
    fn lookup_messages() -> Result<(), Error> {
        let mut controller = MockController::default();
        controller.insert_book(&book("0000000001", "Beloved", "Toni Morrison"))?;

        let response = execute(&mut controller, &Request::TitleByIsbn(" 0000000001 ".into()))?;
        assert_eq!(response, Response::Message("Title: Beloved".into()));

        let response = execute(&mut controller, &Request::TitleByIsbn("0000000002".into()))?;
        assert_eq!(response, Response::Message("ISBN 0000000002 not found".into()));

        Ok(())
    }

    #[test]
    fn author_table() -> Result<(), Error> {
        let mut controller = MockController::default();
        controller.insert_book(&book("0000000001", "Beloved", "Toni Morrison"))?;
        controller.insert_book(&book("0000000002", "Jazz", "Toni Morrison"))?;

        let response = execute(&mut controller, &Request::BooksByAuthor("toni morrison!".into()))?;
        let lines = match response {
            Response::Table(lines) => lines,
            other => panic!("expected a table, got {:?}", other),
        };

        assert!(lines.iter().any(|l| l.contains("Publisher")));
        assert!(lines.iter().any(|l| l.contains("Beloved") && l.contains("0000000001")));
        assert!(lines.iter().any(|l| l.contains("Jazz")));

        let response = execute(&mut controller, &Request::BooksByAuthor("Nobody".into()))?;
        assert_eq!(response, Response::Message("Author Nobody not found".into()));

        Ok(())
    }

    #[test]
    fn average_is_a_single_row_table() -> Result<(), Error> {
        let mut controller = MockController::default();
        controller.insert_book(&book("0000000001", "Beloved", "Toni Morrison"))?;
        controller.insert_rating(&NewRating {
            user_id: 1,
            isbn: "0000000001".into(),
            book_rating: 9,
        })?;

        let response = execute(&mut controller, &Request::AuthorAverage("Toni Morrison".into()))?;
        match response {
            Response::Table(lines) => {
                assert!(lines.iter().any(|l| l.contains("Avg Rating")));
                assert!(lines.iter().any(|l| l.contains("9.0")));
            }
            other => panic!("expected a table, got {:?}", other),
        }

        Ok(())
    }

    #[test]
    fn empty_rankings() -> Result<(), Error> {
        let mut controller = MockController::default();

        let response = execute(&mut controller, &Request::TopAuthors(0))?;
        assert_eq!(response, Response::Message("No authors found".into()));

        let response = execute(&mut controller, &Request::TopBooks(5))?;
        assert_eq!(response, Response::Message("No books found".into()));

        // Users alone don't make a top reviewer
        controller.insert_user(&NewUser {
            user_id: 7,
            location: None,
            age: None,
        })?;
        let response = execute(&mut controller, &Request::TopReviewer)?;
        assert_eq!(response, Response::Message("No ratings found".into()));

        Ok(())
    }

    #[test]
    fn failed_insert_is_an_error_not_a_panic() -> Result<(), Error> {
        let mut controller = MockController::default();

        let request = Request::InsertReview(NewRating {
            user_id: 1,
            isbn: "0440495717".into(),
            book_rating: 10,
        });

        let err = execute(&mut controller, &request).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ErrorKind>(),
            Some(&ErrorKind::MissingReference("0440495717".into()))
        );
        assert!(controller.ratings.is_empty());

        Ok(())
    }

    #[test]
    fn insert_messages() -> Result<(), Error> {
        let mut controller = MockController::default();

        let request = Request::InsertUser(NewUser {
            user_id: 42,
            location: None,
            age: None,
        });
        let response = execute(&mut controller, &request)?;

        assert_eq!(response, Response::Message("User 42 inserted".into()));
        assert_eq!(controller.users.len(), 1);

        Ok(())
    }

    #[test]
    fn request_from_prototype() -> Result<(), Error> {
        let mut proto = Prototype::new();
        proto.insert("number of authors", Value::Count(5));

        let request = Request::from_prototype(MenuOption::TopAuthors, &proto)?;
        assert_eq!(request, Some(Request::TopAuthors(5)));

        let mut proto = Prototype::new();
        proto.insert("title", Value::String("Emma".into()));
        proto.insert("author", Value::String("Jane Austen".into()));

        let request = Request::from_prototype(MenuOption::BookAverage, &proto)?;
        assert_eq!(
            request,
            Some(Request::BookAverage {
                title: "Emma".into(),
                author: "Jane Austen".into()
            })
        );

        let request = Request::from_prototype(MenuOption::TopReviewer, &Prototype::new())?;
        assert_eq!(request, Some(Request::TopReviewer));

        assert_eq!(Request::from_prototype(MenuOption::Quit, &Prototype::new())?, None);

        Ok(())
    }

    #[test]
    fn every_field_is_consumed() {
        for option in MenuOption::NUMBERED.iter() {
            let mut proto = Prototype::new();
            for field in fields_for(*option) {
                let (name, ty) = field.into_tuple();
                let value = match ty {
                    Type::String => Value::String("0000000001".into()),
                    Type::Int16 => Value::Int16(1),
                    Type::Int32 => Value::Int32(1),
                    Type::Count => Value::Count(1),
                };
                proto.insert(name, value);
            }

            assert!(
                Request::from_prototype(*option, &proto).is_ok(),
                "{:?}",
                option
            );
        }
    }
}
