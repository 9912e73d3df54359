// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use crate::values::{Field, Prototype, Type, Value};

/// A row that knows how to lay itself out as table cells
pub trait Record {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn or_empty<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// A book found by author
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorBook {
    pub title: String,
    pub year: Option<i16>,
    pub publisher: Option<String>,
    pub isbn: String,
}

impl Record for AuthorBook {
    const HEADERS: &'static [&'static str] = &["Title", "Year", "Publisher", "ISBN"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            or_empty(&self.year),
            or_empty(&self.publisher),
            self.isbn.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorAverage {
    pub avg_rating: f64,
    pub book_count: i64,
}

impl Record for AuthorAverage {
    const HEADERS: &'static [&'static str] = &["Avg Rating", "# of Books"];

    fn cells(&self) -> Vec<String> {
        vec![format!("{:.1}", self.avg_rating), self.book_count.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookAverage {
    pub avg_rating: f64,
    pub title: String,
    pub author: Option<String>,
}

impl Record for BookAverage {
    const HEADERS: &'static [&'static str] = &["Rating", "Title", "Author"];

    fn cells(&self) -> Vec<String> {
        vec![
            format!("{:.1}", self.avg_rating),
            self.title.clone(),
            or_empty(&self.author),
        ]
    }
}

/// The user with the most ratings and how they rate on average
#[derive(Debug, Clone, PartialEq)]
pub struct TopReviewer {
    pub user_id: i32,
    pub reviews: i64,
    pub avg_rating: f64,
}

impl Record for TopReviewer {
    const HEADERS: &'static [&'static str] = &["User ID", "# of Reviews", "Avg Rating"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.reviews.to_string(),
            format!("{:.1}", self.avg_rating),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorCount {
    pub author: Option<String>,
    pub books: i64,
}

impl Record for AuthorCount {
    const HEADERS: &'static [&'static str] = &["Author", "# of Books"];

    fn cells(&self) -> Vec<String> {
        vec![or_empty(&self.author), self.books.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookCount {
    pub title: String,
    pub author: Option<String>,
    pub ratings: i64,
}

impl Record for BookCount {
    const HEADERS: &'static [&'static str] = &["Title", "Author", "# of Ratings"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            or_empty(&self.author),
            self.ratings.to_string(),
        ]
    }
}

// Insert prototypes

fn required<'a>(proto: &'a Prototype, name: &'static str) -> Result<&'a Value, ErrorKind> {
    proto
        .get(name)
        .ok_or_else(|| ErrorKind::MissingValue(name.to_string()))
}

fn optional_string(proto: &Prototype, name: &str) -> Result<Option<String>, ErrorKind> {
    proto
        .get(name)
        .map(|v| v.as_string().map(str::to_owned))
        .transpose()
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub year: Option<i16>,
    pub publisher: Option<String>,
}

impl NewBook {
    pub fn fields() -> Vec<Field<'static>> {
        vec![
            Field::Required("isbn", Type::String),
            Field::Required("title", Type::String),
            Field::Optional("author", Type::String),
            Field::Optional("year", Type::Int16),
            Field::Optional("publisher", Type::String),
        ]
    }

    pub fn from_prototype(proto: &Prototype) -> Result<Self, ErrorKind> {
        Ok(Self {
            isbn: required(proto, "isbn")?.as_string()?.trim().to_owned(),
            title: required(proto, "title")?.as_string()?.to_owned(),
            author: optional_string(proto, "author")?,
            year: proto.get("year").map(Value::as_i16).transpose()?,
            publisher: optional_string(proto, "publisher")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub user_id: i32,
    pub location: Option<String>,
    pub age: Option<String>,
}

impl NewUser {
    pub fn fields() -> Vec<Field<'static>> {
        vec![
            Field::Required("user id", Type::Int32),
            Field::Optional("location", Type::String),
            Field::Optional("age", Type::String),
        ]
    }

    pub fn from_prototype(proto: &Prototype) -> Result<Self, ErrorKind> {
        Ok(Self {
            user_id: required(proto, "user id")?.as_i32()?,
            location: optional_string(proto, "location")?,
            age: optional_string(proto, "age")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub user_id: i32,
    pub isbn: String,
    pub book_rating: i32,
}

impl NewRating {
    pub fn fields() -> Vec<Field<'static>> {
        vec![
            Field::Required("user id", Type::Int32),
            Field::Required("isbn", Type::String),
            Field::Required("rating", Type::Int32),
        ]
    }

    pub fn from_prototype(proto: &Prototype) -> Result<Self, ErrorKind> {
        Ok(Self {
            user_id: required(proto, "user id")?.as_i32()?,
            isbn: required(proto, "isbn")?.as_string()?.trim().to_owned(),
            book_rating: required(proto, "rating")?.as_i32()?,
        })
    }
}
