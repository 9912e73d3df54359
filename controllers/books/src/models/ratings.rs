// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::ratings;
use diesel::prelude::*;

// To insert a new rating into the database
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ratings)]
pub struct NewRating<'a> {
    pub user_id: i32,
    pub isbn: &'a str,
    pub book_rating: i32,
}

impl<'a> From<&'a controller::NewRating> for NewRating<'a> {
    fn from(rating: &'a controller::NewRating) -> Self {
        Self {
            user_id: rating.user_id,
            isbn: &rating.isbn,
            book_rating: rating.book_rating,
        }
    }
}
