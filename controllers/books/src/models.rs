pub mod books;
pub mod ratings;
pub mod reports;
pub mod users;
