//! Entity repositories, one module per table.
//!
//! Every function runs a single statement on the connection it's given and
//! owns the DDL of its table.

pub mod books;
pub mod ratings;
pub mod users;
