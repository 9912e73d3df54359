// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use books::models::{books::NewBook, ratings::NewRating, users::NewUser};
use books::repo;
use books::{create_schema, drop_schema, establish_connection};
use clap::Parser;
use config::Config;
use csv::StringRecord;
use diesel::pg::PgConnection;
use diesel::Connection;
use indicatif::ProgressIterator;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

// Stays under the 65535 bind parameters PostgreSQL accepts per statement
const CHUNK_SIZE: usize = 5_000;

/// Load users.csv, books.csv and ratings.csv into the books database
#[derive(Parser, Debug)]
struct Args {
    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with the csv files, overrides the configuration
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Drop every table before loading
    #[arg(long)]
    reset: bool,

    /// Log every step
    #[arg(short, long)]
    verbose: bool,
}

fn read_records(path: &Path) -> Result<Vec<StringRecord>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    for record in csv.records() {
        match record {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping malformed line in {}: {}", path.display(), e),
        }
    }

    Ok(records)
}

/// Empty fields and the usual null markers become `None`
fn nullable(value: Option<&str>) -> Option<&str> {
    match value.map(str::trim) {
        None | Some("") | Some("NULL") | Some("\\N") => None,
        Some(value) => Some(value),
    }
}

fn user_row(record: &StringRecord) -> Option<NewUser<'_>> {
    let user_id = record.get(0)?.trim().parse().ok()?;

    Some(NewUser {
        user_id,
        location: nullable(record.get(1)),
        age: nullable(record.get(2)),
    })
}

/// A year outside 0..=9999 is dropped, the book itself is kept
fn book_row(record: &StringRecord) -> Option<NewBook<'_>> {
    let isbn = record
        .get(0)
        .map(str::trim)
        .filter(|isbn| !isbn.is_empty() && isbn.len() <= 10)?;
    let title = nullable(record.get(1))?;

    let year = match nullable(record.get(3)).map(str::parse::<i16>) {
        None => None,
        Some(Ok(year)) if (0..=9999).contains(&year) => Some(year),
        Some(_) => {
            log::warn!("Ignoring invalid year of book {}", isbn);
            None
        }
    };

    Some(NewBook {
        isbn,
        title,
        author: nullable(record.get(2)),
        year,
        publisher: nullable(record.get(4)),
        small: nullable(record.get(5)),
        medium: nullable(record.get(6)),
        large: nullable(record.get(7)),
    })
}

fn rating_row(record: &StringRecord) -> Option<NewRating<'_>> {
    Some(NewRating {
        user_id: record.get(0)?.trim().parse().ok()?,
        isbn: record.get(1).map(str::trim).filter(|isbn| !isbn.is_empty())?,
        book_rating: record.get(2)?.trim().parse().ok()?,
    })
}

/// Users whose id is already in `ids` are skipped, every new id is added
fn collect_users<'r>(records: &'r [StringRecord], ids: &mut HashSet<i32>) -> Vec<NewUser<'r>> {
    let mut users = Vec::new();
    for record in records.iter().progress() {
        match user_row(record) {
            Some(user) if ids.insert(user.user_id) => users.push(user),
            Some(user) => log::debug!("Skipping repeated user {}", user.user_id),
            None => log::warn!("Skipping user with invalid id: {:?}", record),
        }
    }

    users
}

/// Books whose isbn is already in `isbns` are skipped, every new isbn is
/// added
fn collect_books<'r>(
    records: &'r [StringRecord],
    isbns: &mut HashSet<String>,
) -> Vec<NewBook<'r>> {
    let mut books = Vec::new();
    for record in records.iter().progress() {
        match book_row(record) {
            Some(book) if isbns.insert(book.isbn.to_owned()) => books.push(book),
            Some(book) => log::debug!("Skipping repeated book {}", book.isbn),
            None => log::warn!("Skipping book with invalid isbn or title: {:?}", record),
        }
    }

    books
}

/// Ratings that parse and reference known rows, plus how many were skipped
fn collect_ratings<'r>(
    records: &'r [StringRecord],
    users: &HashSet<i32>,
    books: &HashSet<String>,
) -> (Vec<NewRating<'r>>, usize) {
    let mut skipped = 0;
    let mut ratings = Vec::new();
    for record in records.iter().progress() {
        match rating_row(record) {
            Some(rating) if users.contains(&rating.user_id) && books.contains(rating.isbn) => {
                ratings.push(rating)
            }
            _ => skipped += 1,
        }
    }

    (ratings, skipped)
}

fn insert_users(
    conn: &mut PgConnection,
    dir: &Path,
    ids: &mut HashSet<i32>,
) -> Result<(), Error> {
    println!("Collecting records for users...");
    let records = read_records(&dir.join("users.csv"))?;
    let users = collect_users(&records, ids);

    println!("Pushing users by chunks");
    for chunk in users.chunks(CHUNK_SIZE).progress() {
        repo::users::insert_many(conn, chunk)?;
    }

    Ok(())
}

fn insert_books(
    conn: &mut PgConnection,
    dir: &Path,
    isbns: &mut HashSet<String>,
) -> Result<(), Error> {
    println!("Collecting records for books...");
    let records = read_records(&dir.join("books.csv"))?;
    let books = collect_books(&records, isbns);

    println!("Pushing books by chunks");
    for chunk in books.chunks(CHUNK_SIZE).progress() {
        repo::books::insert_many(conn, chunk)?;
    }

    Ok(())
}

fn insert_ratings(
    conn: &mut PgConnection,
    dir: &Path,
    users: &HashSet<i32>,
    books: &HashSet<String>,
) -> Result<(), Error> {
    println!("Collecting records for ratings...");
    let records = read_records(&dir.join("ratings.csv"))?;
    let (ratings, skipped) = collect_ratings(&records, users, books);

    if skipped > 0 {
        log::warn!("Skipped {} ratings with unknown user, book or score", skipped);
    }

    println!("Pushing ratings by chunks");
    for chunk in ratings.chunks(CHUNK_SIZE).progress() {
        repo::ratings::insert_many(conn, chunk)?;
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let vars: HashMap<String, String> = dotenv::vars().collect();

    let mut config = Config::load_or_default(args.config.as_ref())?;
    config.apply_env(&vars);

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        config.log_level()?
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let dir = args.data_dir.clone().unwrap_or_else(|| config.data.dir.clone());
    let mut conn = establish_connection(config.database_url()?)?;

    conn.transaction::<_, Error, _>(|conn| {
        if args.reset {
            drop_schema(conn)?;
        }

        create_schema(conn)?;

        // Rows from a previous run are kept and may be referenced by ratings
        let mut users: HashSet<i32> = repo::users::ids(conn)?.into_iter().collect();
        let mut books: HashSet<String> = repo::books::isbns(conn)?.into_iter().collect();
        log::info!("{} users and {} books already loaded", users.len(), books.len());

        insert_users(conn, &dir, &mut users)?;
        insert_books(conn, &dir, &mut books)?;
        insert_ratings(conn, &dir, &users, &books)
    })?;

    println!("Done");
    Ok(())
}
