use crate::error::from_diesel;
use crate::models::users::NewUser;
use crate::schema::users;
use anyhow::Error;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_query;

pub const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id  integer NOT NULL
            CONSTRAINT users_pk PRIMARY KEY,
        location text,
        age      text
    )
"#;

pub const DROP_TABLE: &str = "DROP TABLE IF EXISTS users";

pub fn create_table(conn: &mut PgConnection) -> QueryResult<()> {
    sql_query(CREATE_TABLE).execute(conn)?;
    Ok(())
}

pub fn drop_table(conn: &mut PgConnection) -> QueryResult<()> {
    sql_query(DROP_TABLE).execute(conn)?;
    Ok(())
}

pub fn insert(conn: &mut PgConnection, user: &NewUser) -> Result<(), Error> {
    diesel::insert_into(users::table)
        .values(user)
        .execute(conn)
        .map_err(from_diesel)?;

    log::debug!("Inserted user {}", user.user_id);
    Ok(())
}

pub fn insert_many(conn: &mut PgConnection, users: &[NewUser]) -> QueryResult<usize> {
    diesel::insert_into(users::table).values(users).execute(conn)
}

pub fn ids(conn: &mut PgConnection) -> QueryResult<Vec<i32>> {
    users::table.select(users::user_id).load(conn)
}
