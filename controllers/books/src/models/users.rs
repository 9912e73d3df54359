use crate::schema::users;
use diesel::prelude::*;

// To insert a new user into the database
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub user_id: i32,
    pub location: Option<&'a str>,
    pub age: Option<&'a str>,
}

impl<'a> From<&'a controller::NewUser> for NewUser<'a> {
    fn from(user: &'a controller::NewUser) -> Self {
        Self {
            user_id: user.user_id,
            location: user.location.as_deref(),
            age: user.age.as_deref(),
        }
    }
}
