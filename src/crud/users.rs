use crate::schema::users;
use diesel::prelude::*;
use diesel::PgConnection;

#[derive(Queryable, Debug, Clone)]
pub struct User {
    pub user_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub city: Option<String>,
    pub phone: Option<String>,
}

#[derive(Insertable)]
#[table_name = "users"]
struct NewUser<'a> {
    email: &'a str,
    password: &'a str,
    city: Option<&'a str>,
    phone: Option<&'a str>,
}

/// Inserts a user. `password` is stored exactly as given, so callers pass
/// the hash. Email uniqueness is left to the caller's pre-check and the
/// `users_email_key` index.
pub(crate) fn create_user(
    conn: &PgConnection,
    email: &str,
    password: &str,
    city: Option<&str>,
    phone: Option<&str>,
) -> QueryResult<User> {
    let new_user = NewUser {
        email,
        password,
        city,
        phone,
    };

    diesel::insert_into(users::table)
        .values(&new_user)
        .get_result(conn)
}

pub(crate) fn get_user_by_email(conn: &PgConnection, email: &str) -> QueryResult<Option<User>> {
    users::table
        .filter(users::email.eq(email))
        .first::<User>(conn)
        .optional()
}

pub(crate) fn get_user_by_user_id(conn: &PgConnection, user_id: i32) -> QueryResult<Option<User>> {
    users::table.find(user_id).first::<User>(conn).optional()
}
