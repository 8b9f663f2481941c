//! Registration and password login.

use crate::crud::{self, User};
use crate::error::ErrorResponse;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::PgConnection;
use rand::rngs::OsRng;
use rocket::http::Status;
use thiserror::Error;

pub(crate) const EMAIL_TAKEN: &str = "Cannot create an account with that email. Try again.";
pub(crate) const BAD_CREDENTIALS: &str = "The email or password you entered was incorrect.";

#[derive(Debug, Error)]
pub(crate) enum AccountError {
    #[error("{}", EMAIL_TAKEN)]
    EmailTaken,
    #[error("{}", BAD_CREDENTIALS)]
    BadCredentials,
    #[error("couldn't hash password: {0}")]
    Hash(String),
    #[error(transparent)]
    Database(#[from] DieselError),
}

impl From<AccountError> for ErrorResponse {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmailTaken => ErrorResponse::new(Status { code: 409 }, err.to_string()),
            AccountError::BadCredentials => {
                ErrorResponse::new(Status { code: 401 }, err.to_string())
            }
            AccountError::Hash(_) => ErrorResponse::new(Status { code: 500 }, err.to_string()),
            AccountError::Database(err) => err.into(),
        }
    }
}

pub(crate) fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AccountError::Hash(err.to_string()))
}

/// False for a wrong password and for a stored value that isn't a PHC hash.
pub(crate) fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// Creates an account unless the email is already registered. The lookup and
/// the insert are separate statements, so a racing registration can slip past
/// the lookup; the unique index then rejects it with the same error.
pub(crate) fn register(
    conn: &PgConnection,
    email: &str,
    password: &str,
    city: Option<&str>,
    phone: Option<&str>,
) -> Result<User, AccountError> {
    if crud::get_user_by_email(conn, email)?.is_some() {
        return Err(AccountError::EmailTaken);
    }

    let hash = hash_password(password)?;

    crud::create_user(conn, email, &hash, city, phone).map_err(|err| match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AccountError::EmailTaken
        }
        err => AccountError::Database(err),
    })
}

pub(crate) fn authenticate(
    conn: &PgConnection,
    email: &str,
    password: &str,
) -> Result<User, AccountError> {
    let user = crud::get_user_by_email(conn, email)?.ok_or(AccountError::BadCredentials)?;

    if verify_password(password, &user.password) {
        Ok(user)
    } else {
        Err(AccountError::BadCredentials)
    }
}
