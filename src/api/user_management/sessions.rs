use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use crate::api::user_management::models::{SessionUser, UserLoggedIn};
use crate::error::{ApiError, ErrorResponse};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use rocket::http::Status;
use rocket::outcome::{try_outcome, IntoOutcome};
use rocket::request::{self, FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const SESSION_COOKIE: &str = "session";

const MAX_SESSION_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 30);

#[derive(Serialize, Deserialize)]
pub(crate) struct SessionCookie {
    pub(crate) session_key: String,
    pub(crate) creation_time: SystemTime,
}

impl SessionCookie {
    pub(crate) fn new(session_key: String) -> Self {
        SessionCookie {
            session_key,
            creation_time: SystemTime::now(),
        }
    }

    fn is_expired(&self) -> bool {
        is_expired(self.creation_time)
    }
}

fn is_expired(creation_time: SystemTime) -> bool {
    match creation_time.elapsed() {
        Ok(age) => age > MAX_SESSION_AGE,
        // created in the future: clock skew or a forged cookie
        Err(_) => true,
    }
}

#[derive(Debug, Error)]
#[error("Couldn't get user sessions")]
pub(crate) struct SessionError;

impl From<SessionError> for ErrorResponse {
    fn from(err: SessionError) -> Self {
        ErrorResponse::new(Status { code: 500 }, err.to_string())
    }
}

struct StoredSession {
    user: SessionUser,
    creation_time: SystemTime,
}

/// Active login sessions, keyed by the random key stored in the session cookie.
/// Entries older than `MAX_SESSION_AGE` are dropped when they are looked up
/// and whenever a new session starts.
pub(crate) struct UserSession {
    sessions: Mutex<HashMap<String, StoredSession>>,
}

impl UserSession {
    pub(crate) fn new() -> UserSession {
        UserSession {
            sessions: Mutex::new(HashMap::<String, StoredSession>::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, StoredSession>>, SessionError> {
        self.sessions.lock().map_err(|_| SessionError)
    }

    /// Opens a session and returns its key.
    pub(crate) fn start(&self, user: SessionUser) -> Result<String, SessionError> {
        let session_key = generate_session_key();
        let mut sessions = self.lock()?;
        sessions.retain(|_, session| !is_expired(session.creation_time));
        sessions.insert(
            session_key.clone(),
            StoredSession {
                user,
                creation_time: SystemTime::now(),
            },
        );
        Ok(session_key)
    }

    pub(crate) fn get(&self, session_key: &str) -> Result<Option<SessionUser>, SessionError> {
        let mut sessions = self.lock()?;
        let expired = match sessions.get(session_key) {
            Some(session) if !is_expired(session.creation_time) => {
                return Ok(Some(session.user.clone()))
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            sessions.remove(session_key);
        }
        Ok(None)
    }

    pub(crate) fn end(&self, session_key: &str) -> Result<Option<SessionUser>, SessionError> {
        Ok(self.lock()?.remove(session_key).map(|session| session.user))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.sessions.lock().map(|sessions| sessions.len()).unwrap_or(0)
    }
}

fn generate_session_key() -> String {
    const LEN: usize = 32;

    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(LEN)
        .map(char::from)
        .collect()
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserLoggedIn {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let unauthorised = Status { code: 401 };

        let session_cookie = try_outcome!(req
            .cookies()
            .get_private(SESSION_COOKIE)
            .ok_or_else(|| ApiError::new("No session set".to_string()))
            .into_outcome(unauthorised));

        let session_cookie_value =
            try_outcome!(serde_json::from_str::<SessionCookie>(session_cookie.value())
                .map_err(|_| ApiError::new("Couldn't parse session".to_string()))
                .into_outcome(unauthorised));

        let sessions = try_outcome!(req.guard::<&State<UserSession>>().await.map_failure(|_| {
            (
                Status { code: 500 },
                ApiError::new("Couldn't get UserSession".to_string()),
            )
        }));

        if session_cookie_value.is_expired() {
            try_outcome!(sessions
                .end(&session_cookie_value.session_key)
                .map_err(|err| ApiError::new(err.to_string()))
                .into_outcome(Status { code: 500 }));
            return Outcome::Failure((unauthorised, ApiError::new("Session too old".to_string())));
        }

        let user = try_outcome!(sessions
            .get(&session_cookie_value.session_key)
            .map_err(|err| ApiError::new(err.to_string()))
            .into_outcome(Status { code: 500 }));

        let user = try_outcome!(user
            .ok_or_else(|| ApiError::new("No session found".to_string()))
            .into_outcome(unauthorised));

        Outcome::Success(UserLoggedIn(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> SessionUser {
        SessionUser {
            user_id: 1,
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn started_session_can_be_found_until_ended() {
        let sessions = UserSession::new();
        let key = sessions.start(ada()).unwrap();

        assert_eq!(key.len(), 32);
        assert_eq!(sessions.get(&key).unwrap(), Some(ada()));
        assert_eq!(sessions.end(&key).unwrap(), Some(ada()));
        assert_eq!(sessions.get(&key).unwrap(), None);
    }

    #[test]
    fn each_session_gets_its_own_key() {
        let sessions = UserSession::new();
        let first = sessions.start(ada()).unwrap();
        let second = sessions.start(ada()).unwrap();
        assert_ne!(first, second);
    }

    fn backdate(sessions: &UserSession, key: &str) {
        let mut map = sessions.lock().unwrap();
        let session = map.get_mut(key).unwrap();
        session.creation_time = SystemTime::now() - MAX_SESSION_AGE - Duration::from_secs(1);
    }

    #[test]
    fn expired_session_is_dropped_on_lookup() {
        let sessions = UserSession::new();
        let key = sessions.start(ada()).unwrap();
        backdate(&sessions, &key);

        assert_eq!(sessions.get(&key).unwrap(), None);
        assert_eq!(sessions.len(), 0);
    }

    #[test]
    fn starting_a_session_prunes_expired_ones() {
        let sessions = UserSession::new();
        let old = sessions.start(ada()).unwrap();
        let live = sessions.start(ada()).unwrap();
        backdate(&sessions, &old);

        let new = sessions.start(ada()).unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions.get(&live).unwrap(), Some(ada()));
        assert_eq!(sessions.get(&new).unwrap(), Some(ada()));
        assert_eq!(sessions.end(&old).unwrap(), None);
    }

    #[test]
    fn cookie_age_limits() {
        let fresh = SessionCookie::new("key".to_string());
        assert!(!fresh.is_expired());

        let old = SessionCookie {
            session_key: "key".to_string(),
            creation_time: SystemTime::now() - MAX_SESSION_AGE - Duration::from_secs(1),
        };
        assert!(old.is_expired());

        let future = SessionCookie {
            session_key: "key".to_string(),
            creation_time: SystemTime::now() + Duration::from_secs(3600),
        };
        assert!(future.is_expired());
    }
}
