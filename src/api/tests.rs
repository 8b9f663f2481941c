//! Request-level checks of the session guard. These routes never touch the
//! database, so the rocket under test has no database fairing attached.

use std::time::{Duration, SystemTime};

use super::user_management::login::{check_login, logout};
use super::user_management::models::SessionUser;
use super::user_management::sessions::{SessionCookie, UserSession, SESSION_COOKIE};
use crate::error;
use rocket::http::{Cookie, Status};
use rocket::local::blocking::Client;
use serde_json::Value;

fn client() -> Client {
    let rocket = rocket::build()
        .manage(UserSession::new())
        .mount("/", routes![check_login, logout])
        .register("/", catchers![error::unauthorised, error::default_catcher]);

    Client::tracked(rocket).expect("valid rocket instance")
}

fn start_session(client: &Client, user: SessionUser) -> String {
    client
        .rocket()
        .state::<UserSession>()
        .expect("sessions are managed")
        .start(user)
        .expect("session starts")
}

fn session_cookie(cookie: &SessionCookie) -> Cookie<'static> {
    Cookie::new(SESSION_COOKIE, serde_json::to_string(cookie).unwrap())
}

fn ada() -> SessionUser {
    SessionUser {
        user_id: 4,
        email: "ada@example.com".to_string(),
    }
}

#[test]
fn check_login_without_cookie_is_unauthorised() {
    let client = client();
    let response = client.get("/check_login").dispatch();

    assert_eq!(response.status(), Status::Unauthorized);
    let body: Value = response.into_json().expect("json error body");
    assert_eq!(body["err"], "Login required");
}

#[test]
fn check_login_with_session_returns_user() {
    let client = client();
    let key = start_session(&client, ada());

    let response = client
        .get("/check_login")
        .private_cookie(session_cookie(&SessionCookie::new(key)))
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
    let body: SessionUser = response.into_json().expect("session user");
    assert_eq!(body, ada());
}

#[test]
fn stale_session_cookie_is_unauthorised_and_forgotten() {
    let client = client();
    let key = start_session(&client, ada());
    let stale = SessionCookie {
        session_key: key,
        creation_time: SystemTime::now() - Duration::from_secs(60 * 60 * 24 * 31),
    };

    let response = client
        .get("/check_login")
        .private_cookie(session_cookie(&stale))
        .dispatch();

    assert_eq!(response.status(), Status::Unauthorized);
    let sessions = client.rocket().state::<UserSession>().unwrap();
    assert_eq!(sessions.len(), 0);
}

#[test]
fn unknown_session_key_is_unauthorised() {
    let client = client();
    let response = client
        .get("/check_login")
        .private_cookie(session_cookie(&SessionCookie::new("not-a-session".to_string())))
        .dispatch();

    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn logout_ends_the_session() {
    let client = client();
    let key = start_session(&client, ada());
    let cookie = SessionCookie::new(key.clone());

    let response = client
        .get("/logout")
        .private_cookie(session_cookie(&cookie))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().as_deref(), Some("Logged out"));

    let sessions = client.rocket().state::<UserSession>().unwrap();
    assert_eq!(sessions.get(&key).unwrap(), None);

    let response = client
        .get("/check_login")
        .private_cookie(session_cookie(&cookie))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn unknown_route_gets_json_error() {
    let client = client();
    let response = client.get("/nowhere").dispatch();

    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().expect("json error body");
    assert_eq!(body["err"], "Not Found");
}
