use crate::accounts;
use crate::api::user_management::models::{SessionUser, UserLoggedIn, UserOut};
use crate::api::user_management::sessions::{SessionCookie, UserSession, SESSION_COOKIE};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::http::CookieJar;
use rocket::http::{Cookie, Status};
use rocket::serde::json::Json;
use rocket::State;

#[get("/check_login")]
pub(crate) async fn check_login(user: UserLoggedIn) -> Json<SessionUser> {
    Json(user.0)
}

#[get("/login?<email>&<password>")]
pub(crate) async fn login(
    email: String,
    password: String,
    sessions: &State<UserSession>,
    conn: DbConn,
    cookies: &CookieJar<'_>,
) -> Result<Json<UserOut>, ErrorResponse> {
    let user = conn
        .run(move |c| accounts::authenticate(c, &email, &password))
        .await
        .map_err(|err| {
            tracing::info!(%err, "login rejected");
            err
        })?;

    let session_key = sessions.start(SessionUser {
        user_id: user.user_id,
        email: user.email.clone(),
    })?;

    let cookie_string = serde_json::to_string(&SessionCookie::new(session_key)).map_err(|err| {
        ErrorResponse::new(
            Status { code: 500 },
            format!("Couldn't create session cookie {}", err),
        )
    })?;

    cookies.add_private(Cookie::new(SESSION_COOKIE, cookie_string));
    tracing::info!(user_id = user.user_id, "user logged in");

    Ok(Json(user.into()))
}

#[get("/logout")]
pub(crate) async fn logout(
    sessions: &State<UserSession>,
    cookies: &CookieJar<'_>,
) -> Result<&'static str, ErrorResponse> {
    if let Some(cookie) = cookies.get_private(SESSION_COOKIE) {
        if let Ok(value) = serde_json::from_str::<SessionCookie>(cookie.value()) {
            if let Some(user) = sessions.end(&value.session_key)? {
                tracing::info!(user_id = user.user_id, "user logged out");
            }
        }
        cookies.remove_private(Cookie::named(SESSION_COOKIE));
    }

    Ok("Logged out")
}
