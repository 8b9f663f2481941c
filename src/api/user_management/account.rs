use crate::api::user_management::models::{SessionUser, UserLoggedIn, UserOut};
use crate::crud::{self, CheckoutItem};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::lending;
use diesel::QueryResult;
use rocket::http::Status;
use rocket::serde::json::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HomeOut {
    pub user: SessionUser,
    pub communities: Vec<String>,
    pub image_urls: Vec<String>,
}

#[derive(Serialize)]
pub struct AccountOut {
    pub user: UserOut,
    pub open_loans: Vec<CheckoutItem>,
    pub overdue: Vec<CheckoutItem>,
}

#[get("/home")]
pub(crate) async fn home(user: UserLoggedIn, conn: DbConn) -> Result<Json<HomeOut>, ErrorResponse> {
    let uid = user.0.user_id;

    let (communities, image_urls) = conn
        .run(move |c| -> QueryResult<_> {
            Ok((
                crud::get_communities_by_user(c, uid)?,
                crud::get_items_by_user(c, uid)?,
            ))
        })
        .await?;

    Ok(Json(HomeOut {
        user: user.0,
        communities,
        image_urls,
    }))
}

#[get("/myaccount")]
pub(crate) async fn my_account(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<AccountOut>, ErrorResponse> {
    let uid = user.0.user_id;
    let today = lending::today();

    let (account, open_loans, overdue) = conn
        .run(move |c| -> QueryResult<_> {
            Ok((
                crud::get_user_by_user_id(c, uid)?,
                crud::get_open_loans_by_user(c, uid)?,
                crud::get_overdue_by_user(c, uid, today)?,
            ))
        })
        .await?;

    let account = account.ok_or_else(|| {
        ErrorResponse::new(Status { code: 401 }, "User not in database".to_string())
    })?;

    Ok(Json(AccountOut {
        user: account.into(),
        open_loans,
        overdue,
    }))
}
