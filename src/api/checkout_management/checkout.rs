use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, Checkout, CheckoutItem};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::lending::{self, CheckoutOut};
use crate::settings::Settings;
use diesel::QueryResult;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;

#[derive(Serialize)]
pub struct LoanOut {
    #[serde(flatten)]
    pub item: CheckoutItem,
    pub overdue: bool,
}

#[derive(Serialize)]
pub struct CheckoutHistoryOut {
    pub checkout: Checkout,
    pub items: Vec<LoanOut>,
}

#[post("/checkout")]
pub(crate) async fn checkout(
    user: UserLoggedIn,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<status::Created<Json<CheckoutOut>>, ErrorResponse> {
    let uid = user.0.user_id;
    let loan_days = settings.loan_days;
    let today = lending::today();

    let out = conn
        .run(move |c| lending::checkout_cart(c, uid, today, loan_days))
        .await?;

    Ok(status::Created::new("/checkouts").body(Json(out)))
}

#[get("/checkouts")]
pub(crate) async fn get_checkouts(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<CheckoutHistoryOut>>, ErrorResponse> {
    let uid = user.0.user_id;
    let today = lending::today();

    let history = conn
        .run(move |c| -> QueryResult<Vec<(Checkout, Vec<CheckoutItem>)>> {
            crud::get_checkouts_by_user(c, uid)?
                .into_iter()
                .map(|checkout| -> QueryResult<(Checkout, Vec<CheckoutItem>)> {
                    let items = crud::get_checkout_items(c, checkout.checkout_id)?;
                    Ok((checkout, items))
                })
                .collect()
        })
        .await?;

    let out = history
        .into_iter()
        .map(|(checkout, items)| CheckoutHistoryOut {
            checkout,
            items: items
                .into_iter()
                .map(|item| LoanOut {
                    overdue: lending::is_overdue(&item, today),
                    item,
                })
                .collect(),
        })
        .collect();

    Ok(Json(out))
}
