use crate::api::user_management::models::UserLoggedIn;
use crate::crud::CheckoutItem;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::lending;
use rocket::serde::json::Json;

#[post("/checkout/return/<checkout_item_id>")]
pub(crate) async fn return_item(
    checkout_item_id: i32,
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<CheckoutItem>, ErrorResponse> {
    let uid = user.0.user_id;
    let today = lending::today();

    let returned = conn
        .run(move |c| lending::return_item(c, uid, checkout_item_id, today))
        .await?;

    Ok(Json(returned))
}
