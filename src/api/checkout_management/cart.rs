use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, Cart, Item};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::lending;
use rocket::form::Form;
use rocket::response::status;
use rocket::serde::json::Json;

#[derive(FromForm)]
pub struct FormCartItem {
    item_id: i32,
}

#[post("/cart", data = "<form_cart>")]
pub(crate) async fn add_to_cart(
    form_cart: Form<FormCartItem>,
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<status::Created<Json<Cart>>, ErrorResponse> {
    let uid = user.0.user_id;
    let item_id = form_cart.item_id;

    let entry = conn
        .run(move |c| lending::add_to_cart(c, uid, item_id))
        .await?;

    Ok(status::Created::new("/cart").body(Json(entry)))
}

#[get("/cart")]
pub(crate) async fn get_cart(user: UserLoggedIn, conn: DbConn) -> Result<Json<Vec<Item>>, ErrorResponse> {
    let uid = user.0.user_id;
    let cart = conn.run(move |c| crud::get_cart_by_user(c, uid)).await?;

    Ok(Json(cart))
}

#[delete("/cart/<item_id>")]
pub(crate) async fn remove_from_cart(
    item_id: i32,
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<(), ErrorResponse> {
    let uid = user.0.user_id;
    conn.run(move |c| lending::remove_from_cart(c, uid, item_id))
        .await?;

    tracing::info!(user_id = uid, item_id, "removed item from cart");
    Ok(())
}
