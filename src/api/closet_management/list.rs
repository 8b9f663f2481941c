use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, Item};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::serde::json::Json;

#[get("/mycloset")]
pub(crate) async fn my_closet(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<Item>>, ErrorResponse> {
    let uid = user.0.user_id;
    let closet = conn.run(move |c| crud::get_closet(c, uid)).await?;

    Ok(Json(closet))
}
