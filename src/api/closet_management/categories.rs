use crate::crud;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::serde::json::Json;

#[get("/categories")]
pub(crate) async fn get_categories(conn: DbConn) -> Result<Json<Vec<String>>, ErrorResponse> {
    let categories = conn.run(|c| crud::get_categories(c)).await?;

    Ok(Json(categories))
}
