use crate::api::user_management::models::UserLoggedIn;
use crate::crud;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::serde::json::Json;

#[get("/communitycloset/members?<community_name>")]
pub(crate) async fn community_members(
    community_name: String,
    _user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<i32>>, ErrorResponse> {
    let members = conn
        .run(move |c| crud::get_users_by_community(c, &community_name))
        .await?;

    Ok(Json(members))
}
