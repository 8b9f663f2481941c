use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, Item};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::http::Status;
use rocket::serde::json::Json;

/// The shared closet of a community: every item its members own.
#[get("/communitycloset/<community_id>/items")]
pub(crate) async fn community_items(
    community_id: i32,
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Vec<Item>>, ErrorResponse> {
    let uid = user.0.user_id;

    let items = conn
        .run(move |c| -> Result<Vec<Item>, ErrorResponse> {
            if !crud::is_member(c, community_id, uid)? {
                return Err(ErrorResponse::new(
                    Status { code: 403 },
                    "Join the community to see its closet".to_string(),
                ));
            }
            Ok(crud::get_items_by_community(c, community_id)?)
        })
        .await?;

    Ok(Json(items))
}
