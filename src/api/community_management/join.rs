use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, CommunityMember};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::Json;

#[post("/communitycloset/<community_id>/join")]
pub(crate) async fn join_community(
    community_id: i32,
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<CommunityMember>, ErrorResponse> {
    let uid = user.0.user_id;

    let member = conn
        .run(move |c| {
            c.transaction::<_, ErrorResponse, _>(|| {
                crud::get_community_by_id(c, community_id)?.ok_or_else(|| {
                    ErrorResponse::new(Status { code: 404 }, "No such community".to_string())
                })?;

                if crud::is_member(c, community_id, uid)? {
                    return Err(ErrorResponse::new(
                        Status { code: 409 },
                        "Already a member".to_string(),
                    ));
                }

                Ok(crud::create_community_member(c, community_id, uid)?)
            })
        })
        .await?;

    tracing::info!(community_id, user_id = uid, "joined community");

    Ok(Json(member))
}
