use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, Community};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use diesel::QueryResult;
use rocket::serde::json::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct CommunityClosetOut {
    pub communities: Vec<Community>,
    pub joined: Vec<String>,
}

#[get("/communitycloset")]
pub(crate) async fn community_closet(
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<CommunityClosetOut>, ErrorResponse> {
    let uid = user.0.user_id;

    let (communities, joined) = conn
        .run(move |c| -> QueryResult<_> {
            Ok((
                crud::get_all_communities(c)?,
                crud::get_communities_by_user(c, uid)?,
            ))
        })
        .await?;

    Ok(Json(CommunityClosetOut {
        communities,
        joined,
    }))
}
