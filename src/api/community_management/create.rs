use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, Community};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use diesel::prelude::*;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;

#[derive(FromForm)]
pub struct FormCommunity {
    #[field(validate = len(1..))]
    community_name: String,
    location: Option<String>,
    community_description: Option<String>,
}

/// Creates a community and makes its creator the first member.
#[post("/communitycloset", data = "<form_community>")]
pub(crate) async fn create_community(
    form_community: Form<FormCommunity>,
    user: UserLoggedIn,
    conn: DbConn,
) -> Result<status::Created<Json<Community>>, ErrorResponse> {
    let form = form_community.into_inner();
    let uid = user.0.user_id;

    let community = conn
        .run(move |c| {
            c.transaction::<_, ErrorResponse, _>(|| {
                if crud::get_community_by_name(c, &form.community_name)?.is_some() {
                    return Err(ErrorResponse::new(
                        Status { code: 409 },
                        format!("A community called {} already exists", form.community_name),
                    ));
                }

                let community = crud::create_community(
                    c,
                    &form.community_name,
                    form.community_description.as_deref(),
                    form.location.as_deref(),
                )?;
                crud::create_community_member(c, community.community_id, uid)?;

                Ok(community)
            })
        })
        .await?;

    tracing::info!(
        community_id = community.community_id,
        user_id = uid,
        "community created"
    );

    Ok(status::Created::new(format!(
        "/communitycloset/{}/items",
        community.community_id
    ))
    .body(Json(community)))
}
