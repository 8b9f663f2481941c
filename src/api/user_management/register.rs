use crate::accounts::{self, AccountError};
use crate::api::user_management::models::UserOut;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::form::Form;
use rocket::response::status;
use rocket::serde::json::Json;

#[derive(FromForm)]
pub struct FormNewUser {
    #[field(validate = contains('@'))]
    new_email: String,
    #[field(validate = len(1..))]
    new_password: String,
    city: Option<String>,
    phone: Option<String>,
}

#[post("/newuser", data = "<form_user>")]
pub(crate) async fn new_user(
    form_user: Form<FormNewUser>,
    conn: DbConn,
) -> Result<status::Created<Json<UserOut>>, ErrorResponse> {
    let form = form_user.into_inner();

    let user = conn
        .run(move |c| {
            accounts::register(
                c,
                &form.new_email,
                &form.new_password,
                form.city.as_deref(),
                form.phone.as_deref(),
            )
        })
        .await
        .map_err(|err| {
            if let AccountError::EmailTaken = err {
                tracing::info!("registration with an existing email rejected");
            }
            err
        })?;

    tracing::info!(user_id = user.user_id, "user registered");

    Ok(status::Created::new("/myaccount").body(Json(user.into())))
}
