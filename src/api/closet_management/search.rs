use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, Item};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use rocket::http::Status;
use rocket::serde::json::Json;

#[get("/items?<item_name>")]
pub(crate) async fn find_item(
    item_name: String,
    _user: UserLoggedIn,
    conn: DbConn,
) -> Result<Json<Item>, ErrorResponse> {
    let not_found = item_not_found(&item_name);
    let item = conn
        .run(move |c| crud::get_item_by_item_name(c, &item_name))
        .await?
        .ok_or(not_found)?;

    Ok(Json(item))
}

fn item_not_found(item_name: &str) -> ErrorResponse {
    ErrorResponse::new(Status { code: 404 }, format!("No item called {}", item_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_item_is_a_404_naming_the_item() {
        let response = item_not_found("Ball gown");
        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(response.message(), "No item called Ball gown");
    }
}
