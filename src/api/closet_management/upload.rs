use crate::api::user_management::models::UserLoggedIn;
use crate::crud::{self, Item};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::images::ImageStore;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;

#[derive(FromForm)]
pub struct FormItem<'a> {
    file: TempFile<'a>,
    #[field(validate = len(1..))]
    item_name: String,
    category: String,
    item_description: Option<String>,
}

#[post("/mycloset", data = "<form_item>")]
pub(crate) async fn upload_item(
    mut form_item: Form<FormItem<'_>>,
    user: UserLoggedIn,
    conn: DbConn,
    images: &State<ImageStore>,
) -> Result<status::Created<Json<Item>>, ErrorResponse> {
    let category = form_item.category.clone();
    let known = conn.run(move |c| crud::get_category(c, &category)).await?;
    if known.is_none() {
        return Err(ErrorResponse::new(
            Status { code: 422 },
            format!("Unknown category {}", form_item.category),
        ));
    }

    let image_url = images.store(&mut form_item.file).await?;

    let user_id = user.0.user_id;
    let item_name = form_item.item_name.clone();
    let description = form_item.item_description.clone();
    let category = form_item.category.clone();
    let url = image_url.clone();

    let created = conn
        .run(move |c| {
            crud::create_item(
                c,
                user_id,
                &item_name,
                description.as_deref(),
                &url,
                &category,
                None,
            )
        })
        .await;

    match created {
        Ok(item) => {
            tracing::info!(item_id = item.item_id, user_id, "item added to closet");
            Ok(status::Created::new("/mycloset").body(Json(item)))
        }
        Err(err) => {
            // the row is the only reference to the image
            images.discard(&image_url).await;
            Err(err.into())
        }
    }
}
