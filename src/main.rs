mod accounts;
mod api;
mod crud;
mod db;
mod error;
mod images;
mod lending;
mod schema;
mod seed;
mod settings;
mod tracing_setup;

#[macro_use]
extern crate rocket;
#[macro_use]
extern crate diesel;
extern crate dotenv;
#[macro_use]
extern crate diesel_migrations;

use api::user_management::sessions::UserSession;
use db::DbConn;
use images::ImageStore;
use rocket::fairing::{self, AdHoc};
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use settings::Settings;

#[get("/")]
fn index() -> &'static str {
    "Welcome to Wear my Closet!"
}

async fn load_settings(rocket: Rocket<Build>) -> fairing::Result {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(%err, "invalid settings");
            return Err(rocket);
        }
    };

    let images = ImageStore::from_settings(&settings);
    if let Err(err) = rocket::tokio::fs::create_dir_all(images.folder()).await {
        tracing::error!(%err, folder = %settings.image_folder, "couldn't create image folder");
        return Err(rocket);
    }

    tracing::info!(
        image_folder = %settings.image_folder,
        loan_days = settings.loan_days,
        "settings loaded"
    );

    let files = FileServer::from(images.folder());
    let base_url = settings.image_base_url.clone();

    Ok(rocket
        .mount(base_url.as_str(), files)
        .manage(images)
        .manage(settings))
}

#[launch]
fn rocket() -> _ {
    dotenv::dotenv().ok();
    tracing_setup::init_tracing();

    rocket::build()
        .attach(DbConn::fairing())
        .attach(AdHoc::try_on_ignite("Settings", load_settings))
        .attach(AdHoc::try_on_ignite("Database Migrations", db::run_db_migrations))
        .attach(AdHoc::try_on_ignite("Lookup Seeding", seed::run_seed))
        .manage(UserSession::new())
        .mount("/", routes![index])
        .mount("/", api::routes())
        .register("/", catchers![error::unauthorised, error::default_catcher])
}
