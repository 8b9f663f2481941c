use crate::crud::{self, AVAILABLE, CHECKED_OUT};
use crate::db::DbConn;
use diesel::PgConnection;
use rocket::fairing;
use rocket::{Build, Rocket};

const STATUSES: [&str; 2] = [AVAILABLE, CHECKED_OUT];

const DEFAULT_CATEGORIES: [&str; 6] = [
    "Tops",
    "Bottoms",
    "Dresses",
    "Outerwear",
    "Shoes",
    "Accessories",
];

/// Inserts the statuses the lending workflow relies on, and a starter set of
/// categories when there are none yet.
pub(crate) fn seed_lookups(conn: &PgConnection) -> diesel::QueryResult<()> {
    let statuses = crud::get_statuses(conn)?;
    for status in STATUSES {
        if !statuses.iter().any(|s| s == status) {
            crud::create_status(conn, status)?;
            tracing::info!(status, "seeded status");
        }
    }

    if crud::get_categories(conn)?.is_empty() {
        for category in DEFAULT_CATEGORIES {
            crud::create_category(conn, category)?;
        }
        tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded categories");
    }

    Ok(())
}

pub(crate) async fn run_seed(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match DbConn::get_one(&rocket).await {
        Some(conn) => conn,
        None => return Err(rocket),
    };

    match conn.run(|c| seed_lookups(c)).await {
        Ok(()) => Ok(rocket),
        Err(err) => {
            tracing::error!(%err, "couldn't seed lookup tables");
            Err(rocket)
        }
    }
}
