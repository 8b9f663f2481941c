use diesel::PgConnection;
use diesel_migrations::RunMigrationsError;
use rocket::fairing;
use rocket::{Build, Rocket};
use rocket_sync_db_pools::database;

#[database("closets")]
pub(crate) struct DbConn(PgConnection);

embed_migrations!();

pub(crate) fn run_migrations(conn: &PgConnection) -> Result<(), RunMigrationsError> {
    embedded_migrations::run(conn)
}

pub(crate) async fn run_db_migrations(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match DbConn::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            tracing::error!("no database connection available for migrations");
            return Err(rocket);
        }
    };

    match conn.run(|c| run_migrations(c)).await {
        Ok(()) => {
            tracing::info!("database migrations applied");
            Ok(rocket)
        }
        Err(err) => {
            tracing::error!(%err, "couldn't run database migrations");
            Err(rocket)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::run_migrations;
    use diesel::prelude::*;
    use diesel::PgConnection;
    use std::sync::Once;

    static SETUP: Once = Once::new();

    fn establish() -> PgConnection {
        dotenv::dotenv().ok();
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        PgConnection::establish(&url).expect("can connect to DATABASE_URL")
    }

    /// Connection to the disposable database named by `DATABASE_URL`. The
    /// first call migrates and seeds it. Tests wrap their work in
    /// `test_transaction` so nothing they do is committed.
    pub(crate) fn connection() -> PgConnection {
        SETUP.call_once(|| {
            let conn = establish();
            run_migrations(&conn).expect("can run migrations");
            crate::seed::seed_lookups(&conn).expect("can seed lookup tables");
        });
        establish()
    }
}
