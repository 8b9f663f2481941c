use crate::schema::statuses;
use diesel::prelude::*;
use diesel::PgConnection;

/// Status of an item that can be borrowed. New items start here.
pub(crate) const AVAILABLE: &str = "Available";
/// Status of an item that is out on a loan.
pub(crate) const CHECKED_OUT: &str = "Checked Out";

#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct Status {
    pub checkout_status: String,
}

pub(crate) fn create_status(conn: &PgConnection, checkout_status: &str) -> QueryResult<Status> {
    diesel::insert_into(statuses::table)
        .values(statuses::checkout_status.eq(checkout_status))
        .get_result(conn)
}

pub(crate) fn get_statuses(conn: &PgConnection) -> QueryResult<Vec<String>> {
    statuses::table
        .select(statuses::checkout_status)
        .order(statuses::checkout_status)
        .load(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;
    use diesel::result::Error;

    #[test]
    #[ignore = "needs a disposable Postgres database in DATABASE_URL"]
    fn seeded_and_created_statuses_are_listed() {
        let conn = test_support::connection();
        conn.test_transaction::<_, Error, _>(|| {
            let status = create_status(&conn, "Lost")?;
            assert_eq!(status.checkout_status, "Lost");

            let all = get_statuses(&conn)?;
            for expected in [AVAILABLE, CHECKED_OUT, "Lost"] {
                assert!(all.iter().any(|s| s == expected), "missing {}", expected);
            }
            Ok(())
        });
    }
}
