use crate::schema::{checkout_items, checkouts};
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct Checkout {
    pub checkout_id: i32,
    pub user_borrowed_by: i32,
    pub checkout_date: NaiveDate,
}

/// One borrowed item within a checkout.
#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct CheckoutItem {
    pub checkout_item_id: i32,
    pub checkout_id: i32,
    pub item_id: i32,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

pub(crate) fn create_checkout(
    conn: &PgConnection,
    user_borrowed_by: i32,
    checkout_date: NaiveDate,
) -> QueryResult<Checkout> {
    diesel::insert_into(checkouts::table)
        .values((
            checkouts::user_borrowed_by.eq(user_borrowed_by),
            checkouts::checkout_date.eq(checkout_date),
        ))
        .get_result(conn)
}

pub(crate) fn create_checkout_item(
    conn: &PgConnection,
    checkout_id: i32,
    item_id: i32,
    due_date: NaiveDate,
) -> QueryResult<CheckoutItem> {
    diesel::insert_into(checkout_items::table)
        .values((
            checkout_items::checkout_id.eq(checkout_id),
            checkout_items::item_id.eq(item_id),
            checkout_items::due_date.eq(due_date),
        ))
        .get_result(conn)
}

pub(crate) fn get_checkouts_by_user(conn: &PgConnection, user_id: i32) -> QueryResult<Vec<Checkout>> {
    checkouts::table
        .filter(checkouts::user_borrowed_by.eq(user_id))
        .order(checkouts::checkout_id)
        .load::<Checkout>(conn)
}

pub(crate) fn get_checkout_items(
    conn: &PgConnection,
    checkout_id: i32,
) -> QueryResult<Vec<CheckoutItem>> {
    checkout_items::table
        .filter(checkout_items::checkout_id.eq(checkout_id))
        .order(checkout_items::checkout_item_id)
        .load::<CheckoutItem>(conn)
}

/// A line item together with the checkout it belongs to.
pub(crate) fn get_checkout_item(
    conn: &PgConnection,
    checkout_item_id: i32,
) -> QueryResult<Option<(CheckoutItem, Checkout)>> {
    checkout_items::table
        .inner_join(checkouts::table)
        .filter(checkout_items::checkout_item_id.eq(checkout_item_id))
        .first::<(CheckoutItem, Checkout)>(conn)
        .optional()
}

/// Line items `user_id` has borrowed and not returned yet.
pub(crate) fn get_open_loans_by_user(
    conn: &PgConnection,
    user_id: i32,
) -> QueryResult<Vec<CheckoutItem>> {
    checkout_items::table
        .inner_join(checkouts::table)
        .filter(checkouts::user_borrowed_by.eq(user_id))
        .filter(checkout_items::return_date.is_null())
        .order(checkout_items::due_date)
        .select(checkout_items::all_columns)
        .load::<CheckoutItem>(conn)
}

/// Open loans of `user_id` whose due date lies before `today`.
pub(crate) fn get_overdue_by_user(
    conn: &PgConnection,
    user_id: i32,
    today: NaiveDate,
) -> QueryResult<Vec<CheckoutItem>> {
    checkout_items::table
        .inner_join(checkouts::table)
        .filter(checkouts::user_borrowed_by.eq(user_id))
        .filter(checkout_items::return_date.is_null())
        .filter(checkout_items::due_date.lt(today))
        .order(checkout_items::due_date)
        .select(checkout_items::all_columns)
        .load::<CheckoutItem>(conn)
}

pub(crate) fn mark_returned(
    conn: &PgConnection,
    checkout_item_id: i32,
    return_date: NaiveDate,
) -> QueryResult<CheckoutItem> {
    diesel::update(checkout_items::table.find(checkout_item_id))
        .set(checkout_items::return_date.eq(Some(return_date)))
        .get_result(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crud::{create_item, create_user};
    use crate::db::test_support;
    use diesel::result::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    #[ignore = "needs a disposable Postgres database in DATABASE_URL"]
    fn loans_stay_open_until_returned() {
        let conn = test_support::connection();
        conn.test_transaction::<_, Error, _>(|| {
            let owner = create_user(&conn, "owner@example.com", "hash", None, None)?;
            let borrower = create_user(&conn, "borrower@example.com", "hash", None, None)?;
            let scarf = create_item(&conn, owner.user_id, "Scarf", None, "/a.jpg", "Accessories", None)?;
            let boots = create_item(&conn, owner.user_id, "Boots", None, "/b.jpg", "Shoes", None)?;

            let checkout = create_checkout(&conn, borrower.user_id, date(2022, 6, 1))?;
            let early = create_checkout_item(&conn, checkout.checkout_id, scarf.item_id, date(2022, 6, 8))?;
            let late = create_checkout_item(&conn, checkout.checkout_id, boots.item_id, date(2022, 6, 20))?;

            assert_eq!(get_checkouts_by_user(&conn, borrower.user_id)?, vec![checkout.clone()]);
            assert_eq!(
                get_checkout_items(&conn, checkout.checkout_id)?,
                vec![early.clone(), late.clone()]
            );
            assert_eq!(
                get_checkout_item(&conn, early.checkout_item_id)?,
                Some((early.clone(), checkout))
            );

            let today = date(2022, 6, 10);
            assert_eq!(get_overdue_by_user(&conn, borrower.user_id, today)?, vec![early.clone()]);

            let returned = mark_returned(&conn, early.checkout_item_id, today)?;
            assert_eq!(returned.return_date, Some(today));
            assert!(get_overdue_by_user(&conn, borrower.user_id, today)?.is_empty());
            assert_eq!(get_open_loans_by_user(&conn, borrower.user_id)?, vec![late]);
            Ok(())
        });
    }
}
