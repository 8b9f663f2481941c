use super::items::Item;
use crate::schema::{carts, items};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct Cart {
    pub cart_id: i32,
    pub item_id: i32,
    pub user_id: i32,
}

pub(crate) fn add_to_cart(conn: &PgConnection, user_id: i32, item_id: i32) -> QueryResult<Cart> {
    diesel::insert_into(carts::table)
        .values((carts::user_id.eq(user_id), carts::item_id.eq(item_id)))
        .get_result(conn)
}

pub(crate) fn is_in_cart(conn: &PgConnection, user_id: i32, item_id: i32) -> QueryResult<bool> {
    diesel::select(exists(
        carts::table
            .filter(carts::user_id.eq(user_id))
            .filter(carts::item_id.eq(item_id)),
    ))
    .get_result(conn)
}

/// Takes one item out of `user_id`'s cart. Returns the number of removed rows.
pub(crate) fn remove_from_cart(conn: &PgConnection, user_id: i32, item_id: i32) -> QueryResult<usize> {
    diesel::delete(
        carts::table
            .filter(carts::user_id.eq(user_id))
            .filter(carts::item_id.eq(item_id)),
    )
    .execute(conn)
}

pub(crate) fn get_cart_by_user(conn: &PgConnection, user_id: i32) -> QueryResult<Vec<Item>> {
    carts::table
        .inner_join(items::table)
        .filter(carts::user_id.eq(user_id))
        .order(carts::cart_id)
        .select(items::all_columns)
        .load::<Item>(conn)
}

pub(crate) fn clear_cart(conn: &PgConnection, user_id: i32) -> QueryResult<usize> {
    diesel::delete(carts::table.filter(carts::user_id.eq(user_id))).execute(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crud::{create_item, create_user};
    use crate::db::test_support;
    use diesel::result::{DatabaseErrorKind, Error};

    #[test]
    #[ignore = "needs a disposable Postgres database in DATABASE_URL"]
    fn cart_holds_items_until_cleared() {
        let conn = test_support::connection();
        conn.test_transaction::<_, Error, _>(|| {
            let owner = create_user(&conn, "owner@example.com", "hash", None, None)?;
            let borrower = create_user(&conn, "borrower@example.com", "hash", None, None)?;
            let item = create_item(&conn, owner.user_id, "Scarf", None, "/a.jpg", "Accessories", None)?;

            let entry = add_to_cart(&conn, borrower.user_id, item.item_id)?;
            assert_eq!(entry.user_id, borrower.user_id);
            assert_eq!(get_cart_by_user(&conn, borrower.user_id)?, vec![item]);
            assert!(get_cart_by_user(&conn, owner.user_id)?.is_empty());

            assert_eq!(clear_cart(&conn, borrower.user_id)?, 1);
            assert!(get_cart_by_user(&conn, borrower.user_id)?.is_empty());
            Ok(())
        });
    }

    #[test]
    #[ignore = "needs a disposable Postgres database in DATABASE_URL"]
    fn single_entry_can_be_removed() {
        let conn = test_support::connection();
        conn.test_transaction::<_, Error, _>(|| {
            let owner = create_user(&conn, "owner@example.com", "hash", None, None)?;
            let borrower = create_user(&conn, "borrower@example.com", "hash", None, None)?;
            let scarf = create_item(&conn, owner.user_id, "Scarf", None, "/a.jpg", "Accessories", None)?;
            let boots = create_item(&conn, owner.user_id, "Boots", None, "/b.jpg", "Shoes", None)?;
            add_to_cart(&conn, borrower.user_id, scarf.item_id)?;
            add_to_cart(&conn, borrower.user_id, boots.item_id)?;

            assert!(is_in_cart(&conn, borrower.user_id, scarf.item_id)?);
            assert!(!is_in_cart(&conn, owner.user_id, scarf.item_id)?);

            assert_eq!(remove_from_cart(&conn, borrower.user_id, scarf.item_id)?, 1);
            assert_eq!(remove_from_cart(&conn, borrower.user_id, scarf.item_id)?, 0);
            assert!(!is_in_cart(&conn, borrower.user_id, scarf.item_id)?);
            assert_eq!(get_cart_by_user(&conn, borrower.user_id)?, vec![boots]);
            Ok(())
        });
    }

    #[test]
    #[ignore = "needs a disposable Postgres database in DATABASE_URL"]
    fn same_item_cannot_be_added_twice() {
        let conn = test_support::connection();
        conn.test_transaction::<_, Error, _>(|| {
            let owner = create_user(&conn, "owner@example.com", "hash", None, None)?;
            let borrower = create_user(&conn, "borrower@example.com", "hash", None, None)?;
            let item = create_item(&conn, owner.user_id, "Scarf", None, "/a.jpg", "Accessories", None)?;
            add_to_cart(&conn, borrower.user_id, item.item_id)?;

            // a failed statement aborts the surrounding transaction, so run it in a savepoint
            let duplicate = conn.transaction(|| add_to_cart(&conn, borrower.user_id, item.item_id));
            assert!(matches!(
                duplicate,
                Err(Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
            ));
            assert_eq!(get_cart_by_user(&conn, borrower.user_id)?.len(), 1);
            Ok(())
        });
    }
}
