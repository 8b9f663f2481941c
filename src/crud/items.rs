use super::statuses::AVAILABLE;
use crate::schema::{community_members, items};
use diesel::prelude::*;
use diesel::PgConnection;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub item_id: i32,
    pub user_id: i32,
    pub item_name: String,
    pub item_description: Option<String>,
    pub image_url: String,
    pub category_name: String,
    pub status_code: String,
}

#[derive(Insertable)]
#[table_name = "items"]
struct NewItem<'a> {
    user_id: i32,
    item_name: &'a str,
    item_description: Option<&'a str>,
    image_url: &'a str,
    category_name: &'a str,
    status_code: &'a str,
}

/// Inserts an item into `user_id`'s closet. Without an explicit status the
/// item is `Available`.
pub(crate) fn create_item(
    conn: &PgConnection,
    user_id: i32,
    item_name: &str,
    item_description: Option<&str>,
    image_url: &str,
    category_name: &str,
    status_code: Option<&str>,
) -> QueryResult<Item> {
    let new_item = NewItem {
        user_id,
        item_name,
        item_description,
        image_url,
        category_name,
        status_code: status_code.unwrap_or(AVAILABLE),
    };

    diesel::insert_into(items::table)
        .values(&new_item)
        .get_result(conn)
}

pub(crate) fn get_item_by_item_name(conn: &PgConnection, item_name: &str) -> QueryResult<Option<Item>> {
    items::table
        .filter(items::item_name.eq(item_name))
        .first::<Item>(conn)
        .optional()
}

pub(crate) fn get_item_by_item_id(conn: &PgConnection, item_id: i32) -> QueryResult<Option<Item>> {
    items::table.find(item_id).first::<Item>(conn).optional()
}

/// Image URLs of every item `user_id` owns.
pub(crate) fn get_items_by_user(conn: &PgConnection, user_id: i32) -> QueryResult<Vec<String>> {
    items::table
        .filter(items::user_id.eq(user_id))
        .order(items::item_id)
        .select(items::image_url)
        .load(conn)
}

pub(crate) fn get_closet(conn: &PgConnection, user_id: i32) -> QueryResult<Vec<Item>> {
    items::table
        .filter(items::user_id.eq(user_id))
        .order(items::item_id)
        .load::<Item>(conn)
}

/// Items owned by any member of the community.
pub(crate) fn get_items_by_community(
    conn: &PgConnection,
    community_id: i32,
) -> QueryResult<Vec<Item>> {
    items::table
        .inner_join(community_members::table.on(community_members::user_id.eq(items::user_id)))
        .filter(community_members::community_id.eq(community_id))
        .select(items::all_columns)
        .distinct()
        .order(items::item_id)
        .load::<Item>(conn)
}

pub(crate) fn set_item_status(
    conn: &PgConnection,
    item_id: i32,
    status_code: &str,
) -> QueryResult<Item> {
    diesel::update(items::table.find(item_id))
        .set(items::status_code.eq(status_code))
        .get_result(conn)
}

/// Moves an item from status `from` to `to` in one statement. `None` when the
/// item is not in status `from`, so nothing was changed.
pub(crate) fn transition_item_status(
    conn: &PgConnection,
    item_id: i32,
    from: &str,
    to: &str,
) -> QueryResult<Option<Item>> {
    diesel::update(
        items::table
            .filter(items::item_id.eq(item_id))
            .filter(items::status_code.eq(from)),
    )
    .set(items::status_code.eq(to))
    .get_result(conn)
    .optional()
}
