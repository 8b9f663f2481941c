use crate::schema::{communities, community_members};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct Community {
    pub community_id: i32,
    pub community_name: String,
    pub community_description: Option<String>,
    pub location: Option<String>,
}

#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct CommunityMember {
    pub community_member_id: i32,
    pub community_id: i32,
    pub user_id: i32,
}

#[derive(Insertable)]
#[table_name = "communities"]
struct NewCommunity<'a> {
    community_name: &'a str,
    community_description: Option<&'a str>,
    location: Option<&'a str>,
}

pub(crate) fn create_community(
    conn: &PgConnection,
    community_name: &str,
    community_description: Option<&str>,
    location: Option<&str>,
) -> QueryResult<Community> {
    let new_community = NewCommunity {
        community_name,
        community_description,
        location,
    };

    diesel::insert_into(communities::table)
        .values(&new_community)
        .get_result(conn)
}

pub(crate) fn get_all_communities(conn: &PgConnection) -> QueryResult<Vec<Community>> {
    communities::table
        .order(communities::community_id)
        .load::<Community>(conn)
}

pub(crate) fn get_community_by_id(
    conn: &PgConnection,
    community_id: i32,
) -> QueryResult<Option<Community>> {
    communities::table
        .find(community_id)
        .first::<Community>(conn)
        .optional()
}

pub(crate) fn get_community_by_name(
    conn: &PgConnection,
    community_name: &str,
) -> QueryResult<Option<Community>> {
    communities::table
        .filter(communities::community_name.eq(community_name))
        .first::<Community>(conn)
        .optional()
}

pub(crate) fn create_community_member(
    conn: &PgConnection,
    community_id: i32,
    user_id: i32,
) -> QueryResult<CommunityMember> {
    diesel::insert_into(community_members::table)
        .values((
            community_members::community_id.eq(community_id),
            community_members::user_id.eq(user_id),
        ))
        .get_result(conn)
}

pub(crate) fn is_member(conn: &PgConnection, community_id: i32, user_id: i32) -> QueryResult<bool> {
    diesel::select(exists(
        community_members::table
            .filter(community_members::community_id.eq(community_id))
            .filter(community_members::user_id.eq(user_id)),
    ))
    .get_result(conn)
}

/// Names of the communities `user_id` belongs to.
pub(crate) fn get_communities_by_user(conn: &PgConnection, user_id: i32) -> QueryResult<Vec<String>> {
    community_members::table
        .inner_join(communities::table)
        .filter(community_members::user_id.eq(user_id))
        .order(community_members::community_member_id)
        .select(communities::community_name)
        .load(conn)
}

/// Ids of the members of every community called `community_name`.
pub(crate) fn get_users_by_community(
    conn: &PgConnection,
    community_name: &str,
) -> QueryResult<Vec<i32>> {
    community_members::table
        .inner_join(communities::table)
        .filter(communities::community_name.eq(community_name))
        .order(community_members::community_member_id)
        .select(community_members::user_id)
        .load(conn)
}
