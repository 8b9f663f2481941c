use crate::schema::categories;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::Serialize;

#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub category_name: String,
}

pub(crate) fn create_category(conn: &PgConnection, category_name: &str) -> QueryResult<Category> {
    diesel::insert_into(categories::table)
        .values(categories::category_name.eq(category_name))
        .get_result(conn)
}

pub(crate) fn get_category(
    conn: &PgConnection,
    category_name: &str,
) -> QueryResult<Option<Category>> {
    categories::table
        .find(category_name)
        .first::<Category>(conn)
        .optional()
}

pub(crate) fn get_categories(conn: &PgConnection) -> QueryResult<Vec<String>> {
    categories::table
        .select(categories::category_name)
        .order(categories::category_name)
        .load(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;
    use diesel::result::Error;

    #[test]
    #[ignore = "needs a disposable Postgres database in DATABASE_URL"]
    fn created_category_is_listed() {
        let conn = test_support::connection();
        conn.test_transaction::<_, Error, _>(|| {
            let category = create_category(&conn, "Swimwear")?;
            assert_eq!(category.category_name, "Swimwear");
            assert!(get_categories(&conn)?.contains(&"Swimwear".to_string()));
            assert_eq!(get_category(&conn, "Swimwear")?, Some(category));
            assert_eq!(get_category(&conn, "Spacesuits")?, None);
            Ok(())
        });
    }
}
