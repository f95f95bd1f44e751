//! Row seeding shared by the database helpers

use sea_orm::sea_query::{Alias, Query};
use sea_orm::{ConnectionTrait, DatabaseConnection};

const TEST_PASSWORD_HASH: &str = "$2y$10$test.password.hash.for.fixtures.only";

/// Insert into `users` and return the generated id
pub(crate) async fn insert_user(db: &DatabaseConnection, name: &str, email: &str) -> i32 {
    let stmt = Query::insert()
        .into_table(Alias::new("users"))
        .columns([
            Alias::new("name"),
            Alias::new("email"),
            Alias::new("password"),
        ])
        .values_panic([name.into(), email.into(), TEST_PASSWORD_HASH.into()])
        .returning_col(Alias::new("id"))
        .to_owned();

    let backend = db.get_database_backend();
    let row = db
        .query_one_raw(backend.build(&stmt))
        .await
        .expect("Failed to create test user")
        .expect("Insert did not return the user id");

    row.try_get::<i32>("", "id")
        .expect("Returned user id is not an integer")
}
