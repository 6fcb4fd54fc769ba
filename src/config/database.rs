//! Store connection and schema creation.
//!
//! The reference data store is reached through `SeaORM`; the three
//! collections (cities, schools, payments) are created from the entity
//! definitions with `Schema::create_table_from_entity`, so the stored shape
//! always matches the Rust struct definitions without manual SQL.

use crate::entities::{City, Payment, School};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the store URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/vec_registry.sqlite".to_string())
}

/// Establishes a connection to the reference data store.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the three collection tables from the entity definitions.
///
/// # Errors
/// Returns an error if any table creation statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let city_table = schema.create_table_from_entity(City);
    let school_table = schema.create_table_from_entity(School);
    let payment_table = schema.create_table_from_entity(Payment);

    db.execute(builder.build(&city_table)).await?;
    db.execute(builder.build(&school_table)).await?;
    db.execute(builder.build(&payment_table)).await?;

    Ok(())
}
