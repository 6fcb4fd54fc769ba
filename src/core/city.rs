//! City business logic - Handles the city reference collection.
//!
//! City names double as the foreign key held by school records, so the
//! rename operation cascades to every referencing school and the delete
//! operation is blocked while references remain. All mutations require an
//! identity that has passed the access gate.

use crate::{
    auth::AccessGate,
    entities::{City, School, city, school},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, Set, prelude::*, sea_query::Expr};
use tracing::info;

/// The result of a rename request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The new name equals the old name; nothing was written
    Unchanged,
    /// The city and its referencing schools were updated
    Renamed {
        /// How many school records were cascaded to the new name
        schools_updated: u64,
    },
}

/// Retrieves every city name from the store, sorted ascending.
///
/// # Errors
/// Returns an error if the store read fails.
pub async fn list_cities(db: &DatabaseConnection) -> Result<Vec<String>> {
    let mut names: Vec<String> = City::find()
        .all(db)
        .await?
        .into_iter()
        .map(|city| city.name)
        .collect();
    names.sort();
    Ok(names)
}

/// Creates a new city after trimming and duplicate checking.
///
/// # Errors
/// - `Error::Unauthorized` without an admin identity
/// - `Error::Validation` for an empty name
/// - `Error::DuplicateCity` when the trimmed name already exists
///   (case-sensitive exact match)
pub async fn add_city(db: &DatabaseConnection, gate: &AccessGate, name: &str) -> Result<city::Model> {
    gate.require_admin()?;

    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "city name cannot be empty".to_string(),
        });
    }

    let exists = City::find()
        .filter(city::Column::Name.eq(name))
        .one(db)
        .await?
        .is_some();
    if exists {
        return Err(Error::DuplicateCity {
            name: name.to_string(),
        });
    }

    let model = city::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    info!(city = %result.name, "city added");
    Ok(result)
}

/// Renames a city and cascades the new name to every referencing school.
///
/// The cascade is two sequential store writes, in order: (a) the city
/// record, (b) a bulk update of every school whose `city` equals the old
/// name. The store offers no multi-document transaction, so a failure
/// between (a) and (b) leaves the city renamed while some schools still
/// point at the old name. Payment records are never touched; they keep
/// their point-in-time city snapshot.
///
/// # Errors
/// - `Error::Unauthorized` without an admin identity
/// - `Error::Validation` for an empty new name
/// - `Error::DuplicateCity` when the new name already belongs to another
///   city
/// - `Error::CityNotFound` when no city has the old name
pub async fn rename_city(
    db: &DatabaseConnection,
    gate: &AccessGate,
    old_name: &str,
    new_name: &str,
) -> Result<RenameOutcome> {
    gate.require_admin()?;

    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(Error::Validation {
            message: "city name cannot be empty".to_string(),
        });
    }

    if new_name == old_name {
        return Ok(RenameOutcome::Unchanged);
    }

    // new_name != old_name, so any record carrying it is another city
    let duplicate = City::find()
        .filter(city::Column::Name.eq(new_name))
        .one(db)
        .await?
        .is_some();
    if duplicate {
        return Err(Error::DuplicateCity {
            name: new_name.to_string(),
        });
    }

    let existing = City::find()
        .filter(city::Column::Name.eq(old_name))
        .one(db)
        .await?
        .ok_or_else(|| Error::CityNotFound {
            name: old_name.to_string(),
        })?;

    let mut active: city::ActiveModel = existing.into();
    active.name = Set(new_name.to_string());
    active.update(db).await?;

    // Second write of the two-phase cascade; a failure here leaves the
    // store partially renamed (city updated, schools not).
    let cascade = School::update_many()
        .col_expr(school::Column::City, Expr::value(new_name))
        .filter(school::Column::City.eq(old_name))
        .exec(db)
        .await?;

    info!(
        old = old_name,
        new = new_name,
        schools = cascade.rows_affected,
        "city renamed"
    );

    Ok(RenameOutcome::Renamed {
        schools_updated: cascade.rows_affected,
    })
}

/// Deletes a city once nothing references it.
///
/// No cascade delete is performed; every referencing school must be updated
/// or deleted first.
///
/// # Errors
/// - `Error::Unauthorized` without an admin identity
/// - `Error::CityInUse` while any school references the city
/// - `Error::CityNotFound` when no city has this name
pub async fn delete_city(db: &DatabaseConnection, gate: &AccessGate, name: &str) -> Result<()> {
    gate.require_admin()?;

    let referencing = School::find()
        .filter(school::Column::City.eq(name))
        .count(db)
        .await?;
    if referencing > 0 {
        return Err(Error::CityInUse {
            name: name.to_string(),
            schools: referencing,
        });
    }

    let existing = City::find()
        .filter(city::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| Error::CityNotFound {
            name: name.to_string(),
        })?;

    existing.delete(db).await?;
    info!(city = name, "city deleted");
    Ok(())
}
