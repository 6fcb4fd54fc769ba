//! School business logic - Handles the school reference collection.
//!
//! Schools reference a city by name and carry the devotee and language set
//! used by the registration form. Writes validate field presence and the
//! language set, but deliberately do not check `city` against the live city
//! collection; cascade-on-rename keeps live references consistent instead.

use crate::{
    auth::AccessGate,
    entities::{Languages, School, school},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// The writable fields of a school, as submitted by the admin surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchoolRecord {
    /// Display name of the school
    pub name: String,
    /// Name of the city the school belongs to
    pub city: String,
    /// The devotee who referred the school
    pub devotee: String,
    /// Languages the school offers for the contest
    pub languages: Languages,
}

impl SchoolRecord {
    /// Trims the text fields, removes duplicate languages, and checks the
    /// record is complete.
    ///
    /// # Errors
    /// Returns `Error::Validation` when any text field is empty after
    /// trimming or no language is selected.
    fn into_validated(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        self.city = self.city.trim().to_string();
        self.devotee = self.devotee.trim().to_string();
        self.languages.dedup();

        if self.name.is_empty() || self.city.is_empty() || self.devotee.is_empty() {
            return Err(Error::Validation {
                message: "school name, city, and devotee are all required".to_string(),
            });
        }
        if self.languages.is_empty() {
            return Err(Error::Validation {
                message: "select at least one language".to_string(),
            });
        }

        Ok(self)
    }
}

/// Retrieves every school from the store.
///
/// # Errors
/// Returns an error if the store read fails.
pub async fn list_schools(db: &DatabaseConnection) -> Result<Vec<school::Model>> {
    School::find().all(db).await.map_err(Into::into)
}

/// Creates a new school after validation.
///
/// # Errors
/// - `Error::Unauthorized` without an admin identity
/// - `Error::Validation` for missing fields or an empty language set
pub async fn add_school(
    db: &DatabaseConnection,
    gate: &AccessGate,
    record: SchoolRecord,
) -> Result<school::Model> {
    gate.require_admin()?;
    let record = record.into_validated()?;

    let model = school::ActiveModel {
        name: Set(record.name),
        city: Set(record.city),
        devotee: Set(record.devotee),
        languages: Set(record.languages),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    info!(school = %result.name, city = %result.city, "school added");
    Ok(result)
}

/// Replaces the writable fields of an existing school after validation.
///
/// # Errors
/// - `Error::Unauthorized` without an admin identity
/// - `Error::Validation` for missing fields or an empty language set
/// - `Error::SchoolNotFound` for an unknown id
pub async fn update_school(
    db: &DatabaseConnection,
    gate: &AccessGate,
    id: i64,
    record: SchoolRecord,
) -> Result<school::Model> {
    gate.require_admin()?;
    let record = record.into_validated()?;

    let existing = School::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::SchoolNotFound { id })?;

    let mut active: school::ActiveModel = existing.into();
    active.name = Set(record.name);
    active.city = Set(record.city);
    active.devotee = Set(record.devotee);
    active.languages = Set(record.languages);

    let result = active.update(db).await?;
    info!(school = %result.name, id, "school updated");
    Ok(result)
}

/// Deletes a school unconditionally.
///
/// Payment history is never checked: settled payments keep their
/// denormalized school string even after the record is gone. Deleting an
/// unknown id is a no-op, matching the store's delete semantics.
///
/// # Errors
/// Returns `Error::Unauthorized` without an admin identity.
pub async fn delete_school(db: &DatabaseConnection, gate: &AccessGate, id: i64) -> Result<()> {
    gate.require_admin()?;

    School::delete_by_id(id).exec(db).await?;
    info!(id, "school deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Language;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_school_trims_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let gate = admin_gate();

        let mut record = demo_school_record();
        record.name = format!("  {}  ", record.name);
        record.devotee = format!(" {} ", record.devotee);

        let school = add_school(&db, &gate, record).await?;
        assert_eq!(school.name, "Damanwada Government School, Daman");
        assert_eq!(school.devotee, "Suddha Citta Das");
        Ok(())
    }

    #[tokio::test]
    async fn test_add_school_requires_all_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let gate = admin_gate();

        for blank_field in ["name", "city", "devotee"] {
            let mut record = demo_school_record();
            match blank_field {
                "name" => record.name = "   ".to_string(),
                "city" => record.city = String::new(),
                _ => record.devotee = String::new(),
            }
            let result = add_school(&db, &gate, record).await;
            assert!(
                matches!(result, Err(Error::Validation { message: _ })),
                "expected validation failure for empty {blank_field}"
            );
        }

        assert!(list_schools(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_school_requires_language() -> Result<()> {
        let db = setup_test_db().await?;
        let gate = admin_gate();

        let mut record = demo_school_record();
        record.languages = Languages::default();

        let result = add_school(&db, &gate, record).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_school_dedups_languages() -> Result<()> {
        let db = setup_test_db().await?;
        let gate = admin_gate();

        let mut record = demo_school_record();
        record.languages = Languages(vec![Language::Hindi, Language::Hindi, Language::English]);

        let school = add_school(&db, &gate, record).await?;
        assert_eq!(
            school.languages.as_slice(),
            [Language::Hindi, Language::English]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_add_school_allows_dangling_city_reference() -> Result<()> {
        // The city is deliberately not checked against the live city set
        let db = setup_test_db().await?;
        let gate = admin_gate();

        let mut record = demo_school_record();
        record.city = "Nowhere".to_string();

        let school = add_school(&db, &gate, record).await?;
        assert_eq!(school.city, "Nowhere");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_school_replaces_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let gate = admin_gate();
        let school = seed_demo_school(&db, &gate).await?;

        let updated = update_school(
            &db,
            &gate,
            school.id,
            SchoolRecord {
                name: "Coastal Public School".to_string(),
                city: "Diu".to_string(),
                devotee: "Nitai Das".to_string(),
                languages: Languages(vec![Language::Marathi]),
            },
        )
        .await?;

        assert_eq!(updated.id, school.id);
        assert_eq!(updated.name, "Coastal Public School");
        assert_eq!(updated.city, "Diu");
        assert_eq!(updated.devotee, "Nitai Das");
        assert_eq!(updated.languages.as_slice(), [Language::Marathi]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_school_unknown_id() -> Result<()> {
        let db = setup_test_db().await?;
        let gate = admin_gate();

        let result = update_school(&db, &gate, 999, demo_school_record()).await;
        assert!(matches!(result, Err(Error::SchoolNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_school_is_unconditional() -> Result<()> {
        let db = setup_test_db().await?;
        let gate = admin_gate();
        let school = seed_demo_school(&db, &gate).await?;

        delete_school(&db, &gate, school.id).await?;
        assert!(list_schools(&db).await?.is_empty());

        // Deleting an already-deleted id is a no-op
        delete_school(&db, &gate, school.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_mutations_require_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let anonymous = anonymous_gate();

        assert!(matches!(
            add_school(&db, &anonymous, demo_school_record()).await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            update_school(&db, &anonymous, 1, demo_school_record()).await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            delete_school(&db, &anonymous, 1).await,
            Err(Error::Unauthorized)
        ));

        assert!(list_schools(&db).await?.is_empty());
        Ok(())
    }
}
