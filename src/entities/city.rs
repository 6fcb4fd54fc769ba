//! City entity - Represents one entry of the city reference collection.
//!
//! The city name is both the display value and the foreign key used by
//! school records, so renames must cascade (see `core::city::rename_city`).
//! Uniqueness of the name is enforced by the workflow layer, not the store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// City database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    /// Store-assigned identifier, never exposed to the presentation layer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique city name (trimmed, case-sensitive)
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
