//! School entity - Represents one entry of the school reference collection.
//!
//! Each school belongs to a city (referenced by name), carries the devotee
//! who referred it, and offers a non-empty subset of the fixed language
//! vocabulary. Languages are stored as a JSON column.

use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed vocabulary of contest languages a school can offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// English
    English,
    /// Hindi
    Hindi,
    /// Marathi
    Marathi,
    /// Gujarati
    Gujarati,
    /// Tamil
    Tamil,
    /// Telugu
    Telugu,
}

impl Language {
    /// Every language in the fixed vocabulary, in display order.
    pub const ALL: [Self; 6] = [
        Self::English,
        Self::Hindi,
        Self::Marathi,
        Self::Gujarati,
        Self::Tamil,
        Self::Telugu,
    ];

    /// The canonical display string, identical to the stored JSON value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Marathi => "Marathi",
            Self::Gujarati => "Gujarati",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
        }
    }

    /// Parses a display string back into the vocabulary, `None` for anything
    /// outside it.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.as_str() == value)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of languages a school offers, stored as a JSON array.
///
/// Order is preserved (it is the order the admin picked the languages in);
/// duplicates are removed by [`Languages::dedup`] during validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Languages(pub Vec<Language>);

impl Languages {
    /// True when no language is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The languages as a slice, in selection order.
    #[must_use]
    pub fn as_slice(&self) -> &[Language] {
        &self.0
    }

    /// True when the given language is part of the set.
    #[must_use]
    pub fn contains(&self, language: Language) -> bool {
        self.0.contains(&language)
    }

    /// Removes duplicate entries while preserving first-occurrence order.
    pub fn dedup(&mut self) {
        let mut seen = Vec::with_capacity(self.0.len());
        self.0.retain(|lang| {
            if seen.contains(lang) {
                false
            } else {
                seen.push(*lang);
                true
            }
        });
    }
}

impl From<Vec<Language>> for Languages {
    fn from(languages: Vec<Language>) -> Self {
        Self(languages)
    }
}

/// School database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    /// Store-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the school
    pub name: String,
    /// Name of the referenced city; kept consistent by cascade-on-rename,
    /// not by a store constraint
    pub city: String,
    /// The devotee who referred the school; denormalized into payments
    pub devotee: String,
    /// Non-empty subset of the language vocabulary
    pub languages: Languages,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
