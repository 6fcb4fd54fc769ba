//! Payment entity - Represents one settled registration payment.
//!
//! Payments are immutable once created; there is no update or delete path.
//! `city`, `school`, and `referred_by` are point-in-time snapshots of the
//! form and reference data at settlement, so later renames never rewrite
//! payment history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Store-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Student name as entered on the form
    pub name: String,
    /// City name at submission time (not retroactively renamed)
    pub city: String,
    /// School name at submission time
    pub school: String,
    /// Class (standard) the student is in, e.g. "5th"
    #[sea_orm(column_name = "class")]
    pub class_name: String,
    /// Optional division within the class, e.g. "A"
    pub division: String,
    /// Contact mobile number
    pub mobile: String,
    /// Chosen contest language
    pub language: String,
    /// Snapshot of the selected school's devotee at settlement
    pub referred_by: String,
    /// Fixed contest fee in whole rupees
    pub amount: i64,
    /// Opaque token reported by the payment gateway
    pub payment_id: String,
    /// Always `"success"`; failed or dismissed charges are never persisted
    pub status: String,
    /// Creation instant of the record
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
