//! Payment record business logic.
//!
//! Payments are append-only: a record is written exactly once, at the
//! moment a gateway charge settles, and never updated or deleted. Reads
//! return the collection newest-first.

use crate::{
    entities::{Payment, payment},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// The only status value ever persisted; cancelled or failed charges are
/// never written.
pub const STATUS_SUCCESS: &str = "success";

/// Everything known about a payment at settlement time, before the store
/// assigns an id and the timestamp is taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentDraft {
    /// Student name from the form
    pub name: String,
    /// City from the form (point-in-time snapshot)
    pub city: String,
    /// School from the form (point-in-time snapshot)
    pub school: String,
    /// Class from the form
    pub class_name: String,
    /// Division from the form (may be empty)
    pub division: String,
    /// Mobile number from the form
    pub mobile: String,
    /// Chosen language from the form
    pub language: String,
    /// Devotee of the selected school, resolved at settlement
    pub referred_by: String,
    /// The fixed contest fee in whole rupees
    pub amount: i64,
    /// Opaque token reported by the gateway
    pub payment_id: String,
}

/// Persists a settled payment with status `"success"` and the current
/// instant as its timestamp.
///
/// # Errors
/// Returns an error if the store write fails.
pub async fn record_payment(db: &DatabaseConnection, draft: PaymentDraft) -> Result<payment::Model> {
    let model = payment::ActiveModel {
        name: Set(draft.name),
        city: Set(draft.city),
        school: Set(draft.school),
        class_name: Set(draft.class_name),
        division: Set(draft.division),
        mobile: Set(draft.mobile),
        language: Set(draft.language),
        referred_by: Set(draft.referred_by),
        amount: Set(draft.amount),
        payment_id: Set(draft.payment_id),
        status: Set(STATUS_SUCCESS.to_string()),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    info!(payment_id = %result.payment_id, name = %result.name, "payment recorded");
    Ok(result)
}

/// Retrieves every payment, newest first.
///
/// # Errors
/// Returns an error if the store read fails.
pub async fn list_payments(db: &DatabaseConnection) -> Result<Vec<payment::Model>> {
    Payment::find()
        .order_by_desc(payment::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}
