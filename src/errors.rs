//! Unified error types for the registration and administration workflows.
//!
//! Every external-call failure is caught at the workflow boundary and turned
//! into one of these variants; nothing is allowed to propagate as a panic.

use thiserror::Error;

/// All failure modes surfaced by the workflow layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// A required field is missing or a submitted value is invalid.
    #[error("Validation error: {message}")]
    Validation {
        /// Which field(s) failed validation
        message: String,
    },

    /// A city with this name already exists (case-sensitive exact match).
    #[error("City '{name}' already exists")]
    DuplicateCity {
        /// The colliding city name
        name: String,
    },

    /// No city record with this name exists in the store.
    #[error("City '{name}' was not found")]
    CityNotFound {
        /// The missing city name
        name: String,
    },

    /// Deleting the city is blocked while schools still reference it.
    #[error(
        "Cannot delete city '{name}': {schools} school(s) still reference it; update or delete those schools first"
    )]
    CityInUse {
        /// The referenced city name
        name: String,
        /// How many schools still reference it
        schools: u64,
    },

    /// No school record with this id exists in the store.
    #[error("School with id {id} was not found")]
    SchoolNotFound {
        /// The missing school id
        id: i64,
    },

    /// A mutation was attempted without an allow-listed identity.
    #[error("Unauthorized: administrator sign-in required")]
    Unauthorized,

    /// The external checkout script could not be loaded.
    #[error("Checkout could not be loaded; check the internet connection and retry")]
    GatewayUnavailable,

    /// The charge succeeded but the payment record could not be written.
    ///
    /// This is the unrecovered settle-side gap: the token identifies a real
    /// charge that must be reconciled manually from the gateway dashboard.
    #[error(
        "Payment {payment_id} completed but the record could not be saved; reconcile it manually from the gateway dashboard"
    )]
    PaymentNotRecorded {
        /// Opaque token of the already-completed charge
        payment_id: String,
        /// The underlying store failure
        #[source]
        source: sea_orm::DbErr,
    },

    /// Any failure reported by the reference data store.
    #[error("Store error: {0}")]
    Store(#[from] sea_orm::DbErr),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
