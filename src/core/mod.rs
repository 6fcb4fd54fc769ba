//! Core business logic - framework-agnostic reference-data, registration,
//! payment, and export operations.

/// City reference-data operations, including the cascade rename
pub mod city;

/// Payment filtering and CSV export
pub mod export;

/// Payment record operations (append-only)
pub mod payment;

/// Registration form, derived-field rules, and the payment workflow
pub mod registration;

/// School reference-data operations
pub mod school;
