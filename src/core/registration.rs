//! Registration form and payment workflow.
//!
//! The form is transient session state with two derived-field rules:
//! choosing a city clears the school and language, and choosing a school
//! clears the language (available languages are a function of the chosen
//! school). Submission validates the form, opens the checkout dialog, and
//! on a completed charge settles it into an immutable payment record.

use crate::{
    config::gateway::GatewayConfig,
    core::payment::{PaymentDraft, record_payment},
    entities::{Language, payment, school},
    errors::{Error, Result},
    gateway::{CheckoutGateway, CheckoutOutcome, CheckoutRequest},
};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// The class (standard) vocabulary offered on the form.
pub const CLASSES: [&str; 12] = [
    "1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th", "10th", "11th", "12th",
];

/// The transient registration form. Never persisted; settled into a
/// payment record only after a completed charge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Student name
    pub name: String,
    /// Selected city
    pub city: String,
    /// Selected school (scoped to the city)
    pub school: String,
    /// Selected class, e.g. "5th"
    pub class_name: String,
    /// Optional division, e.g. "A"
    pub division: String,
    /// Contact mobile number
    pub mobile: String,
    /// Selected language (scoped to the school)
    pub language: String,
}

impl RegistrationForm {
    /// Sets the student name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Sets the city. School options are city-scoped, so the current school
    /// and language selections are cleared.
    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
        self.school.clear();
        self.language.clear();
    }

    /// Sets the school. Language options are school-scoped, so the current
    /// language selection is cleared.
    pub fn set_school(&mut self, school: impl Into<String>) {
        self.school = school.into();
        self.language.clear();
    }

    /// Sets the class.
    pub fn set_class(&mut self, class_name: impl Into<String>) {
        self.class_name = class_name.into();
    }

    /// Sets the division.
    pub fn set_division(&mut self, division: impl Into<String>) {
        self.division = division.into();
    }

    /// Sets the mobile number.
    pub fn set_mobile(&mut self, mobile: impl Into<String>) {
        self.mobile = mobile.into();
    }

    /// Sets the language.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Blanks every field, returning the workflow to an empty `Editing`
    /// state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The schools selectable for the currently chosen city; empty until a
    /// city is chosen.
    #[must_use]
    pub fn filtered_schools<'a>(&self, schools: &'a [school::Model]) -> Vec<&'a school::Model> {
        if self.city.is_empty() {
            return Vec::new();
        }
        schools.iter().filter(|s| s.city == self.city).collect()
    }

    /// The languages offered by the currently chosen school; empty until a
    /// school is chosen.
    #[must_use]
    pub fn available_languages<'a>(&self, schools: &'a [school::Model]) -> &'a [Language] {
        self.selected_school(schools)
            .map_or(&[], |s| s.languages.as_slice())
    }

    /// The devotee of the currently chosen school, if any.
    #[must_use]
    pub fn referred_by<'a>(&self, schools: &'a [school::Model]) -> Option<&'a str> {
        self.selected_school(schools).map(|s| s.devotee.as_str())
    }

    fn selected_school<'a>(&self, schools: &'a [school::Model]) -> Option<&'a school::Model> {
        if self.school.is_empty() {
            return None;
        }
        schools.iter().find(|s| s.name == self.school)
    }

    /// Checks every required field is filled; division is optional.
    ///
    /// # Errors
    /// Returns `Error::Validation` naming the missing fields.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("city", &self.city),
            ("school", &self.school),
            ("class", &self.class_name),
            ("mobile", &self.mobile),
            ("language", &self.language),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                message: format!("missing required fields: {}", missing.join(", ")),
            })
        }
    }
}

/// How a submission settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The charge completed and the payment record was written; the form
    /// has been reset to blank
    Completed(payment::Model),
    /// The user dismissed the checkout dialog; nothing was persisted and
    /// the form keeps its entered values
    Cancelled,
}

/// Runs the full submit path: validate, open the checkout dialog, and on a
/// completed charge settle it into a payment record.
///
/// `referred_by` is resolved from the selected school's devotee at this
/// moment; the snapshot never changes afterwards, even if the school is
/// renamed or deleted.
///
/// # Errors
/// - `Error::Validation` when a required field is empty; the gateway is
///   never invoked
/// - `Error::GatewayUnavailable` when the checkout script cannot be loaded
/// - `Error::PaymentNotRecorded` when the charge completed but the record
///   write failed; the charge is NOT retried or reconciled automatically
pub async fn submit<G: CheckoutGateway>(
    db: &DatabaseConnection,
    gateway: &G,
    config: &GatewayConfig,
    schools: &[school::Model],
    form: &mut RegistrationForm,
) -> Result<RegistrationOutcome> {
    form.validate()?;

    let request = CheckoutRequest::new(config, &form.name, &form.mobile);
    match gateway.open(request).await? {
        CheckoutOutcome::Dismissed => {
            info!(name = %form.name, "checkout dismissed before payment");
            Ok(RegistrationOutcome::Cancelled)
        }
        CheckoutOutcome::Completed { payment_id } => {
            let referred_by = form.referred_by(schools).unwrap_or_default().to_string();
            let draft = PaymentDraft {
                name: form.name.clone(),
                city: form.city.clone(),
                school: form.school.clone(),
                class_name: form.class_name.clone(),
                division: form.division.clone(),
                mobile: form.mobile.clone(),
                language: form.language.clone(),
                referred_by,
                amount: config.amount,
                payment_id: payment_id.clone(),
            };

            match record_payment(db, draft).await {
                Ok(record) => {
                    form.reset();
                    Ok(RegistrationOutcome::Completed(record))
                }
                Err(Error::Store(source)) => {
                    warn!(payment_id = %payment_id, "charge completed but record write failed");
                    Err(Error::PaymentNotRecorded { payment_id, source })
                }
                Err(other) => Err(other),
            }
        }
    }
}
