//! Shared test utilities.
//!
//! This module provides common helper functions for setting up in-memory
//! test stores, canned reference/payment records matching the demo data,
//! and scripted stand-ins for the two external collaborators (checkout
//! gateway and identity provider).

use crate::{
    auth::{AccessGate, IdentityProvider},
    config::{AppConfig, gateway::GatewayConfig},
    core::{
        payment::PaymentDraft,
        registration::RegistrationForm,
        school::{SchoolRecord, add_school},
    },
    entities::{Language, Languages, payment, school},
    errors::{Error, Result},
    gateway::{CheckoutGateway, CheckoutOutcome, CheckoutRequest},
    session::Session,
};
use sea_orm::DatabaseConnection;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Creates an in-memory `SQLite` store with all collection tables created.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The allow-list used across tests.
pub fn test_allow_list() -> Vec<String> {
    vec![
        "admin@example.com".to_string(),
        "other.admin@example.com".to_string(),
    ]
}

/// A gate with `admin@example.com` signed in.
pub fn admin_gate() -> AccessGate {
    let mut gate = AccessGate::new(test_allow_list());
    gate.on_sign_in("admin@example.com")
        .unwrap_or_else(|_| unreachable!("allow-listed sign-in cannot fail"));
    gate
}

/// A gate with nobody signed in.
pub fn anonymous_gate() -> AccessGate {
    AccessGate::new(test_allow_list())
}

/// Gateway configuration with a test key and the fixed contest defaults.
pub fn test_gateway_config() -> GatewayConfig {
    GatewayConfig::with_key("rzp_test_key")
}

/// Complete application configuration for session tests.
pub fn test_app_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        admins: test_allow_list(),
        gateway: test_gateway_config(),
    }
}

/// A session over a fresh in-memory store with an administrator signed in.
pub async fn admin_session() -> Result<Session> {
    let db = setup_test_db().await?;
    let mut session = Session::start(db, &test_app_config()).await?;
    session
        .sign_in(&ScriptedProvider::new("admin@example.com"))
        .await?;
    Ok(session)
}

/// The demo school from the original seed data.
///
/// # Defaults
/// * `name`: `"Damanwada Government School, Daman"`
/// * `city`: `"Daman"`
/// * `devotee`: `"Suddha Citta Das"`
/// * `languages`: English, Hindi, Gujarati
pub fn demo_school_record() -> SchoolRecord {
    SchoolRecord {
        name: "Damanwada Government School, Daman".to_string(),
        city: "Daman".to_string(),
        devotee: "Suddha Citta Das".to_string(),
        languages: Languages(vec![Language::English, Language::Hindi, Language::Gujarati]),
    }
}

/// Persists the demo school.
pub async fn seed_demo_school(db: &DatabaseConnection, gate: &AccessGate) -> Result<school::Model> {
    add_school(db, gate, demo_school_record()).await
}

/// A registration form filled with the demo student, in selection order.
pub fn filled_form() -> RegistrationForm {
    let mut form = RegistrationForm::default();
    form.set_name("Asha");
    form.set_city("Daman");
    form.set_school("Damanwada Government School, Daman");
    form.set_class("5th");
    form.set_division("A");
    form.set_mobile("9999999999");
    form.set_language("Hindi");
    form
}

/// A payment draft matching [`filled_form`], settled with the given token.
pub fn demo_payment_draft(payment_id: &str) -> PaymentDraft {
    PaymentDraft {
        name: "Asha".to_string(),
        city: "Daman".to_string(),
        school: "Damanwada Government School, Daman".to_string(),
        class_name: "5th".to_string(),
        division: "A".to_string(),
        mobile: "9999999999".to_string(),
        language: "Hindi".to_string(),
        referred_by: "Suddha Citta Das".to_string(),
        amount: 200,
        payment_id: payment_id.to_string(),
    }
}

/// An in-memory payment model for pure-function tests (filtering, export).
pub fn demo_payment_model(payment_id: &str, city: &str, school: &str) -> payment::Model {
    payment::Model {
        id: 0,
        name: "Asha".to_string(),
        city: city.to_string(),
        school: school.to_string(),
        class_name: "5th".to_string(),
        division: "A".to_string(),
        mobile: "9999999999".to_string(),
        language: "Hindi".to_string(),
        referred_by: "Suddha Citta Das".to_string(),
        amount: 200,
        payment_id: payment_id.to_string(),
        status: "success".to_string(),
        timestamp: chrono::Utc::now(),
    }
}

/// A gateway that always resolves to the same scripted outcome, recording
/// every request it receives.
pub struct ScriptedGateway {
    outcome: CheckoutOutcome,
    calls: AtomicUsize,
    last_request: Mutex<Option<CheckoutRequest>>,
}

impl ScriptedGateway {
    /// A gateway whose checkout always completes with the given token.
    pub fn completing(payment_id: &str) -> Self {
        Self {
            outcome: CheckoutOutcome::Completed {
                payment_id: payment_id.to_string(),
            },
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A gateway whose checkout dialog is always dismissed.
    pub fn dismissing() -> Self {
        Self {
            outcome: CheckoutOutcome::Dismissed,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// How many times the checkout dialog was opened.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if the dialog was opened at all.
    pub fn last_request(&self) -> Option<CheckoutRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl CheckoutGateway for ScriptedGateway {
    async fn open(&self, request: CheckoutRequest) -> Result<CheckoutOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_request
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(request);
        Ok(self.outcome.clone())
    }
}

/// A gateway whose checkout script never loads.
pub struct UnavailableGateway;

impl CheckoutGateway for UnavailableGateway {
    async fn open(&self, _request: CheckoutRequest) -> Result<CheckoutOutcome> {
        Err(Error::GatewayUnavailable)
    }
}

/// An identity provider that always signs in as the given email and counts
/// sign-out calls.
pub struct ScriptedProvider {
    email: String,
    fail_sign_out: bool,
    sign_outs: AtomicUsize,
}

impl ScriptedProvider {
    /// A provider whose interactive sign-in resolves to `email`.
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            fail_sign_out: false,
            sign_outs: AtomicUsize::new(0),
        }
    }

    /// A provider whose session cannot be ended; every `sign_out` fails.
    pub fn with_failing_sign_out(email: &str) -> Self {
        Self {
            email: email.to_string(),
            fail_sign_out: true,
            sign_outs: AtomicUsize::new(0),
        }
    }

    /// How many times ending the provider session was attempted.
    pub fn sign_outs(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }
}

impl IdentityProvider for ScriptedProvider {
    async fn sign_in(&self) -> Result<String> {
        Ok(self.email.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out {
            return Err(Error::Config {
                message: "identity provider unreachable".to_string(),
            });
        }
        Ok(())
    }
}
