//! Session-scoped application state.
//!
//! One `Session` owns everything a browser session owns: the store
//! connection, the access gate, the transient registration form, and the
//! in-memory mirrors of the three collections. Presentation code reads the
//! mirrors but never mutates them; every mutation flows through a session
//! method, which persists first and then updates the mirrors to match what
//! the store now holds.

use crate::{
    auth::{AccessGate, GateAction, IdentityProvider},
    config::{AppConfig, gateway::GatewayConfig},
    core::{
        city::{self, RenameOutcome},
        payment as payment_ops,
        registration::{self, RegistrationForm, RegistrationOutcome},
        school as school_ops,
        school::SchoolRecord,
    },
    entities::{payment, school},
    errors::Result,
    gateway::CheckoutGateway,
};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// Session-scoped state shared by the registration and admin surfaces.
pub struct Session {
    db: DatabaseConnection,
    gate: AccessGate,
    gateway_config: GatewayConfig,
    form: RegistrationForm,
    cities: Vec<String>,
    schools: Vec<school::Model>,
    payments: Vec<payment::Model>,
}

impl Session {
    /// Opens a session against a connected store: builds the gate from the
    /// configured allow-list and loads the reference data mirrors. The
    /// payments mirror stays empty until an administrator signs in.
    ///
    /// # Errors
    /// Returns an error if the initial reference-data reads fail.
    pub async fn start(db: DatabaseConnection, config: &AppConfig) -> Result<Self> {
        let mut session = Self {
            db,
            gate: AccessGate::new(config.admins.clone()),
            gateway_config: config.gateway.clone(),
            form: RegistrationForm::default(),
            cities: Vec::new(),
            schools: Vec::new(),
            payments: Vec::new(),
        };
        session.refresh_reference_data().await?;
        Ok(session)
    }

    /// The mirrored city names, sorted ascending.
    #[must_use]
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// The mirrored school records.
    #[must_use]
    pub fn schools(&self) -> &[school::Model] {
        &self.schools
    }

    /// The mirrored payment records, newest first. Empty while anonymous.
    #[must_use]
    pub fn payments(&self) -> &[payment::Model] {
        &self.payments
    }

    /// The registration form.
    #[must_use]
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// The registration form, for field edits.
    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    /// The access gate.
    #[must_use]
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Re-reads the city and school mirrors from the store.
    ///
    /// # Errors
    /// Returns an error if either read fails.
    pub async fn refresh_reference_data(&mut self) -> Result<()> {
        self.cities = city::list_cities(&self.db).await?;
        self.schools = school_ops::list_schools(&self.db).await?;
        Ok(())
    }

    /// Re-reads the payments mirror from the store. Admin only.
    ///
    /// # Errors
    /// Returns `Error::Unauthorized` while anonymous, or a store error.
    pub async fn refresh_payments(&mut self) -> Result<()> {
        self.gate.require_admin()?;
        self.payments = payment_ops::list_payments(&self.db).await?;
        Ok(())
    }

    /// Runs the interactive sign-in against the identity provider. A
    /// non-allow-listed identity is signed out of the provider immediately
    /// and the gate stays anonymous; an allow-listed identity loads the
    /// payments mirror.
    ///
    /// # Errors
    /// Returns `Error::Unauthorized` for a non-allow-listed identity, or
    /// whatever the provider/store reported.
    pub async fn sign_in<P: IdentityProvider>(&mut self, provider: &P) -> Result<()> {
        let email = provider.sign_in().await?;
        if let Err(err) = self.gate.on_sign_in(&email) {
            // The authorization verdict outranks a failed cleanup
            if let Err(sign_out_err) = provider.sign_out().await {
                warn!(error = %sign_out_err, "could not end the rejected provider session");
            }
            return Err(err);
        }
        self.refresh_payments().await
    }

    /// Applies an identity-state notification from the provider
    /// subscription. Ends the provider session when the gate demands it;
    /// clears or reloads the payments mirror to match the new state.
    ///
    /// # Errors
    /// Returns an error if the provider sign-out or payments reload fails.
    pub async fn identity_changed<P: IdentityProvider>(
        &mut self,
        provider: &P,
        email: Option<&str>,
    ) -> Result<()> {
        match self.gate.on_identity_changed(email) {
            GateAction::ForceSignOut => {
                self.payments.clear();
                provider.sign_out().await
            }
            GateAction::None => {
                if self.gate.is_admin() {
                    self.refresh_payments().await
                } else {
                    self.payments.clear();
                    Ok(())
                }
            }
        }
    }

    /// Explicit sign-out: ends the provider session and returns the gate to
    /// anonymous.
    ///
    /// # Errors
    /// Returns an error if the provider sign-out fails.
    pub async fn sign_out<P: IdentityProvider>(&mut self, provider: &P) -> Result<()> {
        provider.sign_out().await?;
        self.gate.sign_out();
        self.payments.clear();
        info!("administrator signed out");
        Ok(())
    }

    /// Adds a city and inserts it into the sorted mirror.
    ///
    /// # Errors
    /// See [`city::add_city`].
    pub async fn add_city(&mut self, name: &str) -> Result<()> {
        let created = city::add_city(&self.db, &self.gate, name).await?;
        self.cities.push(created.name);
        self.cities.sort();
        Ok(())
    }

    /// Renames a city and applies the cascade to both mirrors. Payments are
    /// left untouched; settled records keep their snapshot of the old name.
    ///
    /// # Errors
    /// See [`city::rename_city`].
    pub async fn rename_city(&mut self, old_name: &str, new_name: &str) -> Result<RenameOutcome> {
        let outcome = city::rename_city(&self.db, &self.gate, old_name, new_name).await?;
        if let RenameOutcome::Renamed { .. } = outcome {
            let new_name = new_name.trim();
            for name in &mut self.cities {
                if name == old_name {
                    *name = new_name.to_string();
                }
            }
            self.cities.sort();
            for school in &mut self.schools {
                if school.city == old_name {
                    school.city = new_name.to_string();
                }
            }
        }
        Ok(outcome)
    }

    /// Deletes a city and removes it from the mirror.
    ///
    /// # Errors
    /// See [`city::delete_city`].
    pub async fn delete_city(&mut self, name: &str) -> Result<()> {
        city::delete_city(&self.db, &self.gate, name).await?;
        self.cities.retain(|c| c != name);
        Ok(())
    }

    /// Adds a school and appends it to the mirror.
    ///
    /// # Errors
    /// See [`school_ops::add_school`].
    pub async fn add_school(&mut self, record: SchoolRecord) -> Result<()> {
        let created = school_ops::add_school(&self.db, &self.gate, record).await?;
        self.schools.push(created);
        Ok(())
    }

    /// Updates a school and replaces it in the mirror.
    ///
    /// # Errors
    /// See [`school_ops::update_school`].
    pub async fn update_school(&mut self, id: i64, record: SchoolRecord) -> Result<()> {
        let updated = school_ops::update_school(&self.db, &self.gate, id, record).await?;
        if let Some(slot) = self.schools.iter_mut().find(|s| s.id == id) {
            *slot = updated;
        }
        Ok(())
    }

    /// Deletes a school and removes it from the mirror.
    ///
    /// # Errors
    /// See [`school_ops::delete_school`].
    pub async fn delete_school(&mut self, id: i64) -> Result<()> {
        school_ops::delete_school(&self.db, &self.gate, id).await?;
        self.schools.retain(|s| s.id != id);
        Ok(())
    }

    /// Submits the registration form through the checkout gateway. The
    /// payments mirror is not refreshed here; it reloads on the next
    /// admin-gated refresh.
    ///
    /// # Errors
    /// See [`registration::submit`].
    pub async fn submit_registration<G: CheckoutGateway>(
        &mut self,
        gateway: &G,
    ) -> Result<RegistrationOutcome> {
        registration::submit(
            &self.db,
            gateway,
            &self.gateway_config,
            &self.schools,
            &mut self.form,
        )
        .await
    }
}
