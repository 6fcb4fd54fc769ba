//! Access control gate and identity-provider seam.
//!
//! The gate is a two-state machine (`Anonymous` / `Admin`) driven by events
//! from an external identity provider. Administrative capability is granted
//! only to identities on the configured allow-list; anything else is treated
//! as unauthenticated and the provider session is ended.

use crate::errors::{Error, Result};
use tracing::{info, warn};

/// An authenticated principal that passed the allow-list check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminIdentity {
    email: String,
}

impl AdminIdentity {
    /// The identity's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// The gate's current state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    /// No administrative capability
    #[default]
    Anonymous,
    /// An allow-listed identity is signed in
    Admin(AdminIdentity),
}

/// What the caller must do after an identity-state notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateAction {
    /// Nothing further to do
    None,
    /// The provider session belongs to a non-allow-listed identity and must
    /// be ended immediately
    ForceSignOut,
}

/// Checks identities against the configured allow-list and tracks whether
/// the session currently holds administrative capability.
#[derive(Clone, Debug)]
pub struct AccessGate {
    allow_list: Vec<String>,
    state: GateState,
}

impl AccessGate {
    /// Creates a gate in the `Anonymous` state for the given allow-list.
    #[must_use]
    pub fn new(allow_list: Vec<String>) -> Self {
        Self {
            allow_list,
            state: GateState::Anonymous,
        }
    }

    /// The current gate state.
    #[must_use]
    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// True while an allow-listed identity is signed in.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.state, GateState::Admin(_))
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&AdminIdentity> {
        match &self.state {
            GateState::Admin(identity) => Some(identity),
            GateState::Anonymous => None,
        }
    }

    /// The signed-in identity, or `Error::Unauthorized`.
    ///
    /// Every store mutation calls this before touching the store.
    ///
    /// # Errors
    /// Returns `Error::Unauthorized` while the gate is `Anonymous`.
    pub fn require_admin(&self) -> Result<&AdminIdentity> {
        self.identity().ok_or(Error::Unauthorized)
    }

    fn is_allowed(&self, email: &str) -> bool {
        self.allow_list.iter().any(|allowed| allowed == email)
    }

    /// Handles a completed interactive sign-in.
    ///
    /// An allow-listed identity transitions the gate to `Admin`; any other
    /// identity leaves it `Anonymous` and the caller must end the provider
    /// session.
    ///
    /// # Errors
    /// Returns `Error::Unauthorized` when the identity is not allow-listed.
    pub fn on_sign_in(&mut self, email: &str) -> Result<()> {
        if self.is_allowed(email) {
            info!(email, "administrator signed in");
            self.state = GateState::Admin(AdminIdentity {
                email: email.to_string(),
            });
            Ok(())
        } else {
            warn!(email, "sign-in rejected: identity is not an administrator");
            self.state = GateState::Anonymous;
            Err(Error::Unauthorized)
        }
    }

    /// Handles an identity-state notification from the provider
    /// subscription. This is the defensive re-check run on every state
    /// change: a session that no longer maps to an allow-listed identity is
    /// demoted, and a live provider session for a non-allow-listed identity
    /// must be ended.
    pub fn on_identity_changed(&mut self, email: Option<&str>) -> GateAction {
        match email {
            Some(email) if self.is_allowed(email) => {
                self.state = GateState::Admin(AdminIdentity {
                    email: email.to_string(),
                });
                GateAction::None
            }
            Some(email) => {
                warn!(email, "identity is not an administrator; forcing sign-out");
                self.state = GateState::Anonymous;
                GateAction::ForceSignOut
            }
            None => {
                self.state = GateState::Anonymous;
                GateAction::None
            }
        }
    }

    /// Explicit sign-out back to `Anonymous`.
    pub fn sign_out(&mut self) {
        self.state = GateState::Anonymous;
    }
}

/// The external identity provider, reduced to the two operations the core
/// consumes. Implementations wrap the provider SDK's interactive popup and
/// session teardown.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Runs the interactive sign-in and resolves to the identity's email.
    async fn sign_in(&self) -> Result<String>;

    /// Ends the provider session.
    async fn sign_out(&self) -> Result<()>;
}
