//! Payment gateway adapter.
//!
//! Wraps the third-party checkout dialog behind a trait so the registration
//! workflow can be exercised without a live gateway. The adapter receives a
//! fully-built request (amount in minor units, prefill, branding) and
//! reports either a completed charge with its opaque token or a dismissal.

use crate::config::gateway::GatewayConfig;
use crate::errors::Result;

/// Everything the checkout dialog is configured with for one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Publishable gateway key
    pub key_id: String,
    /// Charge amount in minor units (paise)
    pub amount_minor: i64,
    /// ISO currency code
    pub currency: String,
    /// Merchant name shown on the dialog
    pub merchant_name: String,
    /// Line-item description shown on the dialog
    pub description: String,
    /// Prefilled customer name
    pub prefill_name: String,
    /// Prefilled customer contact number
    pub prefill_contact: String,
    /// Dialog accent color
    pub theme_color: String,
}

impl CheckoutRequest {
    /// Builds a request from the gateway configuration and the customer
    /// prefill. The configured rupee amount is converted to paise here.
    #[must_use]
    pub fn new(config: &GatewayConfig, prefill_name: &str, prefill_contact: &str) -> Self {
        Self {
            key_id: config.key_id.clone(),
            amount_minor: config.amount * 100,
            currency: config.currency.clone(),
            merchant_name: config.merchant_name.clone(),
            description: config.description.clone(),
            prefill_name: prefill_name.to_string(),
            prefill_contact: prefill_contact.to_string(),
            theme_color: config.theme_color.clone(),
        }
    }
}

/// How one checkout dialog invocation ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The charge completed; the token identifies it at the gateway
    Completed {
        /// Opaque payment token reported by the gateway
        payment_id: String,
    },
    /// The user dismissed the dialog before completing payment
    Dismissed,
}

/// The external checkout component, reduced to the single operation the
/// workflow consumes.
#[allow(async_fn_in_trait)]
pub trait CheckoutGateway {
    /// Opens the checkout dialog and resolves when the user completes or
    /// dismisses it.
    ///
    /// # Errors
    /// Returns `Error::GatewayUnavailable` when the checkout script cannot
    /// be loaded; no charge is attempted in that case.
    async fn open(&self, request: CheckoutRequest) -> Result<CheckoutOutcome>;
}
