//! Payment gateway configuration from environment variables.
//!
//! Only the publishable key comes from the environment; the contest fee,
//! currency, and checkout branding are fixed properties of the contest.

use crate::errors::{Error, Result};

/// The fixed contest fee in whole rupees.
pub const CONTEST_FEE_INR: i64 = 200;

/// Settings handed to the checkout dialog on every invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Publishable gateway key identifying the merchant account
    pub key_id: String,
    /// Fee charged per registration, in whole rupees
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
    /// Merchant name shown on the checkout dialog
    pub merchant_name: String,
    /// Line-item description shown on the checkout dialog
    pub description: String,
    /// Checkout dialog accent color
    pub theme_color: String,
}

impl GatewayConfig {
    /// Builds the configuration around a publishable key, with the fixed
    /// contest fee and branding.
    #[must_use]
    pub fn with_key(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            amount: CONTEST_FEE_INR,
            currency: "INR".to_string(),
            merchant_name: "JIVADAYA - Value Education Contest".to_string(),
            description: "VEC Kit Payment".to_string(),
            theme_color: "#F97316".to_string(),
        }
    }

    /// Loads the gateway configuration, taking the publishable key from the
    /// `RAZORPAY_KEY_ID` environment variable.
    ///
    /// # Errors
    /// Returns an error if the key is not set.
    pub fn from_env() -> Result<Self> {
        let key_id = std::env::var("RAZORPAY_KEY_ID").map_err(|_| Error::Config {
            message: "RAZORPAY_KEY_ID is not set".to_string(),
        })?;

        Ok(Self::with_key(key_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_key_uses_contest_defaults() {
        let config = GatewayConfig::with_key("rzp_test_key");

        assert_eq!(config.key_id, "rzp_test_key");
        assert_eq!(config.amount, 200);
        assert_eq!(config.currency, "INR");
        assert_eq!(config.merchant_name, "JIVADAYA - Value Education Contest");
        assert_eq!(config.description, "VEC Kit Payment");
        assert_eq!(config.theme_color, "#F97316");
    }
}
