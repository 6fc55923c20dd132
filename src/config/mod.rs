//! Runtime configuration supplied by the hosting application.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    /// Display label only; the core is single-currency.
    pub currency: String,
    /// Name of the payment account created at household registration.
    pub default_account_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            default_account_name: "Primary Account".into(),
        }
    }
}

impl Config {
    pub fn from_json(data: &str) -> Result<Self, CoreError> {
        serde_json::from_str(data).map_err(|err| CoreError::InvalidInput(err.to_string()))
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| CoreError::OperationFailed(err.to_string()))
    }
}
