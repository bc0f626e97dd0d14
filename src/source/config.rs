use alloy::primitives::Address;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::source::{exchange_addr, ClientError, MAX_DECIMALS};

pub const DEVELOPMENT: &str = "development";

/// Where the exchange lives and how its results are rendered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Environment name -> node URL.
    pub endpoints: BTreeMap<String, String>,
    pub exchange_address: Address,
    /// Fixed-point scale of LP token amounts.
    pub lp_decimals: u8,
    /// Fractional digits kept when rendering LP amounts.
    pub lp_precision: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut endpoints = BTreeMap::new();
        // Local Ganache
        endpoints.insert(DEVELOPMENT.to_string(), "http://127.0.0.1:7545".to_string());
        Self {
            endpoints,
            exchange_address: exchange_addr(),
            lp_decimals: 18,
            lp_precision: 5,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let config = fs::read_to_string(path).map_err(|e| ClientError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: ClientConfig =
            toml::from_str(&config).map_err(|e| ClientError::InvalidConfig {
                reason: format!("cannot parse {}: {}", path.display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.endpoints.is_empty() {
            return Err(ClientError::InvalidConfig {
                reason: "no endpoints configured".to_string(),
            });
        }
        if let Some((name, _)) = self.endpoints.iter().find(|(_, url)| url.trim().is_empty()) {
            return Err(ClientError::InvalidConfig {
                reason: format!("endpoint for '{}' is empty", name),
            });
        }
        if self.lp_decimals > MAX_DECIMALS {
            return Err(ClientError::InvalidConfig {
                reason: format!("lp_decimals {} exceeds {}", self.lp_decimals, MAX_DECIMALS),
            });
        }
        if self.lp_precision > self.lp_decimals as usize {
            return Err(ClientError::InvalidConfig {
                reason: format!(
                    "lp_precision {} exceeds lp_decimals {}",
                    self.lp_precision, self.lp_decimals
                ),
            });
        }
        Ok(())
    }

    pub fn endpoint(&self, environment: &str) -> Result<&str, ClientError> {
        self.endpoints
            .get(environment)
            .map(String::as_str)
            .ok_or_else(|| ClientError::Configuration {
                environment: environment.to_string(),
            })
    }
}
