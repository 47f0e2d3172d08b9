//! Fee configuration.
//!
//! Shield fees are one value for the whole process; unshield fees are keyed by network. A
//! default `FeeConfig` is explicitly unconfigured and any shield or unshield step run against it
//! fails with a [`ConfigError`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::models::NetworkName;

/// 100% expressed in basis points.
pub const BASIS_POINTS_DENOMINATOR: u32 = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No shield fee set - run initialization first.")]
    MissingShieldFee,
    #[error("No unshield fee set for network {0} - run initialization first.")]
    MissingUnshieldFee(NetworkName),
    #[error("Invalid fee basis points {0}: must be between 0 and 10000")]
    InvalidBasisPoints(u32),
}

fn check_basis_points(basis_points: u32) -> Result<u32, ConfigError> {
    if basis_points > BASIS_POINTS_DENOMINATOR {
        return Err(ConfigError::InvalidBasisPoints(basis_points));
    }
    Ok(basis_points)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    #[serde(default)]
    shield_fee_basis_points: Option<u32>,
    #[serde(default)]
    unshield_fee_basis_points: HashMap<NetworkName, u32>,
}

impl FeeConfig {
    /// A config with no fees set. Shield and unshield steps refuse to run against it.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Sets the shield fee only. Unshield fees must be added per network.
    pub fn new(shield_fee_basis_points: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            shield_fee_basis_points: Some(check_basis_points(shield_fee_basis_points)?),
            unshield_fee_basis_points: HashMap::new(),
        })
    }

    /// Same unshield fee on every known network.
    pub fn uniform(
        shield_fee_basis_points: u32,
        unshield_fee_basis_points: u32,
    ) -> Result<Self, ConfigError> {
        let unshield = check_basis_points(unshield_fee_basis_points)?;
        let mut config = Self::new(shield_fee_basis_points)?;
        config.unshield_fee_basis_points = NetworkName::iter()
            .map(|network| (network, unshield))
            .collect();
        Ok(config)
    }

    pub fn with_unshield_fee(
        mut self,
        network: NetworkName,
        basis_points: u32,
    ) -> Result<Self, ConfigError> {
        self.unshield_fee_basis_points
            .insert(network, check_basis_points(basis_points)?);
        Ok(self)
    }

    pub fn is_configured(&self) -> bool {
        self.shield_fee_basis_points.is_some() && !self.unshield_fee_basis_points.is_empty()
    }

    pub fn shield_fee_basis_points(&self) -> Result<u32, ConfigError> {
        self.shield_fee_basis_points
            .ok_or(ConfigError::MissingShieldFee)
            .and_then(check_basis_points)
    }

    pub fn unshield_fee_basis_points(&self, network: NetworkName) -> Result<u32, ConfigError> {
        self.unshield_fee_basis_points
            .get(&network)
            .copied()
            .ok_or(ConfigError::MissingUnshieldFee(network))
            .and_then(check_basis_points)
    }
}
