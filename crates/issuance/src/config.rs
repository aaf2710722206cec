// issuance/src/config.rs

use crate::{IssuanceError, IssuanceResult};
use serde::{Deserialize, Serialize};

/// Deployment constants for one issuance run
///
/// The whole supply geometry is fixed at construction; nothing here is
/// mutable once an engine exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintConfig {
    /// Hard cap on tokens ever issued, reservation included
    pub max_supply: u64,
    /// Tokens pre-allocated to the team by the one-time reservation
    pub reserve_count: u64,
    /// Maximum tokens per public mint call
    pub per_tx_cap: u64,
    /// Cumulative public-mint cap per wallet
    pub per_wallet_cap: u64,
    /// Length of the whitelist window after activation, in seconds
    pub phase_duration_secs: u64,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            max_supply: 3072,
            reserve_count: 52,
            per_tx_cap: 3,
            per_wallet_cap: 3,
            phase_duration_secs: 86_400, // one day
        }
    }
}

impl MintConfig {
    /// The standard deployment: 3072 supply, 52 reserved, caps of 3
    pub fn standard() -> Self {
        Self::default()
    }

    /// The larger deployment variant: 4096 supply, caps of 4
    pub fn extended() -> Self {
        Self {
            max_supply: 4096,
            reserve_count: 52,
            per_tx_cap: 4,
            per_wallet_cap: 4,
            phase_duration_secs: 86_400,
        }
    }

    /// Reject geometries no deployment could operate under
    pub fn validate(&self) -> IssuanceResult<()> {
        if self.max_supply == 0 {
            return Err(IssuanceError::InvalidConfiguration(
                "max_supply must be nonzero".into(),
            ));
        }
        if self.reserve_count > self.max_supply {
            return Err(IssuanceError::InvalidConfiguration(format!(
                "reserve_count {} exceeds max_supply {}",
                self.reserve_count, self.max_supply
            )));
        }
        if self.per_tx_cap == 0 || self.per_wallet_cap == 0 {
            return Err(IssuanceError::InvalidConfiguration(
                "per-transaction and per-wallet caps must be nonzero".into(),
            ));
        }
        if self.per_tx_cap > self.per_wallet_cap {
            return Err(IssuanceError::InvalidConfiguration(format!(
                "per_tx_cap {} exceeds per_wallet_cap {}",
                self.per_tx_cap, self.per_wallet_cap
            )));
        }
        Ok(())
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_geometry() {
        let config = MintConfig::standard();
        assert_eq!(config.max_supply, 3072);
        assert_eq!(config.reserve_count, 52);
        assert_eq!(config.per_tx_cap, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_extended_geometry() {
        let config = MintConfig::extended();
        assert_eq!(config.max_supply, 4096);
        assert_eq!(config.per_tx_cap, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reserve_larger_than_supply_rejected() {
        let config = MintConfig {
            max_supply: 10,
            reserve_count: 11,
            ..MintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_caps_rejected() {
        let config = MintConfig {
            per_tx_cap: 0,
            ..MintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mint.toml");
        let path = path.to_str().unwrap();

        let config = MintConfig::extended();
        config.to_file(path).unwrap();
        let loaded = MintConfig::from_file(path).unwrap();

        assert_eq!(config, loaded);
    }
}
