// issuance/src/public_sale.rs

use crate::{config::MintConfig, IssuanceError, IssuanceResult};
use ledger_crypto::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cumulative public-path mints per wallet
///
/// Counts what a wallet has ever minted publicly, not what it currently
/// holds; transferring tokens away never restores quota.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicMintLedger {
    minted: HashMap<Address, u64>,
}

impl PublicMintLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minted_by(&self, caller: &Address) -> u64 {
        self.minted.get(caller).copied().unwrap_or(0)
    }

    /// Check-only: per-transaction and per-wallet caps
    pub fn admit(
        &self,
        caller: &Address,
        requested: u64,
        config: &MintConfig,
    ) -> IssuanceResult<()> {
        if requested > config.per_tx_cap {
            return Err(IssuanceError::PerTxLimitExceeded {
                limit: config.per_tx_cap,
            });
        }
        let after = self
            .minted_by(caller)
            .checked_add(requested)
            .ok_or(IssuanceError::PerWalletLimitExceeded {
                limit: config.per_wallet_cap,
            })?;
        if after > config.per_wallet_cap {
            return Err(IssuanceError::PerWalletLimitExceeded {
                limit: config.per_wallet_cap,
            });
        }
        Ok(())
    }

    /// Record a successful public mint; call only after `admit` passed
    pub fn commit(&mut self, caller: Address, requested: u64) {
        *self.minted.entry(caller).or_insert(0) += requested;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = tag;
        Address::new(bytes)
    }

    #[test]
    fn test_per_tx_cap() {
        let config = MintConfig {
            per_tx_cap: 4,
            per_wallet_cap: 8,
            ..MintConfig::default()
        };
        let ledger = PublicMintLedger::new();

        assert!(matches!(
            ledger.admit(&addr(1), 5, &config),
            Err(IssuanceError::PerTxLimitExceeded { limit: 4 })
        ));
        assert!(ledger.admit(&addr(1), 4, &config).is_ok());
    }

    #[test]
    fn test_per_wallet_cap_is_cumulative() {
        let config = MintConfig::standard();
        let mut ledger = PublicMintLedger::new();
        let caller = addr(1);

        ledger.admit(&caller, 3, &config).unwrap();
        ledger.commit(caller, 3);

        assert!(matches!(
            ledger.admit(&caller, 1, &config),
            Err(IssuanceError::PerWalletLimitExceeded { limit: 3 })
        ));
    }

    #[test]
    fn test_wallets_independent() {
        let config = MintConfig::standard();
        let mut ledger = PublicMintLedger::new();

        ledger.commit(addr(1), 3);
        assert!(ledger.admit(&addr(2), 3, &config).is_ok());
    }
}
