// issuance/src/allocation.rs

use crate::{IssuanceError, IssuanceResult};
use ledger_crypto::{merkle, Address, Allocation, Hash};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Verify an allocation claim against the committed root
///
/// The leaf is reconstructed from the caller-supplied
/// `(index, account, entitlement)` triple, so a forged entitlement simply
/// fails to hash to a committed leaf.
pub fn check_proof(root: Hash, allocation: &Allocation, proof: &[Hash]) -> IssuanceResult<()> {
    if merkle::verify_proof(root, allocation.leaf_hash(), proof) {
        Ok(())
    } else {
        Err(IssuanceError::InvalidProof)
    }
}

/// Cumulative allowlist consumption per address
///
/// Monotone: entries only grow, are never removed, and survive root
/// rotation. An address placed in a new tree keeps whatever it already
/// claimed counted against its new entitlement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimLedger {
    claimed: HashMap<Address, u64>,
}

impl ClaimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount already claimed by `account`
    pub fn claimed_by(&self, account: &Address) -> u64 {
        self.claimed.get(account).copied().unwrap_or(0)
    }

    /// Check-only: would claiming `requested` more stay within the
    /// entitlement?
    pub fn admit(&self, allocation: &Allocation, requested: u64) -> IssuanceResult<()> {
        let claimed = self.claimed_by(&allocation.account);
        let after = claimed
            .checked_add(requested)
            .ok_or(IssuanceError::ExceedsEntitlement)?;
        if after > allocation.entitlement {
            return Err(IssuanceError::ExceedsEntitlement);
        }
        Ok(())
    }

    /// Consume part of an entitlement; call only after `admit` passed
    pub fn commit(&mut self, account: Address, requested: u64) {
        *self.claimed.entry(account).or_insert(0) += requested;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_crypto::MerkleTree;

    fn addr(tag: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = tag;
        Address::new(bytes)
    }

    #[test]
    fn test_proof_checks_against_root() {
        let allocations = vec![
            Allocation::new(0, addr(1), 1),
            Allocation::new(1, addr(2), 3),
            Allocation::new(2, addr(3), 20),
        ];
        let tree = MerkleTree::from_allocations(&allocations).unwrap();

        let proof = tree.proof(2).unwrap();
        assert!(check_proof(tree.root(), &allocations[2], &proof).is_ok());

        let mut forged = allocations[2];
        forged.entitlement = 500;
        assert!(matches!(
            check_proof(tree.root(), &forged, &proof),
            Err(IssuanceError::InvalidProof)
        ));
    }

    #[test]
    fn test_ledger_enforces_entitlement() {
        let allocation = Allocation::new(0, addr(1), 20);
        let mut ledger = ClaimLedger::new();

        assert!(ledger.admit(&allocation, 21).is_err());
        assert!(ledger.admit(&allocation, 20).is_ok());
        ledger.commit(allocation.account, 20);

        assert_eq!(ledger.claimed_by(&allocation.account), 20);
        assert!(matches!(
            ledger.admit(&allocation, 1),
            Err(IssuanceError::ExceedsEntitlement)
        ));
    }

    #[test]
    fn test_partial_claims_accumulate() {
        let allocation = Allocation::new(0, addr(1), 5);
        let mut ledger = ClaimLedger::new();

        ledger.admit(&allocation, 2).unwrap();
        ledger.commit(allocation.account, 2);
        ledger.admit(&allocation, 3).unwrap();
        ledger.commit(allocation.account, 3);

        assert_eq!(ledger.claimed_by(&allocation.account), 5);
        assert!(ledger.admit(&allocation, 1).is_err());
    }

    #[test]
    fn test_ledger_is_per_address() {
        let a = Allocation::new(0, addr(1), 2);
        let b = Allocation::new(1, addr(2), 2);
        let mut ledger = ClaimLedger::new();

        ledger.commit(a.account, 2);
        assert!(ledger.admit(&a, 1).is_err());
        assert!(ledger.admit(&b, 2).is_ok());
    }
}
