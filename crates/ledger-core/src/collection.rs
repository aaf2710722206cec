// ledger-core/src/collection.rs

use crate::{types::*, LedgerError, LedgerResult};
use ledger_crypto::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sequential issuance record for the collectible set
///
/// Tracks owner-at-issuance per token id. Transfers happen in an external
/// layer; this record is the issuance-side interface to it and is never
/// updated after a token leaves the mint. Ids are assigned as a strictly
/// increasing sequence starting at 1, with no gaps and no reuse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Owner each token was issued to
    owners: HashMap<TokenId, Address>,
    /// Tokens issued per address, across all mint channels
    issued_counts: HashMap<Address, u64>,
    /// Next id to assign
    next_id: TokenId,
    /// Metadata base, prepended to the decimal token id
    base_uri: String,
    /// Collection-level metadata pointer
    contract_uri: String,
    /// Marketplace operators pre-authorized by the administrator,
    /// consulted by the external transfer layer
    proxy_approvals: HashMap<Address, bool>,
}

impl Collection {
    pub fn new() -> Self {
        Self {
            owners: HashMap::new(),
            issued_counts: HashMap::new(),
            next_id: 1,
            base_uri: String::new(),
            contract_uri: String::new(),
            proxy_approvals: HashMap::new(),
        }
    }

    /// Assign the next `amount` sequential ids to `to`
    ///
    /// Returns the inclusive id range issued. The caller is responsible
    /// for supply-cap enforcement; this record only guarantees the
    /// sequencing invariant.
    pub fn issue(&mut self, to: Address, amount: u64) -> LedgerResult<TokenRange> {
        if amount == 0 {
            return Ok(TokenRange::empty());
        }

        let first = self.next_id;
        let last = first
            .checked_add(amount - 1)
            .ok_or(LedgerError::IdSpaceExhausted)?;
        let next = last.checked_add(1).ok_or(LedgerError::IdSpaceExhausted)?;

        let count = self.issued_counts.entry(to).or_insert(0);
        *count = count
            .checked_add(amount)
            .ok_or(LedgerError::CountOverflow(to))?;

        for id in first..=last {
            self.owners.insert(id, to);
        }
        self.next_id = next;

        Ok(TokenRange::new(first, last))
    }

    /// Total tokens issued so far
    pub fn total_issued(&self) -> u64 {
        self.next_id - 1
    }

    /// Owner the token was issued to
    pub fn owner_of(&self, id: TokenId) -> LedgerResult<Address> {
        self.owners
            .get(&id)
            .copied()
            .ok_or(LedgerError::UnknownToken(id))
    }

    /// Tokens ever issued to `address` (not its current balance)
    pub fn issued_by(&self, address: &Address) -> u64 {
        self.issued_counts.get(address).copied().unwrap_or(0)
    }

    pub fn set_base_uri(&mut self, uri: String) {
        self.base_uri = uri;
    }

    pub fn set_contract_uri(&mut self, uri: String) {
        self.contract_uri = uri;
    }

    /// Metadata URI for a token id: base URI + decimal id
    ///
    /// Resolves for any id, issued or not, matching the external metadata
    /// layer's behavior.
    pub fn token_uri(&self, id: TokenId) -> String {
        format!("{}{}", self.base_uri, id)
    }

    pub fn contract_uri(&self) -> &str {
        &self.contract_uri
    }

    /// Flip the proxy approval entry for `operator`, returning the new state
    pub fn toggle_proxy(&mut self, operator: Address) -> bool {
        let entry = self.proxy_approvals.entry(operator).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn proxy_approved(&self, operator: &Address) -> bool {
        self.proxy_approvals.get(operator).copied().unwrap_or(false)
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}
