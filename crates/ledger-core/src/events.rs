// ledger-core/src/events.rs

use crate::types::*;
use ledger_crypto::{Address, Hash};
use serde::{Deserialize, Serialize};

/// Which gate issued a batch of tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintChannel {
    /// One-time team reservation
    Reservation,
    /// Merkle-proof-gated allowlist claim
    Allowlist,
    /// Capped public sale
    Public,
}

/// Observable engine state changes, in occurrence order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    MintingToggled {
        active: bool,
        at: Timestamp,
    },
    MerkleRootUpdated {
        root: Hash,
    },
    TokensIssued {
        to: Address,
        range: TokenRange,
        channel: MintChannel,
    },
    SupplyExhausted {
        total: u64,
    },
    BaseUriUpdated {
        uri: String,
    },
    ContractUriUpdated {
        uri: String,
    },
    ProxyStateToggled {
        operator: Address,
        approved: bool,
    },
    Withdrawal {
        to: Address,
        amount: u64,
    },
}

/// Append-only log of engine events
///
/// Appends also emit a tracing line, so a subscriber sees transitions as
/// they happen while the log itself stays queryable after the fact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: Event) {
        match &event {
            Event::MintingToggled { active, at } => {
                tracing::info!(active, at, "minting toggled");
            }
            Event::MerkleRootUpdated { root } => {
                tracing::info!(%root, "merkle root updated");
            }
            Event::TokensIssued { to, range, channel } => {
                tracing::info!(
                    %to,
                    first = range.first,
                    last = range.last,
                    ?channel,
                    "tokens issued"
                );
            }
            Event::SupplyExhausted { total } => {
                tracing::warn!(total, "max supply reached, minting halted");
            }
            Event::BaseUriUpdated { uri } => {
                tracing::info!(%uri, "base URI updated");
            }
            Event::ContractUriUpdated { uri } => {
                tracing::info!(%uri, "contract URI updated");
            }
            Event::ProxyStateToggled { operator, approved } => {
                tracing::info!(%operator, approved, "proxy state toggled");
            }
            Event::Withdrawal { to, amount } => {
                tracing::info!(%to, amount, "treasury withdrawn");
            }
        }
        self.entries.push(event);
    }

    pub fn entries(&self) -> &[Event] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Issuance events only, in order
    pub fn issuances(&self) -> impl Iterator<Item = (&Address, &TokenRange, MintChannel)> {
        self.entries.iter().filter_map(|event| match event {
            Event::TokensIssued { to, range, channel } => Some((to, range, *channel)),
            _ => None,
        })
    }
}
