// issuance/src/engine.rs

use crate::{
    allocation::{check_proof, ClaimLedger},
    config::MintConfig,
    phase::{ActivationState, MintPhase},
    public_sale::PublicMintLedger,
    IssuanceError, IssuanceResult,
};
use ledger_core::{Collection, Event, EventLog, MintChannel, Timestamp, TokenRange};
use ledger_crypto::{Address, Allocation, Hash};
use serde::{Deserialize, Serialize};

/// Per-call environment: invoking identity, funds attached to the call,
/// and the caller's clock
///
/// The clock is injected rather than read from the host so that phase
/// transitions are testable with simulated time and the engine itself
/// stays deterministic.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    pub caller: Address,
    pub value: u64,
    pub now: Timestamp,
}

impl CallContext {
    pub fn new(caller: Address, now: Timestamp) -> Self {
        Self {
            caller,
            value: 0,
            now,
        }
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }
}

/// The issuance engine: all control state, ledgers, and the token record
///
/// Calls execute serially; every operation performs its checks before its
/// first mutation, so a rejected call leaves the engine byte-for-byte
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuanceEngine {
    administrator: Address,
    config: MintConfig,
    activation: ActivationState,
    /// Zero means no commitment has been set
    merkle_root: Hash,
    claims: ClaimLedger,
    public_ledger: PublicMintLedger,
    collection: Collection,
    reserved: bool,
    treasury: u64,
    events: EventLog,
}

impl IssuanceEngine {
    /// Construct an engine with nothing issued and minting inactive
    pub fn new(administrator: Address, config: MintConfig) -> IssuanceResult<Self> {
        config.validate()?;
        Ok(Self {
            administrator,
            config,
            activation: ActivationState::new(),
            merkle_root: Hash::zero(),
            claims: ClaimLedger::new(),
            public_ledger: PublicMintLedger::new(),
            collection: Collection::new(),
            reserved: false,
            treasury: 0,
            events: EventLog::new(),
        })
    }

    /// Construct and immediately run the team reservation, the way a
    /// production deployment bootstraps
    pub fn deploy(
        administrator: Address,
        config: MintConfig,
        now: Timestamp,
    ) -> IssuanceResult<Self> {
        let mut engine = Self::new(administrator, config)?;
        engine.reserve_tokens(&CallContext::new(administrator, now))?;
        Ok(engine)
    }

    fn ensure_admin(&self, ctx: &CallContext) -> IssuanceResult<()> {
        if ctx.caller != self.administrator {
            return Err(IssuanceError::Unauthorized);
        }
        Ok(())
    }

    /// Remaining capacity check shared by every issuing path
    fn ensure_capacity(&self, requested: u64) -> IssuanceResult<()> {
        let after = self
            .collection
            .total_issued()
            .checked_add(requested)
            .ok_or(IssuanceError::SupplyExceeded)?;
        if after > self.config.max_supply {
            return Err(IssuanceError::SupplyExceeded);
        }
        Ok(())
    }

    /// Drop the activation flag once the cap is reached
    fn halt_if_exhausted(&mut self) {
        if self.collection.total_issued() == self.config.max_supply {
            self.activation.halt();
            self.events.record(Event::SupplyExhausted {
                total: self.config.max_supply,
            });
        }
    }

    // --- Admin control ---

    /// Flip the activation flag; records the activation timestamp on the
    /// off-to-on transition. Returns the new state.
    pub fn toggle_minting(&mut self, ctx: &CallContext) -> IssuanceResult<bool> {
        self.ensure_admin(ctx)?;
        let active = self.activation.toggle(ctx.now);
        self.events.record(Event::MintingToggled {
            active,
            at: ctx.now,
        });
        Ok(active)
    }

    /// Replace the allowlist commitment unconditionally
    ///
    /// The tree is trusted input; no well-formedness validation happens
    /// here. Rotating the root invalidates outstanding proofs for
    /// addresses absent from the new tree, while the claim ledger carries
    /// over untouched.
    pub fn set_merkle_root(&mut self, ctx: &CallContext, root: Hash) -> IssuanceResult<()> {
        self.ensure_admin(ctx)?;
        self.merkle_root = root;
        self.events.record(Event::MerkleRootUpdated { root });
        Ok(())
    }

    pub fn set_base_uri(&mut self, ctx: &CallContext, uri: String) -> IssuanceResult<()> {
        self.ensure_admin(ctx)?;
        self.collection.set_base_uri(uri.clone());
        self.events.record(Event::BaseUriUpdated { uri });
        Ok(())
    }

    pub fn set_contract_uri(&mut self, ctx: &CallContext, uri: String) -> IssuanceResult<()> {
        self.ensure_admin(ctx)?;
        self.collection.set_contract_uri(uri.clone());
        self.events.record(Event::ContractUriUpdated { uri });
        Ok(())
    }

    /// Flip one marketplace operator's pre-authorization. Returns the new
    /// state.
    pub fn toggle_proxy_state(
        &mut self,
        ctx: &CallContext,
        operator: Address,
    ) -> IssuanceResult<bool> {
        self.ensure_admin(ctx)?;
        let approved = self.collection.toggle_proxy(operator);
        self.events.record(Event::ProxyStateToggled { operator, approved });
        Ok(approved)
    }

    /// Drain the accumulated treasury to the administrator, returning the
    /// amount withdrawn
    pub fn withdraw(&mut self, ctx: &CallContext) -> IssuanceResult<u64> {
        self.ensure_admin(ctx)?;
        if self.treasury == 0 {
            return Err(IssuanceError::NoFunds);
        }
        let amount = self.treasury;
        self.treasury = 0;
        self.events.record(Event::Withdrawal {
            to: self.administrator,
            amount,
        });
        Ok(amount)
    }

    // --- Reservation gate ---

    /// One-time team reservation
    ///
    /// Idempotent: once the reservation flag is set, further calls are
    /// silent no-ops returning the empty range. Does not require minting
    /// to be active (it runs at deploy time, before any toggle), and the
    /// reserved tokens count against the cap from the start.
    pub fn reserve_tokens(&mut self, ctx: &CallContext) -> IssuanceResult<TokenRange> {
        self.ensure_admin(ctx)?;
        if self.reserved {
            return Ok(TokenRange::empty());
        }
        self.ensure_capacity(self.config.reserve_count)?;

        let range = self
            .collection
            .issue(self.administrator, self.config.reserve_count)?;
        self.reserved = true;
        self.events.record(Event::TokensIssued {
            to: self.administrator,
            range,
            channel: MintChannel::Reservation,
        });
        self.halt_if_exhausted();
        Ok(range)
    }

    // --- Allowlist mint path ---

    /// Mint against a committed allocation
    ///
    /// Gated on the activation flag only, not the phase: an unconsumed
    /// entitlement remains claimable after the sale goes public.
    pub fn mint_allocated(
        &mut self,
        ctx: &CallContext,
        index: u64,
        account: Address,
        entitlement: u64,
        proof: &[Hash],
        requested: u64,
    ) -> IssuanceResult<TokenRange> {
        if !self.activation.is_active() {
            return Err(IssuanceError::MintingInactive);
        }
        if requested == 0 {
            return Err(IssuanceError::ZeroAmount);
        }
        if self.merkle_root == Hash::zero() {
            return Err(IssuanceError::RootNotSet);
        }
        if ctx.caller != account {
            return Err(IssuanceError::CallerMismatch);
        }

        let allocation = Allocation::new(index, account, entitlement);
        check_proof(self.merkle_root, &allocation, proof)?;
        self.claims.admit(&allocation, requested)?;
        self.ensure_capacity(requested)?;

        let range = self.collection.issue(account, requested)?;
        self.claims.commit(account, requested);
        self.treasury += ctx.value;
        self.events.record(Event::TokensIssued {
            to: account,
            range,
            channel: MintChannel::Allowlist,
        });
        self.halt_if_exhausted();
        Ok(range)
    }

    // --- Public mint path ---

    /// Mint during the public phase, subject to per-transaction and
    /// cumulative per-wallet caps
    pub fn mint_public(&mut self, ctx: &CallContext, requested: u64) -> IssuanceResult<TokenRange> {
        if !self.activation.is_active() {
            return Err(IssuanceError::MintingInactive);
        }
        if requested == 0 {
            return Err(IssuanceError::ZeroAmount);
        }
        if self.current_phase(ctx.now) != MintPhase::Public {
            return Err(IssuanceError::WrongPhase);
        }
        self.public_ledger.admit(&ctx.caller, requested, &self.config)?;
        self.ensure_capacity(requested)?;

        let range = self.collection.issue(ctx.caller, requested)?;
        self.public_ledger.commit(ctx.caller, requested);
        self.treasury += ctx.value;
        self.events.record(Event::TokensIssued {
            to: ctx.caller,
            range,
            channel: MintChannel::Public,
        });
        self.halt_if_exhausted();
        Ok(range)
    }

    // --- Read-only views ---

    pub fn minting_is_active(&self) -> bool {
        self.activation.is_active()
    }

    /// Phase derived from the activation state and the supplied clock
    pub fn current_phase(&self, now: Timestamp) -> MintPhase {
        self.activation
            .phase_at(now, self.config.phase_duration_secs)
    }

    pub fn total_supply(&self) -> u64 {
        self.collection.total_issued()
    }

    pub fn reserved_tokens(&self) -> bool {
        self.reserved
    }

    pub fn proxy_approved(&self, operator: &Address) -> bool {
        self.collection.proxy_approved(operator)
    }

    /// The committed root, if one has been set
    pub fn merkle_root(&self) -> Option<Hash> {
        if self.merkle_root == Hash::zero() {
            None
        } else {
            Some(self.merkle_root)
        }
    }

    pub fn claimed_by(&self, account: &Address) -> u64 {
        self.claims.claimed_by(account)
    }

    pub fn public_minted_by(&self, caller: &Address) -> u64 {
        self.public_ledger.minted_by(caller)
    }

    pub fn treasury_balance(&self) -> u64 {
        self.treasury
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    pub fn administrator(&self) -> Address {
        self.administrator
    }
}
