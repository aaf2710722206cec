// issuance/src/snapshot.rs

//! Whole-engine snapshots
//!
//! Engine state is process-lifetime; snapshots let a deployment carry it
//! across restarts. Loading reproduces every observable view, the event
//! log included.

use crate::engine::IssuanceEngine;
use anyhow::Context;
use std::path::Path;

impl IssuanceEngine {
    /// Serialize the full engine state to `path`
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let bytes = bincode::serialize(self).context("serializing engine snapshot")?;
        std::fs::write(path.as_ref(), bytes)
            .with_context(|| format!("writing snapshot to {}", path.as_ref().display()))?;
        tracing::info!(path = %path.as_ref().display(), "snapshot saved");
        Ok(())
    }

    /// Restore an engine from a snapshot written by `save_snapshot`
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .with_context(|| format!("reading snapshot from {}", path.as_ref().display()))?;
        let engine = bincode::deserialize(&bytes).context("deserializing engine snapshot")?;
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CallContext, MintConfig};
    use ledger_crypto::{Address, Allocation, MerkleTree};

    fn addr(tag: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = tag;
        Address::new(bytes)
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let admin = addr(0xad);
        let mut engine = IssuanceEngine::deploy(admin, MintConfig::standard(), 0).unwrap();
        engine.toggle_minting(&CallContext::new(admin, 1_000)).unwrap();

        let allocations = vec![Allocation::new(0, addr(1), 3)];
        let tree = MerkleTree::from_allocations(&allocations).unwrap();
        engine
            .set_merkle_root(&CallContext::new(admin, 1_000), tree.root())
            .unwrap();
        let proof = tree.proof(0).unwrap();
        engine
            .mint_allocated(
                &CallContext::new(addr(1), 1_000).with_value(10),
                0,
                addr(1),
                3,
                &proof,
                2,
            )
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.snapshot");
        engine.save_snapshot(&path).unwrap();
        let restored = IssuanceEngine::load_snapshot(&path).unwrap();

        assert_eq!(restored.administrator(), engine.administrator());
        assert_eq!(restored.total_supply(), engine.total_supply());
        assert_eq!(restored.claimed_by(&addr(1)), 2);
        assert_eq!(restored.treasury_balance(), 10);
        assert_eq!(restored.minting_is_active(), engine.minting_is_active());
        assert_eq!(restored.merkle_root(), engine.merkle_root());
        assert_eq!(restored.events().len(), engine.events().len());
        assert_eq!(
            restored.collection().owner_of(53).unwrap(),
            engine.collection().owner_of(53).unwrap()
        );
    }

    #[test]
    fn test_restored_engine_keeps_enforcing() {
        let admin = addr(0xad);
        let mut engine = IssuanceEngine::deploy(admin, MintConfig::standard(), 0).unwrap();
        engine.toggle_minting(&CallContext::new(admin, 1_000)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.snapshot");
        engine.save_snapshot(&path).unwrap();

        let mut restored = IssuanceEngine::load_snapshot(&path).unwrap();
        let later = 1_000 + 86_400;
        restored
            .mint_public(&CallContext::new(addr(7), later), 3)
            .unwrap();
        assert!(restored
            .mint_public(&CallContext::new(addr(7), later), 1)
            .is_err());
    }

    #[test]
    fn test_missing_snapshot_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.snapshot");
        assert!(IssuanceEngine::load_snapshot(&path).is_err());
    }
}
