// ledger-crypto/src/merkle.rs

use crate::{hash::Hashable, Address, CryptoError, CryptoResult, Hash};
use serde::{Deserialize, Serialize};

/// Domain prefix for leaf hashes
const LEAF_PREFIX: u8 = 0x00;
/// Domain prefix for interior node hashes
const NODE_PREFIX: u8 = 0x01;

/// A committed allowlist entry: `account` may claim up to `entitlement`
/// tokens, positioned at `index` in the tree.
///
/// Leaf encoding is fixed: SHA-256 over
/// `0x00 || index (u64 BE) || account (20 bytes) || entitlement (u64 BE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub index: u64,
    pub account: Address,
    pub entitlement: u64,
}

impl Allocation {
    pub fn new(index: u64, account: Address, entitlement: u64) -> Self {
        Self {
            index,
            account,
            entitlement,
        }
    }

    /// Compute the committed leaf hash for this allocation
    pub fn leaf_hash(&self) -> Hash {
        let mut encoded = Vec::with_capacity(1 + 8 + 20 + 8);
        encoded.push(LEAF_PREFIX);
        encoded.extend_from_slice(&self.index.to_be_bytes());
        encoded.extend_from_slice(self.account.as_bytes());
        encoded.extend_from_slice(&self.entitlement.to_be_bytes());
        encoded.hash()
    }
}

/// Combine two sibling hashes into their parent.
///
/// The pair is ordered commutatively (lesser hash first) so that a proof
/// carries no position bits and verification is independent of which side
/// each sibling was on.
fn combine(a: Hash, b: Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut encoded = Vec::with_capacity(1 + 64);
    encoded.push(NODE_PREFIX);
    encoded.extend_from_slice(lo.as_bytes());
    encoded.extend_from_slice(hi.as_bytes());
    encoded.hash()
}

/// Merkle tree committing to a whole allowlist without storing it on the
/// verifying side.
///
/// Levels are kept leaf-first; an odd node at any level is paired with
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerkleTree {
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree over the given allocations, in order
    pub fn from_allocations(allocations: &[Allocation]) -> CryptoResult<Self> {
        let leaves: Vec<Hash> = allocations.iter().map(Allocation::leaf_hash).collect();
        Self::from_leaves(leaves)
    }

    /// Build a tree over precomputed leaf hashes
    pub fn from_leaves(leaves: Vec<Hash>) -> CryptoResult<Self> {
        if leaves.is_empty() {
            return Err(CryptoError::MerkleError("cannot commit to an empty set".into()));
        }

        let mut levels = vec![leaves];
        while levels.last().map(Vec::len).unwrap_or(0) > 1 {
            let prev = levels.last().map(Vec::as_slice).unwrap_or(&[]);
            let mut next = Vec::with_capacity((prev.len() + 1) / 2);
            for pair in prev.chunks(2) {
                let parent = match pair {
                    [a, b] => combine(*a, *b),
                    [a] => combine(*a, *a),
                    _ => unreachable!("chunks(2) yields 1 or 2 items"),
                };
                next.push(parent);
            }
            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// Root commitment of the tree
    pub fn root(&self) -> Hash {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or_else(Hash::zero)
    }

    /// Number of committed leaves
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map(Vec::len).unwrap_or(0)
    }

    /// Sibling path for the leaf at `index`, bottom-up
    pub fn proof(&self, index: usize) -> CryptoResult<Vec<Hash>> {
        if index >= self.leaf_count() {
            return Err(CryptoError::MerkleError(format!(
                "leaf index {} out of bounds for {} leaves",
                index,
                self.leaf_count()
            )));
        }

        let mut path = Vec::new();
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = position ^ 1;
            // an unpaired trailing node is combined with itself
            let sibling_hash = level.get(sibling).copied().unwrap_or(level[position]);
            path.push(sibling_hash);
            position /= 2;
        }

        Ok(path)
    }
}

/// Verify a sibling path against a root commitment.
///
/// Folds the commutative combine up from the leaf; the path needs no
/// left/right annotations.
pub fn verify_proof(root: Hash, leaf: Hash, proof: &[Hash]) -> bool {
    let computed = proof.iter().fold(leaf, |acc, sibling| combine(acc, *sibling));
    computed == root
}
