// ledger-crypto/src/lib.rs

//! Cryptographic primitives for the issuance ledger
//!
//! This crate provides:
//! - Hashing functions (SHA256, SHA3, Blake3)
//! - 20-byte account addresses
//! - Allocation merkle tree with order-independent proofs

pub mod address;
pub mod hash;
pub mod merkle;

pub use address::Address;
pub use hash::{Hash, HashAlgorithm, Hashable};
pub use merkle::{Allocation, MerkleTree};

/// Result type for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur during cryptographic operations
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Invalid hash")]
    InvalidHash,

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Merkle tree error: {0}")]
    MerkleError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_basics() {
        // Basic smoke test
        let root = b"commitment".as_slice().hash();
        assert_ne!(root, Hash::zero());
    }
}
