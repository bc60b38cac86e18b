//! Keccak-256 hasher for allow-list leaves and nodes

use tiny_keccak::{Hasher, Keccak};

use crate::{Hash, HASH_LEN};

/// Keccak-256 hasher
///
/// This is the original Keccak padding used by Ethereum, not NIST SHA3-256.
/// Roots produced with one are not comparable with roots from the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl Keccak256Hasher {
    /// Hash a single value
    pub fn hash(data: &[u8]) -> Hash {
        let mut hasher = Keccak::v256();
        hasher.update(data);
        let mut output = [0u8; HASH_LEN];
        hasher.finalize(&mut output);
        output
    }

    /// Hash an identifier into a leaf
    ///
    /// Surrounding whitespace is not part of the identifier; case is.
    pub fn hash_leaf(identifier: &str) -> Hash {
        Self::hash(identifier.trim().as_bytes())
    }

    /// Hash two 32-byte values together, in the order given
    pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
        let mut hasher = Keccak::v256();
        hasher.update(left);
        hasher.update(right);
        let mut output = [0u8; HASH_LEN];
        hasher.finalize(&mut output);
        output
    }

    /// Hash two nodes with the smaller one on the left.
    ///
    /// Commutative: `hash_sorted_pair(a, b) == hash_sorted_pair(b, a)`.
    pub fn hash_sorted_pair(a: &Hash, b: &Hash) -> Hash {
        if a <= b { Self::hash_pair(a, b) } else { Self::hash_pair(b, a) }
    }
}
