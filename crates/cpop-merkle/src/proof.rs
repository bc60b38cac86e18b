//! Inclusion proof generation output and verification

use serde::{Deserialize, Serialize};

use crate::{decode_hash, encoding, hasher::Keccak256Hasher, EncodingError, Hash};

/// Allow-list inclusion proof
///
/// Sibling hashes from leaf to root. Pairs are combined in sorted order, so no
/// left/right tags are needed. Serializes as a JSON array of `0x` hex strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    #[serde(with = "encoding::hex_hashes")]
    siblings: Vec<Hash>,
}

impl MerkleProof {
    /// Create a proof from an ordered sibling path
    pub const fn new(siblings: Vec<Hash>) -> Self {
        Self { siblings }
    }

    /// Decode a proof received as hex strings
    pub fn from_hex<S: AsRef<str>>(encoded: &[S]) -> Result<Self, EncodingError> {
        encoding::decode_proof(encoded).map(Self::new)
    }

    /// Sibling hashes, leaf level first
    pub fn siblings(&self) -> &[Hash] {
        &self.siblings
    }

    /// Number of siblings
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// True for a single-leaf tree's proof
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Encode siblings for transport
    pub fn to_hex(&self) -> Vec<String> {
        encoding::encode_proof(&self.siblings)
    }

    /// Take the sibling path
    pub fn into_siblings(self) -> Vec<Hash> {
        self.siblings
    }

    /// Compute root from a leaf hash and this proof
    pub fn compute_root(&self, leaf: &Hash) -> Hash {
        fold_siblings(*leaf, &self.siblings)
    }

    /// Verify this proof for an identifier against a root hash
    pub fn verify(&self, identifier: &str, root: &Hash) -> bool {
        verify(identifier, &self.siblings, root)
    }
}

impl From<Vec<Hash>> for MerkleProof {
    fn from(siblings: Vec<Hash>) -> Self {
        Self::new(siblings)
    }
}

fn fold_siblings(leaf: Hash, siblings: &[Hash]) -> Hash {
    siblings.iter().fold(leaf, |acc, sibling| Keccak256Hasher::hash_sorted_pair(&acc, sibling))
}

/// Check that `identifier` is a member of the allow-list committed to by `root`.
///
/// The identifier is trimmed before hashing, as during tree construction.
pub fn verify(identifier: &str, proof: &[Hash], root: &Hash) -> bool {
    fold_siblings(Keccak256Hasher::hash_leaf(identifier), proof) == *root
}

/// Verify a proof received as hex strings.
///
/// Fails closed: any root or sibling that does not decode to exactly 32 bytes
/// makes the result `false`.
pub fn verify_hex<S: AsRef<str>>(identifier: &str, proof: &[S], root: &str) -> bool {
    let Ok(root) = decode_hash(root) else {
        return false;
    };
    let Ok(siblings) = encoding::decode_proof(proof) else {
        return false;
    };
    verify(identifier, &siblings, &root)
}
