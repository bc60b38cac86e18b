//! Artifacts exchanged with the layers around the core
//!
//! The organizer publishes a [`RootCommitment`]. A server holding the full
//! allow-list hands each attendee a [`ClaimTicket`], which the claim layer
//! checks against the published root before minting.

use serde::{Deserialize, Serialize};

use crate::{
    decode_hash, encode_hash, encode_proof, hasher::Keccak256Hasher, proof::verify_hex,
    AllowlistTree, EncodingError, Hash, MerkleError,
};

/// Published allow-list fingerprint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootCommitment {
    /// Hex-encoded root
    pub root: String,
    /// Number of unique identifiers committed to
    pub count: usize,
}

impl RootCommitment {
    /// Decode the root
    pub fn root_hash(&self) -> Result<Hash, EncodingError> {
        decode_hash(&self.root)
    }
}

/// Everything an attendee needs to claim, hex-encoded for transport
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimTicket {
    /// Root the proof was generated against
    pub root: String,
    /// Trimmed identifier being claimed for
    pub identifier: String,
    /// Leaf position in the tree
    pub leaf_index: usize,
    /// Leaf hash of `identifier`
    pub leaf: String,
    /// Sibling hashes, leaf level first
    pub proof: Vec<String>,
}

impl ClaimTicket {
    /// Check that the ticket is self-consistent: the leaf matches the
    /// identifier and the proof leads to the ticket's root.
    ///
    /// This says nothing about whether that root is the published one; use
    /// [`Self::verify_against`] for that.
    pub fn verify(&self) -> bool {
        match decode_hash(&self.leaf) {
            Ok(leaf) if leaf == Keccak256Hasher::hash_leaf(&self.identifier) => {
                verify_hex(&self.identifier, &self.proof, &self.root)
            }
            _ => false,
        }
    }

    /// Verify the ticket and require its root to equal a trusted root
    pub fn verify_against(&self, trusted_root: &str) -> bool {
        match (decode_hash(&self.root), decode_hash(trusted_root)) {
            (Ok(root), Ok(trusted)) if root == trusted => self.verify(),
            _ => false,
        }
    }
}

impl AllowlistTree {
    /// The commitment an organizer publishes for this tree
    pub fn commitment(&self) -> RootCommitment {
        RootCommitment { root: encode_hash(&self.root()), count: self.count() }
    }

    /// Issue a claim ticket for a member of the allow-list.
    pub fn claim_ticket(&self, identifier: &str) -> Result<ClaimTicket, MerkleError> {
        let identifier = identifier.trim();
        let leaf_index = self
            .leaf_index(identifier)
            .ok_or_else(|| MerkleError::NotFound { identifier: identifier.to_owned() })?;

        Ok(ClaimTicket {
            root: encode_hash(&self.root()),
            identifier: identifier.to_owned(),
            leaf_index,
            leaf: encode_hash(&self.leaves()[leaf_index]),
            proof: encode_proof(&self.sibling_path(leaf_index)),
        })
    }
}
