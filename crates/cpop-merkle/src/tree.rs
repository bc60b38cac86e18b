//! Allow-list Merkle tree

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{encode_hash, hasher::Keccak256Hasher, proof::MerkleProof, Hash, MerkleError};

/// Binary Merkle tree over a deduplicated set of identifiers
///
/// Immutable once built: a changed allow-list means a new tree. Safe to share
/// across threads for concurrent proving.
#[derive(Clone, Debug)]
pub struct AllowlistTree {
    /// Unique trimmed identifiers, in order of first occurrence
    identifiers: Vec<String>,
    /// Layers from leaves (0) up to the single root
    layers: Vec<Vec<Hash>>,
    /// Leaf hash -> leaf index
    positions: HashMap<Hash, usize>,
    /// Root hash
    root: Hash,
}

impl AllowlistTree {
    /// Build a tree from raw identifiers.
    ///
    /// Identifiers are trimmed, blanks dropped and duplicates collapsed to their
    /// first occurrence. Fails with [`MerkleError::EmptyInput`] if nothing is
    /// left.
    pub fn build<I, S>(identifiers: I) -> Result<Self, MerkleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique = Vec::new();
        let mut leaves = Vec::new();
        let mut positions = HashMap::new();
        let mut received = 0usize;

        for identifier in identifiers {
            received += 1;
            let identifier = identifier.as_ref().trim();
            if identifier.is_empty() {
                continue;
            }

            let leaf = Keccak256Hasher::hash_leaf(identifier);
            if positions.contains_key(&leaf) {
                trace!(target: "allowlist", identifier, "Dropping duplicate identifier");
                continue;
            }

            positions.insert(leaf, leaves.len());
            leaves.push(leaf);
            unique.push(identifier.to_owned());
        }

        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let layers = Self::build_layers(leaves);
        let root = layers[layers.len() - 1][0];

        debug!(
            target: "allowlist",
            received,
            unique = unique.len(),
            depth = layers.len() - 1,
            root = %encode_hash(&root),
            "Built allow-list tree"
        );

        Ok(Self { identifiers: unique, layers, positions, root })
    }

    /// Hash layers upward until a single node remains
    fn build_layers(leaves: Vec<Hash>) -> Vec<Vec<Hash>> {
        let mut layers = vec![leaves];

        while layers[layers.len() - 1].len() > 1 {
            let next = Self::next_layer(&layers[layers.len() - 1]);
            layers.push(next);
        }

        layers
    }

    /// Combine adjacent pairs; an odd trailing node moves up unchanged and
    /// lands at the last position of the next layer.
    fn next_layer(layer: &[Hash]) -> Vec<Hash> {
        let pairs = layer.chunks_exact(2);
        let promoted = pairs.remainder().first().copied();

        pairs
            .map(|pair| Keccak256Hasher::hash_sorted_pair(&pair[0], &pair[1]))
            .chain(promoted)
            .collect()
    }

    /// Get the root hash
    pub const fn root(&self) -> Hash {
        self.root
    }

    /// All layers, leaves first
    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Leaf hashes in insertion order
    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// Unique trimmed identifiers in insertion order
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Number of unique identifiers
    pub fn count(&self) -> usize {
        self.identifiers.len()
    }

    /// Number of combining levels between the leaves and the root
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Index of an identifier's leaf, if present
    pub fn leaf_index(&self, identifier: &str) -> Option<usize> {
        self.positions.get(&Keccak256Hasher::hash_leaf(identifier)).copied()
    }

    /// Whether an identifier is in the allow-list
    pub fn contains(&self, identifier: &str) -> bool {
        self.leaf_index(identifier).is_some()
    }

    /// Generate an inclusion proof for an identifier.
    pub fn prove(&self, identifier: &str) -> Result<MerkleProof, MerkleError> {
        let index = self.leaf_index(identifier).ok_or_else(|| MerkleError::NotFound {
            identifier: identifier.trim().to_owned(),
        })?;

        Ok(MerkleProof::new(self.sibling_path(index)))
    }

    /// Walk from a leaf to the root, collecting sibling hashes.
    ///
    /// A promoted node has no sibling at its layer and contributes nothing.
    pub(crate) fn sibling_path(&self, leaf_index: usize) -> Vec<Hash> {
        let mut siblings = Vec::with_capacity(self.depth());
        let mut index = leaf_index;

        for layer in &self.layers[..self.depth()] {
            if let Some(sibling) = layer.get(index ^ 1) {
                siblings.push(*sibling);
            }
            index /= 2;
        }

        siblings
    }
}
