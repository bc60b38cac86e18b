//! Allow-list Merkle commitments for proof-of-participation claims
//!
//! An organizer builds an [`AllowlistTree`] over the wallet addresses that may
//! claim an event token and publishes only its root. Anyone holding the list
//! can later hand an attendee a [`MerkleProof`], and any party holding the
//! root can check it with [`verify`].
//!
//! Key properties:
//! - Leaves are `keccak256(trim(identifier))`, deduplicated
//! - Pairs are combined in sorted byte order, so proofs carry no side tags
//! - An unpaired trailing node is promoted unchanged to the next layer
//! - Verification of untrusted input fails closed with `false`

mod allowlist;
mod artifact;
mod encoding;
mod error;
mod hasher;
mod proof;
mod tree;

pub use allowlist::{load_allowlist, parse_allowlist, parse_allowlist_str};
pub use artifact::{ClaimTicket, RootCommitment};
pub use encoding::{decode_hash, decode_proof, encode_hash, encode_proof, HASH_HEX_LEN};
pub use error::{AllowlistError, EncodingError, MerkleError};
pub use hasher::Keccak256Hasher;
pub use proof::{verify, verify_hex, MerkleProof};
pub use tree::AllowlistTree;

/// 32-byte keccak-256 digest
pub type Hash = [u8; 32];

/// Digest length in bytes
pub const HASH_LEN: usize = 32;
