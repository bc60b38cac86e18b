//! Hex encoding for roots and proofs
//!
//! Output is always `0x` followed by 64 lowercase hex digits. Decoding is
//! lenient about the prefix and digit case, strict about length.

use crate::{EncodingError, Hash, HASH_LEN};

/// Number of hex digits in an encoded hash, excluding the prefix
pub const HASH_HEX_LEN: usize = 64;

/// Format a 32-byte hash as hexadecimal string with 0x prefix
pub fn encode_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a hash from hex, with or without the `0x` prefix
pub fn decode_hash(encoded: &str) -> Result<Hash, EncodingError> {
    let trimmed = encoded.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != HASH_HEX_LEN {
        return Err(EncodingError::InvalidLength { expected: HASH_HEX_LEN, actual: digits.len() });
    }
    let mut hash = [0u8; HASH_LEN];
    hex::decode_to_slice(digits, &mut hash)?;
    Ok(hash)
}

/// Encode every sibling of a proof
pub fn encode_proof(siblings: &[Hash]) -> Vec<String> {
    siblings.iter().map(encode_hash).collect()
}

/// Decode every sibling of a proof, failing on the first malformed element
pub fn decode_proof<S: AsRef<str>>(encoded: &[S]) -> Result<Vec<Hash>, EncodingError> {
    encoded.iter().map(|s| decode_hash(s.as_ref())).collect()
}

/// Serde adapter storing a list of hashes as encoded strings
pub(crate) mod hex_hashes {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::{decode_hash, encode_hash};
    use crate::Hash;

    pub(crate) fn serialize<S: Serializer>(
        hashes: &[Hash],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(hashes.iter().map(encode_hash))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Hash>, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded.iter().map(|s| decode_hash(s).map_err(D::Error::custom)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_prefixed_lowercase() {
        let encoded = encode_hash(&[0xab; 32]);
        assert_eq!(encoded.len(), 2 + HASH_HEX_LEN);
        assert!(encoded.starts_with("0x"));
        assert_eq!(encoded, encoded.to_lowercase());
    }

    #[test]
    fn test_decode_accepts_prefix_and_case_variants() {
        let hash = [0xcd; 32];
        let digits = hex::encode(hash);

        assert_eq!(decode_hash(&format!("0x{digits}")).unwrap(), hash);
        assert_eq!(decode_hash(&digits).unwrap(), hash);
        assert_eq!(decode_hash(&format!("0X{}", digits.to_uppercase())).unwrap(), hash);
        assert_eq!(decode_hash(&format!("  0x{digits}\n")).unwrap(), hash);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(
            decode_hash("0x1234"),
            Err(EncodingError::InvalidLength { expected: HASH_HEX_LEN, actual: 4 })
        );
        assert!(decode_hash(&format!("0x{}", "ab".repeat(33))).is_err());
        assert!(decode_hash("").is_err());
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        let bad = format!("0x{}", "zz".repeat(32));
        assert!(matches!(decode_hash(&bad), Err(EncodingError::InvalidHex(_))));
    }

    #[test]
    fn test_decode_proof_stops_on_bad_element() {
        let good = encode_hash(&[1u8; 32]);
        assert_eq!(decode_proof(&[good.as_str()]).unwrap(), vec![[1u8; 32]]);
        assert!(decode_proof(&[good.as_str(), "0xnope"]).is_err());
        assert!(decode_proof::<&str>(&[]).unwrap().is_empty());
    }
}
