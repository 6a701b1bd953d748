//! Content fingerprints for change detection.
//!
//! Before writing an item back, a bot can compare the digest of the claims
//! it fetched with the digest of the claims it is about to submit and skip
//! the edit when nothing changed.

use sha2::{Digest, Sha256};

use crate::codec::encode_claims;
use crate::model::{ClaimMap, Item};

/// SHA-256 of the compact serialized claims block, as lowercase hex.
///
/// Sensitive to claim order and to every serialized field, including
/// hashes assigned by the service.
pub fn claims_digest(claims: &ClaimMap) -> String {
    let text = encode_claims(claims).to_string();
    let hash = Sha256::digest(text.as_bytes());

    let mut s = String::with_capacity(64);
    for byte in hash {
        s.push_str(&format!("{:02x}", byte));
    }
    s
}

/// SHA-256 of an item's claims block.
pub fn item_claims_digest(item: &Item) -> String {
    claims_digest(item.claims())
}
