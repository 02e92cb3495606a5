//! Cache key derivation
//!
//! Maps input text to a stable, namespaced cache key. Pure function over
//! already-validated input: no side effects and no failure mode.

use sha2::{Digest, Sha256};

/// Namespace prefix for every key this service writes.
///
/// Allows bulk enumeration and deletion by prefix scan without touching
/// unrelated keys in a shared cache instance.
pub const CACHE_KEY_NAMESPACE: &str = "sentiment:";

/// Hex characters of the SHA-256 digest kept in the key.
const KEY_HASH_HEX_LEN: usize = 16;

/// Derive the cache key for an input text.
///
/// Deterministic across calls and across process restarts: the same exact
/// text always maps to the same key.
pub fn derive_key(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let hex = hex::encode(digest);
    format!("{}{}", CACHE_KEY_NAMESPACE, &hex[..KEY_HASH_HEX_LEN])
}
