//! Key hashing and initial slot derivation.
//!
//! A raw key is trimmed, hashed with SHA-256, and the first six bytes of the
//! digest (big-endian) pick the starting slot in the pool.

use sha2::{Digest, Sha256};

/// Number of addressable slots: one word from each of three 100-entry dictionaries.
pub const POOL_SIZE: u32 = 100 * 100 * 100;

/// Stable digest of a key plus the slot where probing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDigest {
	/// 64 lowercase hex characters of SHA-256 over the trimmed key
	pub hash: String,
	/// Slot in `[0, POOL_SIZE)`
	pub initial_index: u32,
}

/// Hash a raw key after trimming surrounding whitespace.
///
/// Callers are expected to handle the empty key before getting here; an empty
/// string still hashes fine, it just isn't meaningful as an identity.
pub fn index_key(raw_key: &str) -> KeyDigest {
	let digest = Sha256::digest(raw_key.trim().as_bytes());
	KeyDigest {
		hash: format!("{:x}", digest),
		initial_index: initial_index_from_digest(&digest.into()),
	}
}

/// Reduce the first 6 digest bytes (big-endian) modulo [`POOL_SIZE`].
pub fn initial_index_from_digest(digest: &[u8; 32]) -> u32 {
	let mut head = [0u8; 8];
	head[2..].copy_from_slice(&digest[..6]);
	(u64::from_be_bytes(head) % u64::from(POOL_SIZE)) as u32
}
