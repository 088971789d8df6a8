//! Errors surfaced by the allocator and its facade.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	/// Both the probe path and the suffix range around a key are saturated
	#[error(
		"no free slot for key {key_hash} after {probes} probes and {suffix_tries} suffix attempts"
	)]
	AllocationExhausted {
		key_hash: String,
		probes: u32,
		suffix_tries: u32,
	},

	/// The backing store failed; passed through without retry
	#[error("allocation store unavailable: {0:#}")]
	StoreUnavailable(anyhow::Error),

	#[error("invalid allocator configuration: {message}")]
	InvalidConfig { message: String },

	#[error("invalid label dictionary: {message}")]
	InvalidDictionary { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<crate::store::StoreError> for Error {
	fn from(err: crate::store::StoreError) -> Self {
		match err {
			crate::store::StoreError::Unavailable(inner) => Error::StoreUnavailable(inner),
			// Lookups never conflict; an insert conflict is consumed by the allocator
			crate::store::StoreError::Conflict => Error::StoreUnavailable(anyhow::anyhow!(
				"store reported a conflict outside of an insert"
			)),
		}
	}
}
