//! Deterministic Anonymous Display-Name Allocator
//!
//! Maps an opaque per-session key to a short, stable label such as
//! `Brave Otter Comet` without registration. The same key always resolves to
//! the same label, and distinct keys never share one, even when many callers
//! (possibly in separate processes) allocate against one shared store.

pub mod allocator;
pub mod error;
pub mod hashing;
pub mod label;
pub mod snapshot;
pub mod store;
pub mod words;

pub use allocator::{ProbeAllocator, Resolution, ResolvePath};
pub use error::{Error, Result};
pub use label::{Dictionaries, LabelEncoder, MAX_LABEL_CHARS};
pub use store::{AllocationStore, Assignment, MemoryStore, StoreError};

use allocator::{MAX_PROBES, MAX_SUFFIX_TRIES, PROBE_STEP};
use hashing::{index_key, POOL_SIZE};
use rayon::prelude::*;

/// Label returned for empty or whitespace-only keys; never stored.
pub const GUEST_LABEL: &str = "Guest";

/// Allocator tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
	/// Distance between probed slots (default: 97003)
	pub probe_step: u32,
	/// Suffix-0 slots tried before the suffix phase (default: 4096)
	pub max_probes: u32,
	/// Suffixes tried on the initial slot (default: 1000)
	pub max_suffix_tries: u32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			probe_step: PROBE_STEP,
			max_probes: MAX_PROBES,
			max_suffix_tries: MAX_SUFFIX_TRIES,
		}
	}
}

impl Config {
	pub fn validate(&self) -> Result<()> {
		if self.max_probes == 0 {
			return Err(invalid_config("max_probes must be at least 1"));
		}
		if self.max_suffix_tries == 0 {
			return Err(invalid_config("max_suffix_tries must be at least 1"));
		}
		if gcd(self.probe_step, POOL_SIZE) != 1 {
			return Err(invalid_config(format!(
				"probe_step {} shares a factor with the pool size {}",
				self.probe_step, POOL_SIZE
			)));
		}
		Ok(())
	}
}

fn invalid_config(message: impl Into<String>) -> Error {
	Error::InvalidConfig {
		message: message.into(),
	}
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
	while b != 0 {
		(a, b) = (b, a % b);
	}
	a
}

/// Counts of how keys were resolved
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
	pub created: usize,
	pub suffixed: usize,
	pub existing: usize,
	pub raced: usize,
	pub guests: usize,
}

impl Stats {
	/// Record one resolution; `None` means the guest label was returned.
	pub fn record(&mut self, resolution: Option<&Resolution>) {
		match resolution.map(|r| r.path) {
			None => self.guests += 1,
			Some(ResolvePath::Existing) => self.existing += 1,
			Some(ResolvePath::Created { .. }) => self.created += 1,
			Some(ResolvePath::CreatedWithSuffix) => self.suffixed += 1,
			Some(ResolvePath::CreatedByPeer) => self.raced += 1,
		}
	}

	pub fn total(&self) -> usize {
		self.created + self.suffixed + self.existing + self.raced + self.guests
	}
}

/// Key to label facade over hashing, allocation and rendering.
#[derive(Debug)]
pub struct NameService<S> {
	allocator: ProbeAllocator<S>,
	encoder: LabelEncoder,
}

impl<S: AllocationStore> NameService<S> {
	/// Service using the built-in dictionaries.
	pub fn new(store: S, config: Config) -> Result<Self> {
		Self::with_dictionaries(store, config, Dictionaries::default())
	}

	/// Fails if `config` is invalid or the dictionaries could produce a label
	/// longer than [`MAX_LABEL_CHARS`] for any reachable suffix.
	pub fn with_dictionaries(store: S, config: Config, words: Dictionaries) -> Result<Self> {
		let encoder = LabelEncoder::new(words, config.max_suffix_tries)?;
		let allocator = ProbeAllocator::new(store, config)?;
		Ok(Self { allocator, encoder })
	}

	/// Label for `raw_key`, allocating a slot on first sight.
	pub fn allocate(&self, raw_key: &str) -> Result<String> {
		self.resolve(raw_key).map(|(label, _)| label)
	}

	/// Like [`allocate`](Self::allocate), also reporting how the key was
	/// resolved. The resolution is `None` for the guest label.
	pub fn resolve(&self, raw_key: &str) -> Result<(String, Option<Resolution>)> {
		let trimmed = raw_key.trim();
		if trimmed.is_empty() {
			return Ok((GUEST_LABEL.to_string(), None));
		}

		let digest = index_key(trimmed);
		let resolution = self
			.allocator
			.get_or_create(&digest.hash, digest.initial_index)?;
		let label = self.label_for(&resolution.assignment);
		Ok((label, Some(resolution)))
	}

	/// Resolve many keys in parallel against the shared store.
	///
	/// Results are in input order; a failing key does not stop the others.
	pub fn resolve_all(&self, keys: &[String]) -> Vec<Result<(String, Option<Resolution>)>> {
		keys.par_iter().map(|key| self.resolve(key)).collect()
	}

	/// Render a stored assignment.
	pub fn label_for(&self, assignment: &Assignment) -> String {
		self.encoder.encode(assignment.slot, assignment.suffix)
	}

	pub fn store(&self) -> &S {
		self.allocator.store()
	}

	pub fn config(&self) -> &Config {
		self.allocator.config()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_config_default_is_valid() {
		assert!(Config::default().validate().is_ok());
	}

	#[test]
	fn test_config_rejects_bad_values() {
		for config in [
			Config {
				max_probes: 0,
				..Config::default()
			},
			Config {
				max_suffix_tries: 0,
				..Config::default()
			},
			Config {
				probe_step: 250,
				..Config::default()
			},
			Config {
				probe_step: 0,
				..Config::default()
			},
		] {
			assert!(
				matches!(config.validate(), Err(Error::InvalidConfig { .. })),
				"{:?}",
				config
			);
		}
	}

	#[test]
	fn test_gcd() {
		assert_eq!(gcd(97_003, POOL_SIZE), 1);
		assert_eq!(gcd(12, 18), 6);
		assert_eq!(gcd(0, POOL_SIZE), POOL_SIZE);
	}

	#[test]
	fn test_guest_label() {
		let service = NameService::new(MemoryStore::new(), Config::default()).unwrap();
		assert_eq!(service.allocate("").unwrap(), GUEST_LABEL);
		assert_eq!(service.allocate(" \t\n").unwrap(), GUEST_LABEL);
		assert!(service.store().is_empty().unwrap());
	}

	#[test]
	fn test_allocate_known_key() {
		let service = NameService::new(MemoryStore::new(), Config::default()).unwrap();
		assert_eq!(service.allocate("user-42").unwrap(), "Early Jackal Nebula");
		// Trimmed before hashing
		assert_eq!(service.allocate("  user-42 ").unwrap(), "Early Jackal Nebula");
		assert_eq!(service.store().len().unwrap(), 1);
	}

	#[test]
	fn test_stats_record() {
		let service = NameService::new(MemoryStore::new(), Config::default()).unwrap();
		let mut stats = Stats::default();
		for key in ["alice", "bob", "alice", ""] {
			let (_, resolution) = service.resolve(key).unwrap();
			stats.record(resolution.as_ref());
		}
		assert_eq!(
			stats,
			Stats {
				created: 2,
				existing: 1,
				guests: 1,
				..Stats::default()
			}
		);
		assert_eq!(stats.total(), 4);
	}

	#[test]
	fn test_rejects_dictionaries_too_long_for_suffix() {
		let mut adjectives = words::ADJECTIVES;
		adjectives[0] = "Extraordinarily";
		let mut animals = words::ANIMALS;
		animals[0] = "Hippopotamus";
		let words = Dictionaries {
			adjectives: Box::leak(Box::new(adjectives)),
			animals: Box::leak(Box::new(animals)),
			..Dictionaries::default()
		};
		let result = NameService::with_dictionaries(MemoryStore::new(), Config::default(), words);
		assert!(matches!(result, Err(Error::InvalidDictionary { .. })));
	}
}
