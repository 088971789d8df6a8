//! Lookup-or-create of slot assignments.
//!
//! Probing walks the pool in fixed steps from the key's initial slot, trying
//! suffix 0 at each stop. If that neighbourhood is saturated, the initial
//! slot is retried with increasing suffixes. Every conflict re-reads the key
//! so a concurrent writer for the same key is detected and its record reused.
//! No locks are taken here; correctness comes from the store's atomic insert.

use crate::error::{Error, Result};
use crate::hashing::POOL_SIZE;
use crate::store::{AllocationStore, Assignment, StoreError};
use crate::Config;
use tracing::{debug, info, warn};

/// Distance between consecutive probes; coprime with [`POOL_SIZE`].
pub const PROBE_STEP: u32 = 97_003;
/// Suffix-0 slots tried before falling back to suffixes.
pub const MAX_PROBES: u32 = 4096;
/// Suffixes tried on the initial slot once probing is exhausted.
pub const MAX_SUFFIX_TRIES: u32 = 1000;

/// How a key's assignment was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePath {
	/// Already present before this call
	Existing,
	/// Inserted by this call at suffix 0 on the given probe (1-based)
	Created { probes: u32 },
	/// Inserted by this call in the suffix phase
	CreatedWithSuffix,
	/// Another writer inserted the same key while this call was probing
	CreatedByPeer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
	pub assignment: Assignment,
	pub path: ResolvePath,
}

enum Attempt {
	Created(Assignment),
	Peer(Assignment),
	Taken,
}

/// Resolves key hashes to assignments against a shared store.
#[derive(Debug)]
pub struct ProbeAllocator<S> {
	store: S,
	config: Config,
}

impl<S: AllocationStore> ProbeAllocator<S> {
	pub fn new(store: S, config: Config) -> Result<Self> {
		config.validate()?;
		Ok(Self { store, config })
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Return the key's assignment, creating it if the key is new.
	///
	/// Idempotent, and safe to call concurrently for the same or different
	/// keys from any number of threads or processes sharing the store.
	pub fn get_or_create(&self, key_hash: &str, initial_index: u32) -> Result<Resolution> {
		if let Some(assignment) = self.store.find_by_hash(key_hash)? {
			return Ok(Resolution {
				assignment,
				path: ResolvePath::Existing,
			});
		}

		let start = initial_index % POOL_SIZE;
		let mut slot = start;
		for probe in 1..=self.config.max_probes {
			match self.attempt(key_hash, slot, 0)? {
				Attempt::Created(assignment) => {
					info!(key_hash, slot, probes = probe, "created assignment");
					return Ok(Resolution {
						assignment,
						path: ResolvePath::Created { probes: probe },
					});
				}
				Attempt::Peer(assignment) => return Ok(peer_resolution(assignment)),
				Attempt::Taken => {
					debug!(key_hash, slot, probe, "slot occupied");
					slot = self.next_slot(slot);
				}
			}
		}

		warn!(
			key_hash,
			slot = start,
			probes = self.config.max_probes,
			"probe path saturated, falling back to suffixes"
		);

		for suffix in 1..=self.config.max_suffix_tries {
			match self.attempt(key_hash, start, suffix)? {
				Attempt::Created(assignment) => {
					info!(key_hash, slot = start, suffix, "created suffixed assignment");
					return Ok(Resolution {
						assignment,
						path: ResolvePath::CreatedWithSuffix,
					});
				}
				Attempt::Peer(assignment) => return Ok(peer_resolution(assignment)),
				Attempt::Taken => debug!(key_hash, slot = start, suffix, "suffix occupied"),
			}
		}

		warn!(key_hash, slot = start, "allocation exhausted");
		Err(Error::AllocationExhausted {
			key_hash: key_hash.to_string(),
			probes: self.config.max_probes,
			suffix_tries: self.config.max_suffix_tries,
		})
	}

	/// One insert; on conflict, re-read to tell a same-key race from a taken slot.
	fn attempt(&self, key_hash: &str, slot: u32, suffix: u32) -> Result<Attempt> {
		match self.store.create_assignment(key_hash, slot, suffix) {
			Ok(assignment) => Ok(Attempt::Created(assignment)),
			Err(StoreError::Conflict) => match self.store.find_by_hash(key_hash)? {
				Some(winner) => Ok(Attempt::Peer(winner)),
				None => Ok(Attempt::Taken),
			},
			Err(StoreError::Unavailable(err)) => Err(Error::StoreUnavailable(err)),
		}
	}

	fn next_slot(&self, slot: u32) -> u32 {
		((u64::from(slot) + u64::from(self.config.probe_step)) % u64::from(POOL_SIZE)) as u32
	}
}

fn peer_resolution(assignment: Assignment) -> Resolution {
	debug!(key_hash = %assignment.key_hash, "concurrent writer created this key first");
	Resolution {
		assignment,
		path: ResolvePath::CreatedByPeer,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::MemoryStore;
	use std::sync::atomic::{AtomicUsize, Ordering};

	fn small_config() -> Config {
		Config {
			probe_step: PROBE_STEP,
			max_probes: 3,
			max_suffix_tries: 2,
		}
	}

	#[test]
	fn test_creates_at_initial_slot() {
		let allocator = ProbeAllocator::new(MemoryStore::new(), Config::default()).unwrap();
		let res = allocator.get_or_create("aaa", 42).unwrap();
		assert_eq!(res.path, ResolvePath::Created { probes: 1 });
		assert_eq!((res.assignment.slot, res.assignment.suffix), (42, 0));
	}

	#[test]
	fn test_second_call_is_existing() {
		let allocator = ProbeAllocator::new(MemoryStore::new(), Config::default()).unwrap();
		let first = allocator.get_or_create("aaa", 42).unwrap();
		let second = allocator.get_or_create("aaa", 42).unwrap();
		assert_eq!(second.path, ResolvePath::Existing);
		assert_eq!(first.assignment, second.assignment);
	}

	#[test]
	fn test_probes_past_occupied_slots() {
		let store = MemoryStore::new();
		store.create_assignment("other1", 999_990, 0).unwrap();
		store.create_assignment("other2", (999_990 + PROBE_STEP) % POOL_SIZE, 0).unwrap();

		let allocator = ProbeAllocator::new(store, Config::default()).unwrap();
		let res = allocator.get_or_create("aaa", 999_990).unwrap();
		assert_eq!(res.path, ResolvePath::Created { probes: 3 });
		// Wraps around the pool
		assert_eq!(res.assignment.slot, (999_990 + 2 * PROBE_STEP) % POOL_SIZE);
		assert_eq!(res.assignment.slot, 193_996);
	}

	#[test]
	fn test_falls_back_to_suffix() {
		let store = MemoryStore::new();
		let mut slot = 7;
		for i in 0..3 {
			store.create_assignment(&format!("other{}", i), slot, 0).unwrap();
			slot = (slot + PROBE_STEP) % POOL_SIZE;
		}

		let allocator = ProbeAllocator::new(store, small_config()).unwrap();
		let res = allocator.get_or_create("aaa", 7).unwrap();
		assert_eq!(res.path, ResolvePath::CreatedWithSuffix);
		assert_eq!((res.assignment.slot, res.assignment.suffix), (7, 1));
	}

	#[test]
	fn test_exhausted() {
		let store = MemoryStore::new();
		let mut slot = 7;
		for i in 0..3 {
			store.create_assignment(&format!("p{}", i), slot, 0).unwrap();
			slot = (slot + PROBE_STEP) % POOL_SIZE;
		}
		store.create_assignment("s1", 7, 1).unwrap();
		store.create_assignment("s2", 7, 2).unwrap();

		let allocator = ProbeAllocator::new(store, small_config()).unwrap();
		let err = allocator.get_or_create("aaa", 7).unwrap_err();
		assert!(matches!(
			err,
			Error::AllocationExhausted {
				probes: 3,
				suffix_tries: 2,
				..
			}
		));
		assert_eq!(allocator.store().find_by_hash("aaa").unwrap(), None);
	}

	/// Simulates a peer inserting the same key between our lookup and insert.
	struct RacingStore {
		inner: MemoryStore,
		lookups: AtomicUsize,
	}

	impl AllocationStore for RacingStore {
		fn find_by_hash(&self, key_hash: &str) -> std::result::Result<Option<Assignment>, StoreError> {
			if self.lookups.fetch_add(1, Ordering::SeqCst) == 0 {
				// Report absent, then let the "peer" win at a different slot
				self.inner.create_assignment(key_hash, 500, 0)?;
				return Ok(None);
			}
			self.inner.find_by_hash(key_hash)
		}

		fn create_assignment(
			&self,
			key_hash: &str,
			slot: u32,
			suffix: u32,
		) -> std::result::Result<Assignment, StoreError> {
			self.inner.create_assignment(key_hash, slot, suffix)
		}
	}

	#[test]
	fn test_detects_peer_win() {
		let store = RacingStore {
			inner: MemoryStore::new(),
			lookups: AtomicUsize::new(0),
		};
		let allocator = ProbeAllocator::new(store, Config::default()).unwrap();
		let res = allocator.get_or_create("aaa", 42).unwrap();
		assert_eq!(res.path, ResolvePath::CreatedByPeer);
		assert_eq!(res.assignment.slot, 500);
		assert_eq!(allocator.store().inner.len().unwrap(), 1);
	}

	/// Lets a peer win the same key the first time suffix 1 is attempted.
	struct SuffixRacingStore {
		inner: MemoryStore,
		fired: AtomicUsize,
	}

	impl AllocationStore for SuffixRacingStore {
		fn find_by_hash(&self, key_hash: &str) -> std::result::Result<Option<Assignment>, StoreError> {
			self.inner.find_by_hash(key_hash)
		}

		fn create_assignment(
			&self,
			key_hash: &str,
			slot: u32,
			suffix: u32,
		) -> std::result::Result<Assignment, StoreError> {
			if suffix == 1 && self.fired.fetch_add(1, Ordering::SeqCst) == 0 {
				self.inner.create_assignment(key_hash, 5, 7)?;
				return Err(StoreError::Conflict);
			}
			self.inner.create_assignment(key_hash, slot, suffix)
		}
	}

	#[test]
	fn test_detects_peer_win_during_suffix_phase() {
		let inner = MemoryStore::new();
		let mut slot = 7;
		for i in 0..3 {
			inner.create_assignment(&format!("other{}", i), slot, 0).unwrap();
			slot = (slot + PROBE_STEP) % POOL_SIZE;
		}
		let store = SuffixRacingStore {
			inner,
			fired: AtomicUsize::new(0),
		};

		let allocator = ProbeAllocator::new(store, small_config()).unwrap();
		let res = allocator.get_or_create("aaa", 7).unwrap();
		assert_eq!(res.path, ResolvePath::CreatedByPeer);
		assert_eq!((res.assignment.slot, res.assignment.suffix), (5, 7));
		// No second record for the key, and suffix 1 stays free
		assert_eq!(allocator.store().inner.len().unwrap(), 4);
		assert!(!allocator.store().inner.is_taken(7, 1).unwrap());
	}

	#[test]
	fn test_rejects_invalid_config() {
		let config = Config {
			probe_step: 1000,
			..Config::default()
		};
		assert!(matches!(
			ProbeAllocator::new(MemoryStore::new(), config),
			Err(Error::InvalidConfig { .. })
		));
	}
}
