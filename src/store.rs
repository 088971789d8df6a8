//! Allocation store contract and an in-process implementation.
//!
//! A store persists [`Assignment`] records under two independent uniqueness
//! constraints: one record per key hash, and one record per `(slot, suffix)`.
//! Inserts are atomic; a violation of either constraint is reported as
//! [`StoreError::Conflict`] without saying which one was hit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Immutable record binding a key hash to a slot and suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
	pub key_hash: String,
	pub slot: u32,
	/// 0 for the primary occupant of a slot
	pub suffix: u32,
}

#[derive(Error, Debug)]
pub enum StoreError {
	/// Either the key hash or the `(slot, suffix)` pair is already taken
	#[error("assignment conflicts with an existing record")]
	Conflict,

	/// Any failure reaching or operating the backing store
	#[error(transparent)]
	Unavailable(#[from] anyhow::Error),
}

/// Persisted record store the allocator runs against.
///
/// Implementations must be safe to share between threads and, for a shared
/// backend, between processes: `create_assignment` has to be an atomic
/// create-if-absent across both constraints.
pub trait AllocationStore: Send + Sync {
	fn find_by_hash(&self, key_hash: &str) -> Result<Option<Assignment>, StoreError>;

	fn create_assignment(
		&self,
		key_hash: &str,
		slot: u32,
		suffix: u32,
	) -> Result<Assignment, StoreError>;
}

impl<S: AllocationStore + ?Sized> AllocationStore for std::sync::Arc<S> {
	fn find_by_hash(&self, key_hash: &str) -> Result<Option<Assignment>, StoreError> {
		(**self).find_by_hash(key_hash)
	}

	fn create_assignment(
		&self,
		key_hash: &str,
		slot: u32,
		suffix: u32,
	) -> Result<Assignment, StoreError> {
		(**self).create_assignment(key_hash, slot, suffix)
	}
}

#[derive(Debug, Default)]
struct Tables {
	by_hash: HashMap<String, Assignment>,
	by_slot: HashMap<(u32, u32), String>,
}

impl Tables {
	fn insert(&mut self, assignment: Assignment) -> Result<(), StoreError> {
		let slot_key = (assignment.slot, assignment.suffix);
		if self.by_hash.contains_key(&assignment.key_hash) || self.by_slot.contains_key(&slot_key) {
			return Err(StoreError::Conflict);
		}
		self.by_slot.insert(slot_key, assignment.key_hash.clone());
		self.by_hash.insert(assignment.key_hash.clone(), assignment);
		Ok(())
	}
}

/// In-memory store; both indexes are updated under one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: Mutex<Tables>,
}

impl MemoryStore {
	/// Create an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuild a store from existing records.
	///
	/// Fails with [`StoreError::Conflict`] if two records share a key hash or
	/// a `(slot, suffix)` pair.
	pub fn from_assignments<I>(assignments: I) -> Result<Self, StoreError>
	where
		I: IntoIterator<Item = Assignment>,
	{
		let mut tables = Tables::default();
		for assignment in assignments {
			tables.insert(assignment)?;
		}
		Ok(Self {
			tables: Mutex::new(tables),
		})
	}

	/// All records, sorted by `(slot, suffix)`.
	pub fn snapshot(&self) -> Result<Vec<Assignment>, StoreError> {
		let tables = self.lock()?;
		let mut all: Vec<Assignment> = tables.by_hash.values().cloned().collect();
		all.sort_by_key(|a| (a.slot, a.suffix));
		Ok(all)
	}

	pub fn len(&self) -> Result<usize, StoreError> {
		Ok(self.lock()?.by_hash.len())
	}

	pub fn is_empty(&self) -> Result<bool, StoreError> {
		Ok(self.len()? == 0)
	}

	/// Whether `(slot, suffix)` is occupied.
	pub fn is_taken(&self, slot: u32, suffix: u32) -> Result<bool, StoreError> {
		Ok(self.lock()?.by_slot.contains_key(&(slot, suffix)))
	}

	fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
		self.tables
			.lock()
			.map_err(|_| StoreError::Unavailable(anyhow::anyhow!("memory store lock poisoned")))
	}
}

impl AllocationStore for MemoryStore {
	fn find_by_hash(&self, key_hash: &str) -> Result<Option<Assignment>, StoreError> {
		Ok(self.lock()?.by_hash.get(key_hash).cloned())
	}

	fn create_assignment(
		&self,
		key_hash: &str,
		slot: u32,
		suffix: u32,
	) -> Result<Assignment, StoreError> {
		let assignment = Assignment {
			key_hash: key_hash.to_string(),
			slot,
			suffix,
		};
		self.lock()?.insert(assignment.clone())?;
		Ok(assignment)
	}
}
