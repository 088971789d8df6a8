//! JSON snapshots of a [`MemoryStore`].
//!
//! A snapshot is a JSON array of `{ "key_hash", "slot", "suffix" }` records.
//! It lets the CLI keep labels stable across runs; it is not a shared store.

use crate::hashing::POOL_SIZE;
use crate::store::{Assignment, MemoryStore};
use crate::{Config, NameService, Resolution};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a store from `path`. A missing file yields an empty store.
///
/// Every record must be one the allocator could have produced under
/// `config`: a 64-char lowercase hex hash, a slot inside the pool and a
/// suffix no larger than `config.max_suffix_tries`.
pub fn load_snapshot(path: &Path, config: &Config) -> Result<MemoryStore> {
	if !path.exists() {
		return Ok(MemoryStore::new());
	}

	let content =
		fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
	let records: Vec<Assignment> = serde_json::from_str(&content)
		.with_context(|| format!("Failed to parse {}", path.display()))?;

	for (i, record) in records.iter().enumerate() {
		check_record(record, config)
			.with_context(|| format!("{} contains an invalid assignment at index {}", path.display(), i))?;
	}

	MemoryStore::from_assignments(records)
		.with_context(|| format!("{} contains conflicting assignments", path.display()))
}

/// Write every record in `store` to `path`, replacing it atomically.
pub fn save_snapshot(path: &Path, store: &MemoryStore) -> Result<()> {
	let records = store.snapshot()?;
	let json = serde_json::to_string_pretty(&records)?;

	let tmp = path.with_extension("tmp");
	fs::write(&tmp, json + "\n").with_context(|| format!("Failed to write {}", tmp.display()))?;
	fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
	Ok(())
}

/// Resolve `keys` against the state file at `path` and write it back.
///
/// Per-key failures are returned in place rather than aborting the batch,
/// and the file is saved before the caller sees them, so every label handed
/// out is persisted. With `dry_run` the file is left untouched.
pub fn resolve_with_state(
	path: &Path,
	config: Config,
	keys: &[String],
	dry_run: bool,
) -> Result<Vec<crate::Result<(String, Option<Resolution>)>>> {
	let service = NameService::new(load_snapshot(path, &config)?, config)?;
	let results = service.resolve_all(keys);

	if dry_run {
		info!(path = %path.display(), "dry run, state not written");
	} else {
		save_snapshot(path, service.store())?;
	}

	Ok(results)
}

fn check_record(record: &Assignment, config: &Config) -> Result<()> {
	let hash = &record.key_hash;
	if hash.len() != 64 || !hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
		bail!("key_hash {:?} is not 64 lowercase hex characters", hash);
	}
	if record.slot >= POOL_SIZE {
		bail!("slot {} is outside the pool of {} slots", record.slot, POOL_SIZE);
	}
	if record.suffix > config.max_suffix_tries {
		bail!(
			"suffix {} exceeds the configured maximum of {}",
			record.suffix,
			config.max_suffix_tries
		);
	}
	Ok(())
}
