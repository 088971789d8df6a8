//! Anonymous display-name CLI
//!
//! Resolves session keys to stable labels, optionally keeping assignments in
//! a JSON state file between runs.

use anon_names::snapshot::resolve_with_state;
use anon_names::{Config, MemoryStore, NameService, Stats};
use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "anon-names")]
#[command(version)]
#[command(about = "Allocate stable anonymous display names for session keys", long_about = None)]
struct Args {
	/// Keys to resolve (read from stdin, one per line, if omitted)
	#[arg(value_name = "KEY")]
	keys: Vec<String>,

	/// JSON file holding existing assignments; created if missing
	#[arg(short, long, value_name = "FILE")]
	state: Option<PathBuf>,

	/// Resolve without writing the state file back
	#[arg(short = 'n', long)]
	dry_run: bool,

	/// Print `key<TAB>label` instead of just the label
	#[arg(long)]
	with_keys: bool,

	/// Log each new assignment
	#[arg(short, long)]
	verbose: bool,

	/// Distance between probed slots
	#[arg(long, default_value_t = Config::default().probe_step)]
	probe_step: u32,

	/// Slots tried before falling back to numeric suffixes
	#[arg(long, default_value_t = Config::default().max_probes)]
	max_probes: u32,

	/// Suffixes tried once probing is exhausted
	#[arg(long, default_value_t = Config::default().max_suffix_tries)]
	max_suffix_tries: u32,
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(args.verbose);

	let keys = if args.keys.is_empty() {
		read_stdin_keys()?
	} else {
		args.keys.clone()
	};
	if keys.is_empty() {
		bail!(
			"No keys given.\n\
			 Usage: anon-names <KEY>...\n\
			 Or:    printf 'key-1\\nkey-2\\n' | anon-names"
		);
	}

	let config = Config {
		probe_step: args.probe_step,
		max_probes: args.max_probes,
		max_suffix_tries: args.max_suffix_tries,
	};

	let start_time = Instant::now();

	// State is written before anything is printed, so every label shown is persisted
	let results = match &args.state {
		Some(path) => resolve_with_state(path, config, &keys, args.dry_run)?,
		None => NameService::new(MemoryStore::new(), config)?.resolve_all(&keys),
	};

	let mut stats = Stats::default();
	let mut failed = 0;
	let mut first_error = None;
	for (key, result) in keys.iter().zip(results) {
		match result {
			Ok((label, resolution)) => {
				stats.record(resolution.as_ref());
				if args.with_keys {
					println!("{}\t{}", key, label);
				} else {
					println!("{}", label);
				}
			}
			Err(err) => {
				failed += 1;
				first_error.get_or_insert(err);
			}
		}
	}
	let total_time = start_time.elapsed();

	eprintln!(
		"Resolved {} keys ({} new, {} suffixed, {} existing, {} guest, {} failed) in {:.2}s",
		stats.total(),
		stats.created + stats.raced,
		stats.suffixed,
		stats.existing,
		stats.guests,
		failed,
		total_time.as_secs_f64()
	);

	match first_error {
		Some(err) => Err(err.into()),
		None => Ok(()),
	}
}

fn read_stdin_keys() -> Result<Vec<String>> {
	let stdin = io::stdin();
	let mut keys = Vec::new();
	for line in stdin.lock().lines() {
		keys.push(line?);
	}
	Ok(keys)
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "info" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}
