//! Rendering of `(slot, suffix)` pairs as display labels.
//!
//! A slot is split into three base-100 digits selecting an adjective, an
//! animal and a concept. Labels look like `Brave Otter Comet` or, for a
//! secondary occupant, `Brave Otter Comet_03`. Length is capped at
//! [`MAX_LABEL_CHARS`] characters by dropping the concept word.

use crate::error::{Error, Result};
use crate::words::{ADJECTIVES, ANIMALS, CONCEPTS};
use std::collections::HashSet;

/// Upper bound on rendered label length, in characters.
pub const MAX_LABEL_CHARS: usize = 30;

type WordList = &'static [&'static str; 100];

/// The three word lists a label is composed from.
#[derive(Debug, Clone, Copy)]
pub struct Dictionaries {
	pub adjectives: WordList,
	pub animals: WordList,
	pub concepts: WordList,
}

impl Default for Dictionaries {
	fn default() -> Self {
		Self {
			adjectives: &ADJECTIVES,
			animals: &ANIMALS,
			concepts: &CONCEPTS,
		}
	}
}

#[derive(Debug, Clone)]
pub struct LabelEncoder {
	words: Dictionaries,
}

impl LabelEncoder {
	/// Build an encoder, checking that no label up to `max_suffix` can
	/// exceed [`MAX_LABEL_CHARS`] once the concept word is dropped.
	pub fn new(words: Dictionaries, max_suffix: u32) -> Result<Self> {
		validate(&words, max_suffix)?;
		Ok(Self { words })
	}

	/// Build an encoder without validation. Labels are still capped, by
	/// hard truncation if dropping the concept is not enough.
	pub fn unchecked(words: Dictionaries) -> Self {
		Self { words }
	}

	pub fn encode(&self, slot: u32, suffix: u32) -> String {
		let adjective = self.words.adjectives[(slot / 10_000 % 100) as usize];
		let animal = self.words.animals[(slot / 100 % 100) as usize];
		let concept = self.words.concepts[(slot % 100) as usize];
		let tag = suffix_tag(suffix);

		let full = format!("{} {} {}{}", adjective, animal, concept, tag);
		if char_len(&full) <= MAX_LABEL_CHARS {
			return full;
		}

		let short = format!("{} {}{}", adjective, animal, tag);
		if char_len(&short) <= MAX_LABEL_CHARS {
			return short;
		}

		// Last resort; keep the tag so secondary occupants stay distinguishable
		let room = MAX_LABEL_CHARS.saturating_sub(char_len(&tag));
		let head: String = format!("{} {}", adjective, animal).chars().take(room).collect();
		let mut truncated = head.trim_end().to_string();
		truncated.push_str(&tag);
		truncated.chars().take(MAX_LABEL_CHARS).collect()
	}
}

fn suffix_tag(suffix: u32) -> String {
	if suffix == 0 {
		String::new()
	} else {
		format!("_{:02}", suffix)
	}
}

fn char_len(s: &str) -> usize {
	s.chars().count()
}

fn validate(words: &Dictionaries, max_suffix: u32) -> Result<()> {
	let lists = [
		("adjective", words.adjectives),
		("animal", words.animals),
		("concept", words.concepts),
	];
	for (kind, list) in lists {
		let mut seen = HashSet::new();
		for word in list.iter() {
			if word.is_empty() || word.chars().any(char::is_whitespace) {
				return Err(Error::InvalidDictionary {
					message: format!("{} entry {:?} is empty or contains whitespace", kind, word),
				});
			}
			if !seen.insert(*word) {
				return Err(Error::InvalidDictionary {
					message: format!("duplicate {} entry {:?}", kind, word),
				});
			}
		}
	}

	let longest = |list: WordList| list.iter().map(|w| char_len(w)).max().unwrap_or(0);
	let worst = longest(words.adjectives) + 1 + longest(words.animals) + char_len(&suffix_tag(max_suffix));
	if worst > MAX_LABEL_CHARS {
		return Err(Error::InvalidDictionary {
			message: format!(
				"two-word labels with suffix {} can reach {} characters (limit {})",
				max_suffix, worst, MAX_LABEL_CHARS
			),
		});
	}

	Ok(())
}
