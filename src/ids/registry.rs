use std::{
	borrow::Cow,
	collections::{btree_map, BTreeMap},
};

use aho_corasick::{AhoCorasick, MatchKind};
use anyhow::{Context, Result};

use crate::{
	diagnostic::{Diagnostics, Location, Warning},
	utility::text,
};

use super::sheet::{IdEntry, IdSection, IdsSheet};

/// Accumulates IDs from every IDs sheet of a build. The first registration of
/// a key wins; later registrations with a different value are reported and
/// ignored.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
	entries: BTreeMap<String, i32>,
}

impl RegistryBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register every entry of `sheet`, returning the sheet reduced to the
	/// entries that were accepted. Keys already registered, by this or an
	/// earlier sheet, are dropped from the returned sheet.
	pub fn register(
		&mut self,
		sheet: &IdsSheet,
		location: &Location,
		diagnostics: &mut Diagnostics,
	) -> IdsSheet {
		let sections = sheet
			.sections
			.iter()
			.map(|section| IdSection {
				entries: section
					.entries
					.iter()
					.filter(|entry| self.accept(entry, location, diagnostics))
					.cloned()
					.collect(),
				..section.clone()
			})
			.collect();

		IdsSheet {
			name: sheet.name.clone(),
			sections,
		}
	}

	fn accept(&mut self, entry: &IdEntry, location: &Location, diagnostics: &mut Diagnostics) -> bool {
		match self.entries.entry(entry.key.clone()) {
			btree_map::Entry::Vacant(vacant) => {
				vacant.insert(entry.value);
				true
			}
			btree_map::Entry::Occupied(occupied) => {
				let kept = *occupied.get();
				if kept != entry.value {
					diagnostics.warn(
						location.field(entry.key.clone()),
						Warning::DuplicateId {
							key: entry.key.clone(),
							kept,
							ignored: entry.value,
						},
					);
				}
				false
			}
		}
	}

	pub fn build(self) -> Result<IdRegistry> {
		let mut by_length = self.entries.keys().cloned().collect::<Vec<_>>();
		// Stable over the alphabetical key order, so ties stay deterministic.
		by_length.sort_by_key(String::len);

		let matcher = AhoCorasick::builder()
			.match_kind(MatchKind::LeftmostLongest)
			.build(&by_length)
			.context("failed to build id matcher")?;

		Ok(IdRegistry {
			entries: self.entries,
			by_length,
			matcher,
		})
	}
}

/// Global key to integer symbol table. Immutable once built.
#[derive(Debug, Clone)]
pub struct IdRegistry {
	entries: BTreeMap<String, i32>,
	by_length: Vec<String>,
	matcher: AhoCorasick,
}

impl Default for IdRegistry {
	fn default() -> Self {
		RegistryBuilder::new()
			.build()
			.expect("empty registry should always build")
	}
}

impl IdRegistry {
	/// Resolve a token that is either an integer literal or a registered key.
	pub fn resolve(&self, token: &str) -> Option<i32> {
		let token = token.trim();
		text::parse_int(token).or_else(|| self.get(token))
	}

	pub fn get(&self, key: &str) -> Option<i32> {
		self.entries.get(key).copied()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries in alphabetical key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), *value))
	}

	/// Keys in ascending length order.
	pub fn keys_by_length(&self) -> &[String] {
		&self.by_length
	}

	/// Replace every registered key occurring in `input` with its value. At
	/// each position the longest key wins, and a match only counts when it is
	/// not part of a larger identifier.
	pub fn substitute<'a>(&self, input: &'a str) -> Cow<'a, str> {
		if self.is_empty() {
			return Cow::Borrowed(input);
		}

		let mut output = String::new();
		let mut last = 0;
		for found in self.matcher.find_iter(input) {
			let before = input[..found.start()].chars().next_back();
			let after = input[found.end()..].chars().next();
			if before.is_some_and(is_identifier_char) || after.is_some_and(is_identifier_char) {
				continue;
			}

			let key = &self.by_length[found.pattern().as_usize()];
			output.push_str(&input[last..found.start()]);
			output.push_str(&self.entries[key].to_string());
			last = found.end();
		}

		if last == 0 {
			return Cow::Borrowed(input);
		}

		output.push_str(&input[last..]);
		Cow::Owned(output)
	}
}

fn is_identifier_char(char: char) -> bool {
	char.is_alphanumeric() || char == '_'
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use super::*;

	fn sheet(entries: &[(&str, i32)]) -> IdsSheet {
		IdsSheet {
			name: "IDs".into(),
			sections: vec![IdSection {
				name: "Section".into(),
				is_enum: false,
				entries: entries
					.iter()
					.map(|(key, value)| IdEntry {
						key: key.to_string(),
						value: *value,
						comment: None,
					})
					.collect(),
			}],
		}
	}

	fn registry(entries: &[(&str, i32)]) -> IdRegistry {
		let mut builder = RegistryBuilder::new();
		builder.register(&sheet(entries), &Location::default(), &mut Diagnostics::new());
		builder.build().expect("registry should build")
	}

	#[test]
	fn same_value_duplicate_is_silent() {
		let mut builder = RegistryBuilder::new();
		let mut diagnostics = Diagnostics::new();
		builder.register(&sheet(&[("HP", 1)]), &Location::default(), &mut diagnostics);
		builder.register(&sheet(&[("HP", 1)]), &Location::default(), &mut diagnostics);

		assert!(diagnostics.is_empty());
		assert_eq!(builder.build().unwrap().get("HP"), Some(1));
	}

	#[test]
	fn differing_duplicate_warns_once_and_keeps_first() {
		let mut builder = RegistryBuilder::new();
		let mut diagnostics = Diagnostics::new();
		builder.register(&sheet(&[("HP", 1)]), &Location::default(), &mut diagnostics);
		builder.register(&sheet(&[("HP", 7)]), &Location::default(), &mut diagnostics);

		let warnings = diagnostics.into_vec();
		assert_eq!(warnings.len(), 1);
		assert_eq!(
			warnings[0].warning,
			Warning::DuplicateId {
				key: "HP".into(),
				kept: 1,
				ignored: 7
			}
		);
		assert_eq!(builder.build().unwrap().get("HP"), Some(1));
	}

	#[test]
	fn register_returns_only_accepted_entries() {
		let mut builder = RegistryBuilder::new();
		let mut diagnostics = Diagnostics::new();
		builder.register(&sheet(&[("HP", 1)]), &Location::default(), &mut diagnostics);

		let accepted = builder.register(
			&sheet(&[("HP", 7), ("MP", 2), ("MP", 3)]),
			&Location::default(),
			&mut diagnostics,
		);

		let keys = accepted
			.entries()
			.map(|entry| (entry.key.as_str(), entry.value))
			.collect::<Vec<_>>();
		assert_eq!(keys, vec![("MP", 2)]);
		assert_eq!(accepted.sections[0].name, "Section");
		assert_eq!(diagnostics.len(), 2);
	}

	#[test]
	fn resolve_prefers_literals() {
		let registry = registry(&[("HP", 1), ("12", 99)]);

		assert_eq!(registry.resolve("12"), Some(12));
		assert_eq!(registry.resolve(" HP "), Some(1));
		assert_eq!(registry.resolve("MP"), None);
	}

	#[test]
	fn keys_by_length_is_ascending() {
		let registry = registry(&[("LONGEST", 3), ("A", 1), ("MID", 2)]);

		assert_eq!(registry.keys_by_length(), &["A", "MID", "LONGEST"]);
		assert_eq!(
			registry.iter().map(|(key, _)| key).collect::<Vec<_>>(),
			vec!["A", "LONGEST", "MID"]
		);
	}

	#[test]
	fn substitute_prefers_longest_whole_identifiers() {
		let registry = registry(&[("HP", 1), ("HP_MAX", 2), ("ATT", 3)]);

		assert_eq!(
			registry.substitute(r#"{"a": HP, "b": HP_MAX, "c": ATTACK}"#),
			r#"{"a": 1, "b": 2, "c": ATTACK}"#
		);
		assert_eq!(registry.substitute("[HP,HP_MAX]"), "[1,2]");
		assert!(matches!(registry.substitute("nothing"), Cow::Borrowed(_)));
	}
}
