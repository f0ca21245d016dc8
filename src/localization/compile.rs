use crate::{
	diagnostic::{Diagnostics, Location, Warning},
	ids::IdRegistry,
	workbook::{cell_text, MergeTracker, Sheet},
};

const KEY_COLUMN: usize = 0;
const REFERENCE_COLUMN: usize = 1;
const FIRST_LANGUAGE_COLUMN: usize = 2;
const EXCLUDE_MARKER: &str = "[x]";

/// Id strings and per-language texts of one or more localization sheets.
/// Every text list is index-aligned with `ids`; the index is the implicit
/// numeric id of the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizationTable {
	pub name: String,
	pub ids: Vec<String>,
	/// Language names in column order. The first is the default language.
	pub languages: Vec<String>,
	pub texts: Vec<Vec<String>>,
}

impl LocalizationTable {
	pub fn default_language(&self) -> Option<&str> {
		self.languages.first().map(String::as_str)
	}

	pub fn texts(&self, language: &str) -> Option<&[String]> {
		let index = self.languages.iter().position(|name| name == language)?;
		Some(&self.texts[index])
	}

	/// Concatenate tables in order. Languages are the union in first-seen
	/// order; a table lacking a language contributes empty texts for it.
	pub fn combine(name: impl Into<String>, tables: &[LocalizationTable]) -> Self {
		let mut languages = Vec::<String>::new();
		for language in tables.iter().flat_map(|table| &table.languages) {
			if !languages.contains(language) {
				languages.push(language.clone());
			}
		}

		let texts = languages
			.iter()
			.map(|language| {
				tables
					.iter()
					.flat_map(|table| match table.texts(language) {
						Some(texts) => texts.to_vec(),
						None => vec![String::new(); table.ids.len()],
					})
					.collect()
			})
			.collect();

		Self {
			name: name.into(),
			ids: tables.iter().flat_map(|table| table.ids.clone()).collect(),
			languages,
			texts,
		}
	}
}

/// Compile a localization sheet. Column 0 holds the row key, column 1 an
/// optional reference suffix, and every further column one language.
pub fn compile(
	sheet: &dyn Sheet,
	registry: &IdRegistry,
	location: &Location,
	diagnostics: &mut Diagnostics,
) -> LocalizationTable {
	let mut table = LocalizationTable {
		name: sheet.name().to_string(),
		..Default::default()
	};

	if sheet.row_count() <= 1 {
		diagnostics.warn(location.clone(), Warning::EmptySheet);
		return table;
	}

	let width = sheet.row(0).map_or(0, |row| row.cell_count());
	let language_columns = (FIRST_LANGUAGE_COLUMN..width)
		.filter_map(|column| {
			let header = cell_text(sheet, 0, column).0.trim().to_string();
			(!header.is_empty() && !header.contains(EXCLUDE_MARKER)).then_some((column, header))
		})
		.collect::<Vec<_>>();

	table.languages = language_columns
		.iter()
		.map(|(_, language)| language.clone())
		.collect();
	table.texts = vec![vec![]; language_columns.len()];

	let mut merges = MergeTracker::new();
	for row in 1..sheet.row_count() {
		let key = cell_text(sheet, row, KEY_COLUMN).0.trim().to_string();
		let texts = language_columns
			.iter()
			.map(|(column, _)| {
				let (text, merged) = cell_text(sheet, row, *column);
				merges.resolve(*column, text, merged)
			})
			.collect::<Vec<_>>();

		if key.is_empty() {
			continue;
		}

		let reference = cell_text(sheet, row, REFERENCE_COLUMN).0.trim().to_string();
		table.ids.push(id_string(&key, &reference, registry));
		for (index, text) in texts.into_iter().enumerate() {
			table.texts[index].push(text);
		}
	}

	table
}

fn id_string(key: &str, reference: &str, registry: &IdRegistry) -> String {
	if reference.is_empty() {
		return key.to_string();
	}

	match registry.get(reference) {
		Some(value) => format!("{key}_{value}"),
		None => format!("{key}_{reference}"),
	}
}
