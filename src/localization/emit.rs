use std::fmt::Write;

use itertools::Itertools;

use crate::{template, utility::csharp};

use super::{
	compile::LocalizationTable,
	locale::{match_locales, LocaleMatch},
};

/// File stem of a language's text blob.
pub fn blob_name(table: &str, language: &str) -> String {
	format!("{}_{}", csharp::identifier(table), csharp::identifier(language))
}

/// One serialized text list per language, as `(language, file stem, json)`.
pub fn emit_blobs(table: &LocalizationTable) -> serde_json::Result<Vec<(String, String, String)>> {
	table
		.languages
		.iter()
		.zip(&table.texts)
		.map(|(language, texts)| {
			Ok((
				language.clone(),
				blob_name(&table.name, language),
				serde_json::to_string(texts)?,
			))
		})
		.collect()
}

/// Identifiers that more than one id string of `table` sanitizes to, in
/// first-seen order.
pub fn duplicate_identifiers(table: &LocalizationTable) -> Vec<String> {
	table
		.ids
		.iter()
		.map(|id| csharp::identifier(id))
		.duplicates()
		.collect()
}

/// Render the id table source for a localization table.
pub fn emit_table(table: &LocalizationTable, template: &str) -> String {
	let identifiers = table
		.ids
		.iter()
		.map(|id| csharp::identifier(id))
		.collect::<Vec<_>>();

	let mut constants = String::new();
	let mut enumeration = String::new();
	for (index, identifier) in identifiers.iter().enumerate() {
		writeln!(constants, "\tpublic const int {identifier} = {index};").ok();
		writeln!(enumeration, "\t\t{identifier} = {index},").ok();
	}

	let id_strings = table
		.ids
		.iter()
		.map(|id| format!("\t\t{},\n", csharp::string_literal(id)))
		.collect::<String>();

	let language_files = table
		.languages
		.iter()
		.map(|language| {
			format!(
				"\t\t{{ {}, {} }},\n",
				csharp::string_literal(language),
				csharp::string_literal(&blob_name(&table.name, language))
			)
		})
		.collect::<String>();

	let default_language = csharp::string_literal(table.default_language().unwrap_or_default());

	template::render(
		template,
		&[
			("%CLASS_NAME%", &csharp::identifier(&table.name)),
			("%CONSTANTS%", &constants),
			("%ENUM%", &enumeration),
			("%ID_STRINGS%", &id_strings),
			("%LANGUAGE_FILES%", &language_files),
			("%DEFAULT_LANGUAGE%", &default_language),
		],
	)
}

/// Render the manager source covering every language declared across
/// `tables`, mapping system locales onto declared languages.
pub fn emit_manager(name: &str, tables: &[LocalizationTable], template: &str) -> String {
	let languages = tables
		.iter()
		.flat_map(|table| &table.languages)
		.unique()
		.cloned()
		.collect::<Vec<_>>();

	let language_list = languages
		.iter()
		.map(|language| csharp::string_literal(language))
		.join(", ");

	let locale_cases = match_locales(&languages)
		.into_iter()
		.map(|LocaleMatch { locale, language, .. }| {
			format!(
				"\t\t\tcase SystemLanguage.{locale}: return {};\n",
				csharp::string_literal(&language)
			)
		})
		.collect::<String>();

	let default_language = csharp::string_literal(languages.first().map_or("", String::as_str));

	template::render(
		template,
		&[
			("%CLASS_NAME%", &csharp::identifier(name)),
			("%LANGUAGES%", &language_list),
			("%LOCALE_CASES%", &locale_cases),
			("%DEFAULT_LANGUAGE%", &default_language),
		],
	)
}
