use strum::{Display, EnumString};

use crate::utility::text;

use super::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum FieldKind {
	Number,
	String,
	Bool,
	ArrayNumber,
	ArrayString,
	ArrayBool,
	Json,
}

/// Declared type of one JSON sheet column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValueType {
	pub name: String,
	pub kind: FieldKind,
}

/// Derive field types from a sheet's header suffixes and column contents.
pub fn infer_field_types(table: &Table) -> Vec<FieldValueType> {
	table
		.headers
		.iter()
		.enumerate()
		.filter_map(|(column, header)| {
			let header = header.as_ref()?;
			let values = table
				.rows
				.iter()
				.map(|row| row.values[column].as_str())
				.filter(|value| !value.is_empty());

			let kind = if header.is_json {
				FieldKind::Json
			} else if header.is_array {
				let elements = values.flat_map(text::split_array).collect::<Vec<_>>();
				match infer_scalar(&elements) {
					Some(FieldKind::Number) => FieldKind::ArrayNumber,
					Some(FieldKind::Bool) => FieldKind::ArrayBool,
					_ => FieldKind::ArrayString,
				}
			} else {
				infer_scalar(&values.collect::<Vec<_>>()).unwrap_or(FieldKind::String)
			};

			Some(FieldValueType {
				name: header.name.clone(),
				kind,
			})
		})
		.collect()
}

fn infer_scalar(values: &[&str]) -> Option<FieldKind> {
	if values.is_empty() {
		return None;
	}

	if values.iter().all(|value| text::is_number(value)) {
		return Some(FieldKind::Number);
	}

	if values.iter().all(|value| text::parse_bool(value).is_some()) {
		return Some(FieldKind::Bool);
	}

	Some(FieldKind::String)
}
