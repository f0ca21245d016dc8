use serde::Serialize;
use serde_json::Value;

use crate::{ids::IdRegistry, utility::text};

use super::table::{ColumnHeader, TableRow};

const NULL_ATTRIBUTE: &str = "ATT_NULL";

/// One attribute group compiled from an `attribute` column and the
/// `value`/`increase`/`max`/`unlock` columns that follow it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attribute {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<i32>,
	#[serde(rename = "idString")]
	pub id_string: String,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub values: Option<Vec<Value>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub increase: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub increases: Option<Vec<Value>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub max: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub maxes: Option<Vec<Value>>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub unlock: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub unlocks: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
	Value,
	Increase,
	Max,
	Unlock,
}

impl Part {
	fn from_header(header: &ColumnHeader) -> Option<Self> {
		let lower = header.raw.to_ascii_lowercase();
		let base = lower
			.trim_end_matches("[]")
			.trim_end_matches(|char: char| char.is_ascii_digit());

		let part = match base {
			"value" => Self::Value,
			"increase" => Self::Increase,
			"max" => Self::Max,
			"unlock" => Self::Unlock,
			_ => return None,
		};
		Some(part)
	}
}

/// Whether an attribute group starts at `column`, returning the exclusive end
/// column of the group if so.
pub fn group_at(headers: &[Option<ColumnHeader>], column: usize) -> Option<usize> {
	let header = headers.get(column)?.as_ref()?;
	let next = headers.get(column + 1)?.as_ref()?;

	let is_attribute =
		header.raw.to_ascii_lowercase().contains("attribute") && header.raw.len() <= 11;
	let has_value = next.raw.to_ascii_lowercase().contains("value") && next.raw.len() <= 9;
	if !is_attribute || !has_value {
		return None;
	}

	let mut seen = vec![];
	let mut end = column + 1;
	while let Some(Some(header)) = headers.get(end) {
		match Part::from_header(header) {
			Some(part) if !seen.contains(&part) => seen.push(part),
			_ => break,
		}
		end += 1;
	}

	Some(end)
}

/// Build the attribute for a group. `None` when the group is explicitly empty.
/// The returned flag is false when the id string did not resolve.
pub fn read_group(
	headers: &[Option<ColumnHeader>],
	row: &TableRow,
	start: usize,
	end: usize,
	registry: &IdRegistry,
) -> Option<(Attribute, bool)> {
	let id_string = row.values[start].clone();
	if id_string.is_empty() || id_string == NULL_ATTRIBUTE {
		return None;
	}

	let id = registry.resolve(&id_string);
	let mut attribute = Attribute {
		id,
		id_string,
		..Default::default()
	};

	for column in start + 1..end {
		let Some(header) = &headers[column] else {
			continue;
		};
		let Some(part) = Part::from_header(header) else {
			continue;
		};
		let raw = row.values[column].as_str();
		if raw.is_empty() {
			continue;
		}

		let (scalar, array) = match part {
			Part::Value => (&mut attribute.value, &mut attribute.values),
			Part::Increase => (&mut attribute.increase, &mut attribute.increases),
			Part::Max => (&mut attribute.max, &mut attribute.maxes),
			Part::Unlock => (&mut attribute.unlock, &mut attribute.unlocks),
		};

		if header.is_array {
			*array = Some(
				text::split_array(raw)
					.into_iter()
					.map(|element| number_or_reference(element, registry))
					.collect(),
			);
		} else {
			*scalar = Some(number_or_reference(raw, registry));
		}
	}

	Some((attribute, id.is_some()))
}

/// A number literal, else a registry reference, else the text as written.
pub fn number_or_reference(raw: &str, registry: &IdRegistry) -> Value {
	text::json_number(raw)
		.or_else(|| registry.resolve(raw).map(Value::from))
		.unwrap_or_else(|| Value::String(raw.to_string()))
}
