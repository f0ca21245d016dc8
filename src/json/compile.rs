use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
	diagnostic::{Diagnostics, Location, Warning},
	ids::IdRegistry,
	utility::text,
};

use super::{
	attribute::{self, number_or_reference},
	field::{FieldKind, FieldValueType},
	table::{ColumnHeader, Table, TableRow},
};

const ATTRIBUTES_KEY: &str = "Attributes";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Options {
	/// Field names whose zero values are emitted rather than dropped.
	pub keep_zero: HashSet<String>,
	/// Pretty-print the emitted array.
	pub pretty: bool,
}

/// Compile a JSON sheet into the text of a JSON array, one object per
/// non-empty row.
pub fn compile(
	table: &Table,
	field_types: &[FieldValueType],
	registry: &IdRegistry,
	options: &Options,
	location: &Location,
	diagnostics: &mut Diagnostics,
) -> serde_json::Result<String> {
	let rows = Value::Array(
		compile_rows(table, field_types, registry, options, location, diagnostics)
			.into_iter()
			.map(Value::Object)
			.collect(),
	);

	match options.pretty {
		true => serde_json::to_string_pretty(&rows),
		false => serde_json::to_string(&rows),
	}
}

pub fn compile_rows(
	table: &Table,
	field_types: &[FieldValueType],
	registry: &IdRegistry,
	options: &Options,
	location: &Location,
	diagnostics: &mut Diagnostics,
) -> Vec<Map<String, Value>> {
	if table.rows.is_empty() {
		diagnostics.warn(location.clone(), Warning::EmptySheet);
	}

	let context = RowContext {
		headers: &table.headers,
		field_types,
		registry,
		options,
	};

	table
		.rows
		.iter()
		.filter_map(|row| context.compile_row(row, &location.row(row.index), diagnostics))
		.collect()
}

struct RowContext<'a> {
	headers: &'a [Option<ColumnHeader>],
	field_types: &'a [FieldValueType],
	registry: &'a IdRegistry,
	options: &'a Options,
}

impl RowContext<'_> {
	fn compile_row(
		&self,
		row: &TableRow,
		location: &Location,
		diagnostics: &mut Diagnostics,
	) -> Option<Map<String, Value>> {
		let mut object = Map::new();
		let mut nested = Map::new();
		let mut attributes = vec![];

		let mut column = 0;
		while column < self.headers.len() {
			let Some(header) = &self.headers[column] else {
				column += 1;
				continue;
			};

			if let Some(end) = attribute::group_at(self.headers, column) {
				if let Some((attribute, resolved)) =
					attribute::read_group(self.headers, row, column, end, self.registry)
				{
					if !resolved {
						diagnostics.warn(
							location.field(header.name.clone()),
							Warning::UnresolvedAttribute(attribute.id_string.clone()),
						);
					}
					attributes.push(attribute);
				}
				column = end;
				continue;
			}
			column += 1;

			let raw = row.values[column - 1].as_str();
			if raw.is_empty() {
				continue;
			}
			if text::is_zero(raw) && !self.options.keep_zero.contains(&header.name) {
				continue;
			}

			let kind = self
				.field_types
				.iter()
				.find(|field| field.name == header.name)
				.map_or(FieldKind::String, |field| field.kind);

			let value = self.convert(kind, raw, &location.field(header.name.clone()), diagnostics);

			match header.name.contains('.') {
				true => insert_path(&mut nested, &header.name, value),
				false => {
					object.insert(header.name.clone(), value);
				}
			}
		}

		if !attributes.is_empty() {
			let attributes = attributes
				.into_iter()
				.map(|attribute| serde_json::to_value(attribute).unwrap_or(Value::Null))
				.collect();
			object.insert(ATTRIBUTES_KEY.into(), Value::Array(attributes));
		}

		merge_objects(&mut object, nested);

		(!object.is_empty()).then_some(object)
	}

	fn convert(
		&self,
		kind: FieldKind,
		raw: &str,
		location: &Location,
		diagnostics: &mut Diagnostics,
	) -> Value {
		use FieldKind as FK;
		match kind {
			FK::Number => number_or_reference(raw, self.registry),

			FK::Bool => text::parse_bool(raw)
				.map(Value::Bool)
				.unwrap_or_else(|| Value::String(raw.into())),

			FK::String => match self.registry.resolve(raw) {
				Some(value) => value.into(),
				None => Value::String(raw.into()),
			},

			FK::ArrayNumber => text::split_array(raw)
				.into_iter()
				.map(|element| number_or_reference(element, self.registry))
				.collect(),

			FK::ArrayBool => text::split_array(raw)
				.into_iter()
				.map(|element| {
					text::parse_bool(element)
						.map(Value::Bool)
						.unwrap_or_else(|| Value::String(element.into()))
				})
				.collect(),

			FK::ArrayString => {
				let elements = text::split_array(raw);
				let references = elements
					.iter()
					.any(|element| self.registry.contains(element));

				elements
					.into_iter()
					.map(|element| match references {
						true => self
							.registry
							.resolve(element)
							.map_or_else(|| Value::String(element.into()), Value::from),
						false => Value::String(element.into()),
					})
					.collect()
			}

			FK::Json => {
				let substituted = self.registry.substitute(raw);
				match serde_json::from_str::<Value>(&substituted) {
					Ok(value) => value,
					Err(error) => {
						diagnostics.warn(location.clone(), Warning::MalformedJson(error.to_string()));
						Value::String(substituted.into_owned())
					}
				}
			}
		}
	}
}

/// Insert `value` at a dotted path, creating intermediate objects.
fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
	let mut segments = path.split('.').peekable();
	let mut current = root;

	while let Some(segment) = segments.next() {
		if segments.peek().is_none() {
			current.insert(segment.to_string(), value);
			return;
		}

		let entry = current
			.entry(segment.to_string())
			.or_insert_with(|| Value::Object(Map::new()));
		if !entry.is_object() {
			*entry = Value::Object(Map::new());
		}
		current = match entry {
			Value::Object(map) => map,
			_ => unreachable!("entry was just made an object"),
		};
	}
}

/// Deep-merge `source` into `target`; objects merge key by key, anything else
/// in `source` replaces the target value.
fn merge_objects(target: &mut Map<String, Value>, source: Map<String, Value>) {
	for (key, value) in source {
		match (target.get_mut(&key), value) {
			(Some(Value::Object(existing)), Value::Object(incoming)) => {
				merge_objects(existing, incoming)
			}
			(_, value) => {
				target.insert(key, value);
			}
		}
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use crate::{
		ids::{IdEntry, IdSection, IdsSheet, RegistryBuilder},
		json::{infer_field_types, read_table},
		workbook::{Grid, MergedRegion},
	};

	use super::*;

	fn registry(entries: &[(&str, i32)]) -> IdRegistry {
		let mut builder = RegistryBuilder::new();
		builder.register(
			&IdsSheet {
				name: "IDs".into(),
				sections: vec![IdSection {
					name: "All".into(),
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
			},
			&Location::default(),
			&mut Diagnostics::new(),
		);
		builder.build().unwrap()
	}

	fn run(grid: &Grid, registry: &IdRegistry, options: &Options) -> (Value, Diagnostics) {
		let table = read_table(grid);
		let types = infer_field_types(&table);
		let mut diagnostics = Diagnostics::new();
		let text = compile(&table, &types, registry, options, &Location::default(), &mut diagnostics)
			.unwrap();
		(serde_json::from_str(&text).unwrap(), diagnostics)
	}

	#[test]
	fn compiles_typed_fields() {
		let grid = Grid::new("Weapons")
			.with_row(["id", "name", "damage", "ranged", "tags[]", "costs[]", "note [x]"])
			.with_row(["SWORD", "Sword", "2.5", "false", "a, b", "1|2", "ignored"])
			.with_row(["BOW", "Bow", "4", "true", "", "", ""]);
		let registry = registry(&[("SWORD", 1), ("BOW", 2)]);

		let (value, diagnostics) = run(&grid, &registry, &Options::default());

		assert!(diagnostics.is_empty());
		assert_eq!(
			value,
			json!([
				{"id": 1, "name": "Sword", "damage": 2.5, "ranged": false, "tags": ["a", "b"], "costs": [1, 2]},
				{"id": 2, "name": "Bow", "damage": 4, "ranged": true},
			])
		);
	}

	#[test]
	fn string_fields_promote_registered_keys() {
		let grid = Grid::new("Drops")
			.with_row(["item", "label"])
			.with_row(["POTION", "free"])
			.with_row(["7", "cheap"])
			.with_row(["stone", "rare"]);
		let registry = registry(&[("POTION", 30)]);

		let (value, _) = run(&grid, &registry, &Options::default());

		assert_eq!(
			value,
			json!([
				{"item": 30, "label": "free"},
				{"item": 7, "label": "cheap"},
				{"item": "stone", "label": "rare"},
			])
		);
	}

	#[test]
	fn string_arrays_promote_when_any_element_resolves() {
		let grid = Grid::new("Loot")
			.with_row(["items[]"])
			.with_row(["POTION, 4, unknown"])
			.with_row(["x, y"]);
		let registry = registry(&[("POTION", 30)]);

		let (value, _) = run(&grid, &registry, &Options::default());

		assert_eq!(
			value,
			json!([
				{"items": [30, 4, "unknown"]},
				{"items": ["x", "y"]},
			])
		);
	}

	#[test]
	fn json_fields_substitute_and_report_malformed() {
		let grid = Grid::new("Quests")
			.with_row(["name", "reward{}"])
			.with_row(["first", r#"{"item": POTION, "bonus": POTION_BIG}"#])
			.with_row(["second", r#"{"item": 1"#]);
		let registry = registry(&[("POTION", 30), ("POTION_BIG", 31)]);

		let (value, diagnostics) = run(&grid, &registry, &Options::default());

		assert_eq!(
			value,
			json!([
				{"name": "first", "reward": {"item": 30, "bonus": 31}},
				{"name": "second", "reward": r#"{"item": 1"#},
			])
		);
		let diagnostics = diagnostics.into_vec();
		assert_eq!(diagnostics.len(), 1);
		assert_eq!(diagnostics[0].location.row, Some(2));
		assert_eq!(diagnostics[0].location.field.as_deref(), Some("reward"));
		assert!(matches!(diagnostics[0].warning, Warning::MalformedJson(_)));
	}

	#[test]
	fn zero_fields_drop_unless_kept() {
		let grid = Grid::new("Stats")
			.with_row(["hp", "armor", "name"])
			.with_row(["0", "0", "slime"]);
		let options = Options {
			keep_zero: HashSet::from(["armor".to_string()]),
			..Default::default()
		};

		let (value, _) = run(&grid, &IdRegistry::default(), &options);

		assert_eq!(value, json!([{"armor": 0, "name": "slime"}]));
	}

	#[test]
	fn dotted_fields_nest() {
		let grid = Grid::new("Units")
			.with_row(["name", "stats.hp", "stats.speed.base", "stats.speed.max"])
			.with_row(["knight", "10", "2", "5"]);

		let (value, _) = run(&grid, &IdRegistry::default(), &Options::default());

		assert_eq!(
			value,
			json!([{"name": "knight", "stats": {"hp": 10, "speed": {"base": 2, "max": 5}}}])
		);
	}

	#[test]
	fn attributes_group_per_row() {
		let grid = Grid::new("Gear")
			.with_row(["name", "attribute", "value", "increase", "attribute", "value"])
			.with_row(["ring", "ATT_HP", "10", "2", "ATT_NULL", "4"])
			.with_row(["band", "ATT_NULL", "1", "", "ATT_MP", "3"]);
		let registry = registry(&[("ATT_HP", 1), ("ATT_MP", 2)]);

		let (value, diagnostics) = run(&grid, &registry, &Options::default());

		assert!(diagnostics.is_empty());
		assert_eq!(
			value,
			json!([
				{"name": "ring", "Attributes": [{"id": 1, "idString": "ATT_HP", "value": 10, "increase": 2}]},
				{"name": "band", "Attributes": [{"id": 2, "idString": "ATT_MP", "value": 3}]},
			])
		);
	}

	#[test]
	fn empty_rows_are_dropped() {
		let grid = Grid::new("Items")
			.with_row(["name", "cost", "memo [x]"])
			.with_row(["", "", "only an excluded note"])
			.with_row(["axe", "3", ""]);

		let (value, _) = run(&grid, &IdRegistry::default(), &Options::default());

		assert_eq!(value, json!([{"name": "axe", "cost": 3}]));
	}

	#[test]
	fn merged_cells_fill_rows() {
		let grid = Grid::new("Items")
			.with_row(["group", "name"])
			.with_row(["A", "one"])
			.with_row(["", "two"])
			.with_row(["", "three"])
			.with_row(["B", "four"])
			.with_merge(MergedRegion::column(0, 1, 3));

		let (value, _) = run(&grid, &IdRegistry::default(), &Options::default());

		let groups = value
			.as_array()
			.unwrap()
			.iter()
			.map(|row| row["group"].clone())
			.collect::<Vec<_>>();
		assert_eq!(groups, vec![json!("A"), json!("A"), json!("A"), json!("B")]);
	}

	#[test]
	fn compile_is_idempotent() {
		let grid = Grid::new("Items")
			.with_row(["name", "cost"])
			.with_row(["axe", "3"]);
		let table = read_table(&grid);
		let types = infer_field_types(&table);
		let registry = IdRegistry::default();

		let once = compile(&table, &types, &registry, &Options::default(), &Location::default(), &mut Diagnostics::new());
		let twice = compile(&table, &types, &registry, &Options::default(), &Location::default(), &mut Diagnostics::new());
		assert_eq!(once.unwrap(), twice.unwrap());
	}
}
