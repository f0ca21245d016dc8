use itertools::Itertools;

use crate::{
	diagnostic::{Diagnostics, Location, Warning},
	ids::IdRegistry,
	utility::{csharp, text},
	workbook::{cell_text, Sheet},
};

use super::constant::{ConstantEntry, ValueType};

/// Read the `(name, value, type, comment)` rows of a constants sheet, sorted
/// by name.
pub fn read_sheet(
	sheet: &dyn Sheet,
	location: &Location,
	diagnostics: &mut Diagnostics,
) -> Vec<ConstantEntry> {
	if sheet.row_count() <= 1 {
		diagnostics.warn(location.clone(), Warning::EmptySheet);
		return vec![];
	}

	let mut entries = vec![];
	for row in 1..sheet.row_count() {
		let [name, raw_value, value_type, comment] =
			[0, 1, 2, 3].map(|column| cell_text(sheet, row, column).0.trim().to_string());

		if name.is_empty() || raw_value.is_empty() || value_type.is_empty() {
			continue;
		}

		let Ok(value_type) = value_type.parse::<ValueType>() else {
			diagnostics.warn(
				location.row(row).field(name),
				Warning::UnknownConstantType(value_type),
			);
			continue;
		};

		entries.push(ConstantEntry {
			name,
			raw_value,
			value_type,
			comment: (!comment.is_empty()).then_some(comment),
		});
	}

	entries.sort_by(|a, b| a.name.cmp(&b.name));
	entries
}

/// Compile a constants sheet into class body statements.
pub fn compile(
	sheet: &dyn Sheet,
	registry: &IdRegistry,
	location: &Location,
	diagnostics: &mut Diagnostics,
) -> String {
	read_sheet(sheet, location, diagnostics)
		.iter()
		.filter_map(|entry| {
			let statement = emit_entry(entry, registry);
			if statement.is_none() {
				diagnostics.warn(
					location.field(entry.name.clone()),
					Warning::MalformedConstant {
						name: entry.name.clone(),
						kind: entry.value_type.to_string(),
						value: entry.raw_value.clone(),
					},
				);
			}
			statement
		})
		.map(|statement| format!("\t{statement}\n"))
		.collect()
}

/// Format one constant. `None` when the raw value does not fit the declared
/// type.
fn emit_entry(entry: &ConstantEntry, registry: &IdRegistry) -> Option<String> {
	let name = csharp::identifier(&entry.name);
	let raw = entry.raw_value.as_str();

	use ValueType as VT;
	let statement = match entry.value_type {
		VT::Int => format!("public const int {name} = {};", int_value(raw, registry)),

		VT::Float => {
			if !text::is_number(raw) {
				return None;
			}
			format!("public const float {name} = {};", csharp::float_literal(raw))
		}

		VT::IntArray => {
			let values = text::split_array(raw)
				.into_iter()
				.map(|element| int_value(element, registry))
				.collect::<Vec<_>>();
			array_statement("int", &name, &values)
		}

		VT::FloatArray => {
			let elements = text::split_array(raw);
			if !elements.iter().all(|element| text::is_number(element)) {
				return None;
			}
			let values = elements
				.into_iter()
				.map(csharp::float_literal)
				.collect::<Vec<_>>();
			array_statement("float", &name, &values)
		}

		VT::Vector2 => vector_statement("Vector2", 2, &name, raw)?,
		VT::Vector3 => vector_statement("Vector3", 3, &name, raw)?,

		VT::String => format!(
			"public const string {name} = {};",
			csharp::string_literal(raw)
		),

		VT::StringArray => {
			let values = text::split_array(raw)
				.into_iter()
				.map(csharp::string_literal)
				.collect::<Vec<_>>();
			array_statement("string", &name, &values)
		}
	};

	Some(csharp::with_comment(&statement, entry.comment.as_deref()).into_owned())
}

/// Integer literal, resolved through the registry when it is not already a
/// number. Unresolved tokens are kept as written.
fn int_value(raw: &str, registry: &IdRegistry) -> String {
	match registry.resolve(raw) {
		Some(value) => value.to_string(),
		None => raw.trim().to_string(),
	}
}

fn array_statement(kind: &str, name: &str, values: &[String]) -> String {
	format!(
		"public static readonly {kind}[] {name} = new {kind}[{}] {{ {} }};",
		values.len(),
		values.iter().join(", ")
	)
}

fn vector_statement(kind: &str, size: usize, name: &str, raw: &str) -> Option<String> {
	let trimmed = raw.trim();
	let inner = trimmed
		.strip_prefix('(')
		.and_then(|rest| rest.strip_suffix(')'))
		.unwrap_or(trimmed);

	let components = text::split_array(inner);
	if components.len() != size || !components.iter().all(|component| text::is_number(component)) {
		return None;
	}

	Some(format!(
		"public static readonly {kind} {name} = new {kind}({});",
		components
			.into_iter()
			.map(csharp::float_literal)
			.join(", ")
	))
}
