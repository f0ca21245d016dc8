use std::fmt::Write;

use crate::utility::csharp;

use super::sheet::{IdSection, IdsSheet};

/// Emit the body of an IDs class for one sheet. Each column group becomes a
/// region; enum groups are additionally, or with `only_enums` exclusively,
/// emitted as an enum.
pub fn emit_sheet(sheet: &IdsSheet, only_enums: bool) -> String {
	let mut output = String::new();

	for section in &sheet.sections {
		let name = csharp::identifier(&section.name);
		writeln!(output, "\t#region {name}").ok();

		if !(section.is_enum && only_enums) {
			emit_constants(&mut output, section);
		}

		if section.is_enum {
			emit_enum(&mut output, &name, section);
		}

		writeln!(output, "\t#endregion").ok();
		output.push('\n');
	}

	output
}

fn emit_constants(output: &mut String, section: &IdSection) {
	for entry in &section.entries {
		let statement = format!(
			"public const int {} = {};",
			csharp::identifier(&entry.key),
			entry.value
		);
		writeln!(
			output,
			"\t{}",
			csharp::with_comment(&statement, entry.comment.as_deref())
		)
		.ok();
	}
}

fn emit_enum(output: &mut String, name: &str, section: &IdSection) {
	writeln!(output, "\tpublic enum {name}").ok();
	output.push_str("\t{\n");
	for entry in &section.entries {
		writeln!(
			output,
			"\t\t{} = {},",
			csharp::identifier(&entry.key),
			entry.value
		)
		.ok();
	}
	output.push_str("\t}\n");
}
