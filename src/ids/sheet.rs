use crate::{
	diagnostic::{Diagnostics, Location, Warning},
	utility::text,
	workbook::{cell_text, Sheet},
};

const ENUM_MARKER: &str = "[enum]";
const GROUP_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct IdEntry {
	pub key: String,
	pub value: i32,
	pub comment: Option<String>,
}

/// One stride-3 column group of an IDs sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct IdSection {
	/// Header text with any enum marker removed.
	pub name: String,
	pub is_enum: bool,
	pub entries: Vec<IdEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdsSheet {
	pub name: String,
	pub sections: Vec<IdSection>,
}

impl IdsSheet {
	pub fn entries(&self) -> impl Iterator<Item = &IdEntry> {
		self.sections.iter().flat_map(|section| &section.entries)
	}
}

/// Read the `(key, value, comment)` column groups of an IDs sheet.
pub fn read_sheet(sheet: &dyn Sheet, location: &Location, diagnostics: &mut Diagnostics) -> IdsSheet {
	let mut output = IdsSheet {
		name: sheet.name().to_string(),
		sections: vec![],
	};

	if sheet.row_count() <= 1 {
		diagnostics.warn(location.clone(), Warning::EmptySheet);
		return output;
	}

	let width = (0..sheet.row_count())
		.filter_map(|index| sheet.row(index))
		.map(|row| row.cell_count())
		.max()
		.unwrap_or(0);

	for column in (0..width).step_by(GROUP_WIDTH) {
		let header = cell_text(sheet, 0, column).0;
		let is_enum = header.contains(ENUM_MARKER);
		let name = header.replace(ENUM_MARKER, "").trim().to_string();

		let mut entries = vec![];
		for row in 1..sheet.row_count() {
			let key = cell_text(sheet, row, column).0.trim().to_string();
			if key.is_empty() {
				continue;
			}

			let row_location = location.row(row).field(key.clone());
			let value = cell_text(sheet, row, column + 1).0;
			let value = value.trim();
			if value.is_empty() {
				diagnostics.warn(row_location, Warning::MissingValue(key));
				continue;
			}

			let Some(value) = text::parse_int(value) else {
				diagnostics.warn(
					row_location,
					Warning::InvalidId {
						key,
						value: value.to_string(),
					},
				);
				continue;
			};

			let comment = cell_text(sheet, row, column + 2).0.trim().to_string();
			entries.push(IdEntry {
				key,
				value,
				comment: (!comment.is_empty()).then_some(comment),
			});
		}

		if name.is_empty() && entries.is_empty() {
			continue;
		}

		output.sections.push(IdSection {
			name,
			is_enum,
			entries,
		});
	}

	output
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use crate::workbook::Grid;

	use super::*;

	#[test]
	fn reads_column_groups() {
		let grid = Grid::new("ItemIDs")
			.with_row(["Items", "", "", "Kind [enum]", "", ""])
			.with_row(["SWORD", "1", "sharp", "WEAPON", "0", ""])
			.with_row(["BOW", "2", "", "ARMOR", "1", ""])
			.with_row(["", "", "", "POTION", "2", "drinkable"]);

		let mut diagnostics = Diagnostics::new();
		let sheet = read_sheet(&grid, &Location::default(), &mut diagnostics);

		assert!(diagnostics.is_empty());
		assert_eq!(sheet.sections.len(), 2);
		assert_eq!(sheet.sections[0].name, "Items");
		assert!(!sheet.sections[0].is_enum);
		assert_eq!(
			sheet.sections[0].entries,
			vec![
				IdEntry {
					key: "SWORD".into(),
					value: 1,
					comment: Some("sharp".into())
				},
				IdEntry {
					key: "BOW".into(),
					value: 2,
					comment: None
				},
			]
		);
		assert_eq!(sheet.sections[1].name, "Kind");
		assert!(sheet.sections[1].is_enum);
		assert_eq!(sheet.sections[1].entries.len(), 3);
	}

	#[test]
	fn missing_and_invalid_values_warn() {
		let grid = Grid::new("IDs")
			.with_row(["Stats", "", ""])
			.with_row(["HP", "", ""])
			.with_row(["MP", "lots", ""])
			.with_row(["ATK", "3", ""]);

		let mut diagnostics = Diagnostics::new();
		let sheet = read_sheet(&grid, &Location::default(), &mut diagnostics);

		let warnings = diagnostics
			.iter()
			.map(|diagnostic| diagnostic.warning.clone())
			.collect::<Vec<_>>();
		assert_eq!(
			warnings,
			vec![
				Warning::MissingValue("HP".into()),
				Warning::InvalidId {
					key: "MP".into(),
					value: "lots".into()
				},
			]
		);
		assert_eq!(sheet.entries().count(), 1);
	}

	#[test]
	fn header_only_sheet_is_empty() {
		let grid = Grid::new("IDs").with_row(["Stats", "", ""]);

		let mut diagnostics = Diagnostics::new();
		let sheet = read_sheet(&grid, &Location::default(), &mut diagnostics);

		assert!(sheet.sections.is_empty());
		assert_eq!(diagnostics.len(), 1);
	}
}
