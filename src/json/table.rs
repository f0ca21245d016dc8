use crate::workbook::{cell_text, MergeTracker, Sheet};

const EXCLUDE_MARKER: &str = "[x]";

/// A valid column header of a JSON sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeader {
	/// Header text as written, trimmed.
	pub raw: String,
	/// Emitted field name: type suffix stripped, spaces replaced.
	pub name: String,
	pub is_array: bool,
	pub is_json: bool,
}

impl ColumnHeader {
	/// `None` for empty or excluded headers.
	pub fn parse(text: &str) -> Option<Self> {
		let raw = text.trim();
		if raw.is_empty() || raw.contains(EXCLUDE_MARKER) {
			return None;
		}

		let (base, is_array, is_json) = if let Some(base) = raw.strip_suffix("[]") {
			(base, true, false)
		} else if let Some(base) = raw.strip_suffix("{}") {
			(base, false, true)
		} else {
			(raw, false, false)
		};

		Some(Self {
			raw: raw.to_string(),
			name: base.trim().replace(' ', "_"),
			is_array,
			is_json,
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
	/// Sheet row index.
	pub index: usize,
	/// One trimmed value per header slot; invalid columns read empty.
	pub values: Vec<String>,
}

/// The header scan and merged-cell-propagated rows of a JSON sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
	pub headers: Vec<Option<ColumnHeader>>,
	pub rows: Vec<TableRow>,
}

pub fn read_table(sheet: &dyn Sheet) -> Table {
	let width = sheet.row(0).map_or(0, |row| row.cell_count());
	let headers = (0..width)
		.map(|column| ColumnHeader::parse(&cell_text(sheet, 0, column).0))
		.collect::<Vec<_>>();

	let mut merges = MergeTracker::new();
	let rows = (1..sheet.row_count())
		.map(|index| {
			let values = headers
				.iter()
				.enumerate()
				.map(|(column, header)| {
					let (text, merged) = cell_text(sheet, index, column);
					let value = merges.resolve(column, text, merged);
					match header {
						Some(_) => value.trim().to_string(),
						None => String::new(),
					}
				})
				.collect();
			TableRow { index, values }
		})
		.collect();

	Table { headers, rows }
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use crate::workbook::{Grid, MergedRegion};

	use super::*;

	#[test]
	fn header_parsing() {
		assert_eq!(ColumnHeader::parse(""), None);
		assert_eq!(ColumnHeader::parse("note [x]"), None);

		let header = ColumnHeader::parse(" drop rates[] ").unwrap();
		assert_eq!(header.name, "drop_rates");
		assert!(header.is_array);

		let header = ColumnHeader::parse("extra{}").unwrap();
		assert_eq!(header.name, "extra");
		assert!(header.is_json);
	}

	#[test]
	fn merged_values_propagate_down() {
		let grid = Grid::new("Items")
			.with_row(["group", "name", "memo [x]"])
			.with_row(["A", "one", "x"])
			.with_row(["", "two", ""])
			.with_row(["", "three", ""])
			.with_row(["B", "four", ""])
			.with_merge(MergedRegion::column(0, 1, 3));

		let table = read_table(&grid);

		assert_eq!(table.headers[2], None);
		let groups = table
			.rows
			.iter()
			.map(|row| row.values[0].as_str())
			.collect::<Vec<_>>();
		assert_eq!(groups, vec!["A", "A", "A", "B"]);
		assert_eq!(table.rows[0].values[2], "");
	}
}
