/// A workbook is a named collection of sheets.
pub trait Workbook: Sync {
	fn name(&self) -> &str;

	/// Sheet names in workbook order.
	fn sheet_names(&self) -> Vec<String>;

	fn sheet(&self, name: &str) -> Option<&dyn Sheet>;
}

/// An ordered grid of rows. Row 0 is always the header row.
pub trait Sheet: Sync {
	fn name(&self) -> &str;

	fn row_count(&self) -> usize;

	fn row(&self, index: usize) -> Option<&dyn Row>;
}

pub trait Row {
	fn cell(&self, index: usize) -> Option<&dyn Cell>;

	/// Number of physical cells in this row. Trailing cells beyond this are
	/// treated as absent.
	fn cell_count(&self) -> usize;
}

pub trait Cell {
	fn as_string(&self) -> String;

	fn is_merged(&self) -> bool;

	/// A value computed by the spreadsheet application for a formula cell.
	/// Formulas are never evaluated here.
	fn formula_result(&self) -> Option<String> {
		None
	}
}

/// Effective text of a cell, preferring a pre-computed formula result. Absent
/// cells read as empty.
pub fn cell_text(sheet: &dyn Sheet, row: usize, column: usize) -> (String, bool) {
	let Some(cell) = sheet.row(row).and_then(|row| row.cell(column)) else {
		return (String::new(), false);
	};

	let text = cell.formula_result().unwrap_or_else(|| cell.as_string());
	(text, cell.is_merged())
}
