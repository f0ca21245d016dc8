use serde::Deserialize;

use super::workbook::{Cell, Row, Sheet, Workbook};

/// In-memory workbook made of [`Grid`] sheets.
#[derive(Debug, Clone, Default)]
pub struct GridWorkbook {
	name: String,
	sheets: Vec<Grid>,
}

impl GridWorkbook {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			sheets: vec![],
		}
	}

	pub fn with_sheet(mut self, sheet: Grid) -> Self {
		self.sheets.push(sheet);
		self
	}
}

impl Workbook for GridWorkbook {
	fn name(&self) -> &str {
		&self.name
	}

	fn sheet_names(&self) -> Vec<String> {
		self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
	}

	fn sheet(&self, name: &str) -> Option<&dyn Sheet> {
		self.sheets
			.iter()
			.find(|sheet| sheet.name == name)
			.map(|sheet| sheet as &dyn Sheet)
	}
}

/// In-memory sheet. Cells covered by a merged region report themselves as
/// merged, including the region's top-left cell.
#[derive(Debug, Clone, Default)]
pub struct Grid {
	name: String,
	rows: Vec<GridRow>,
}

impl Grid {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			rows: vec![],
		}
	}

	pub fn with_row<I, S>(mut self, cells: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.push_row(GridRow {
			cells: cells.into_iter().map(GridCell::new).collect(),
		});
		self
	}

	pub fn with_merge(mut self, region: MergedRegion) -> Self {
		self.merge(region);
		self
	}

	pub fn push_row(&mut self, row: GridRow) {
		self.rows.push(row);
	}

	/// Mark every cell of `region` as merged. Inverted regions cover nothing.
	pub fn merge(&mut self, region: MergedRegion) {
		if !region.is_ordered() {
			return;
		}

		for row_index in region.first_row..=region.last_row {
			if self.rows.len() <= row_index {
				self.rows.resize_with(row_index + 1, GridRow::default);
			}
			let row = &mut self.rows[row_index];
			if row.cells.len() <= region.last_column {
				row.cells.resize_with(region.last_column + 1, GridCell::default);
			}
			for cell in &mut row.cells[region.first_column..=region.last_column] {
				cell.merged = true;
			}
		}
	}
}

impl Sheet for Grid {
	fn name(&self) -> &str {
		&self.name
	}

	fn row_count(&self) -> usize {
		self.rows.len()
	}

	fn row(&self, index: usize) -> Option<&dyn Row> {
		self.rows.get(index).map(|row| row as &dyn Row)
	}
}

#[derive(Debug, Clone, Default)]
pub struct GridRow {
	cells: Vec<GridCell>,
}

impl GridRow {
	pub fn new(cells: Vec<GridCell>) -> Self {
		Self { cells }
	}
}

impl Row for GridRow {
	fn cell(&self, index: usize) -> Option<&dyn Cell> {
		self.cells.get(index).map(|cell| cell as &dyn Cell)
	}

	fn cell_count(&self) -> usize {
		self.cells.len()
	}
}

#[derive(Debug, Clone, Default)]
pub struct GridCell {
	value: String,
	result: Option<String>,
	merged: bool,
}

impl GridCell {
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			..Default::default()
		}
	}

	/// A formula cell. `formula` is the formula text, `result` the value last
	/// computed for it.
	pub fn formula(formula: impl Into<String>, result: impl Into<String>) -> Self {
		Self {
			value: formula.into(),
			result: Some(result.into()),
			merged: false,
		}
	}
}

impl Cell for GridCell {
	fn as_string(&self) -> String {
		self.value.clone()
	}

	fn is_merged(&self) -> bool {
		self.merged
	}

	fn formula_result(&self) -> Option<String> {
		self.result.clone()
	}
}

/// Inclusive rectangle of merged cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MergedRegion {
	pub first_row: usize,
	pub last_row: usize,
	pub first_column: usize,
	pub last_column: usize,
}

impl MergedRegion {
	/// A vertical merge spanning `first_row..=last_row` in one column.
	pub fn column(column: usize, first_row: usize, last_row: usize) -> Self {
		Self {
			first_row,
			last_row,
			first_column: column,
			last_column: column,
		}
	}

	/// Whether the first row and column do not exceed the last ones.
	pub fn is_ordered(&self) -> bool {
		self.first_row <= self.last_row && self.first_column <= self.last_column
	}
}
