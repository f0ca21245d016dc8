use std::{fs, path::Path};

use serde::{de, Deserialize};

use super::{
	error::{Error, Result},
	grid::{Grid, GridCell, GridRow, GridWorkbook, MergedRegion},
};

#[derive(Debug, Deserialize)]
struct Document {
	sheets: Vec<DocumentSheet>,
}

#[derive(Debug, Deserialize)]
struct DocumentSheet {
	name: String,
	#[serde(default)]
	rows: Vec<Vec<DocumentCell>>,
	#[serde(default)]
	merges: Vec<MergedRegion>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentCell {
	Empty(()),
	Bool(bool),
	Number(serde_json::Number),
	Text(String),
	Formula { value: String, formula: String },
}

impl From<DocumentCell> for GridCell {
	fn from(cell: DocumentCell) -> Self {
		use DocumentCell as DC;
		match cell {
			DC::Empty(()) => GridCell::default(),
			DC::Bool(value) => GridCell::new(value.to_string()),
			DC::Number(value) => GridCell::new(value.to_string()),
			DC::Text(value) => GridCell::new(value),
			DC::Formula { value, formula } => GridCell::formula(formula, value),
		}
	}
}

/// Open a JSON workbook document. The workbook takes the file stem as its name.
pub fn open(path: &Path) -> Result<GridWorkbook> {
	let text = fs::read_to_string(path).map_err(|error| Error::Unreadable(path.into(), error))?;
	let name = path
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_default();

	parse(name, &text).map_err(|error| Error::Malformed(path.into(), error))
}

fn parse(name: String, text: &str) -> Result<GridWorkbook, serde_json::Error> {
	let document = serde_json::from_str::<Document>(text)?;

	let mut workbook = GridWorkbook::new(name);
	for sheet in document.sheets {
		if let Some(region) = sheet.merges.iter().find(|region| !region.is_ordered()) {
			return Err(de::Error::custom(format!(
				"sheet {} has an inverted merge region {region:?}",
				sheet.name
			)));
		}

		let mut grid = Grid::new(sheet.name);
		for row in sheet.rows {
			grid.push_row(GridRow::new(row.into_iter().map(GridCell::from).collect()));
		}
		for region in sheet.merges {
			grid.merge(region);
		}
		workbook = workbook.with_sheet(grid);
	}

	Ok(workbook)
}
