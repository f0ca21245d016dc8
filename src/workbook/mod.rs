mod document;
mod error;
mod grid;
mod merge;
mod workbook;

pub use {
	document::open,
	error::{Error, Result},
	grid::{Grid, GridCell, GridRow, GridWorkbook, MergedRegion},
	merge::MergeTracker,
	workbook::{cell_text, Cell, Row, Sheet, Workbook},
};
