use std::fmt;

use crate::export::ArtifactKind;

/// Non-fatal conditions surfaced during a compile. None of these abort the
/// run; the offending row or field is skipped or passed through.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Warning {
	#[error("sheet is empty")]
	EmptySheet,

	#[error("duplicate id {key}: keeping {kept}, ignoring {ignored}")]
	DuplicateId { key: String, kept: i32, ignored: i32 },

	#[error("missing value for key {0}")]
	MissingValue(String),

	#[error("value {value:?} for key {key} is not an integer")]
	InvalidId { key: String, value: String },

	#[error("unknown constant type {0:?}")]
	UnknownConstantType(String),

	#[error("constant {name} has malformed {kind} value {value:?}")]
	MalformedConstant {
		name: String,
		kind: String,
		value: String,
	},

	#[error("malformed json: {0}")]
	MalformedJson(String),

	#[error("attribute {0:?} does not resolve to an id")]
	UnresolvedAttribute(String),

	#[error("no output folder configured for {0}")]
	MissingOutput(ArtifactKind),

	#[error("json encryption requested without a cipher key")]
	MissingCipher,

	#[error("localization identifier {0} is declared more than once")]
	DuplicateIdentifier(String),
}

/// Where a warning was raised. Rows are 0-based sheet rows, so the header is
/// row 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
	pub workbook: Option<String>,
	pub sheet: Option<String>,
	pub row: Option<usize>,
	pub field: Option<String>,
}

impl Location {
	pub fn sheet(workbook: &str, sheet: &str) -> Self {
		Self {
			workbook: Some(workbook.to_string()),
			sheet: Some(sheet.to_string()),
			..Default::default()
		}
	}

	pub fn row(&self, row: usize) -> Self {
		Self {
			row: Some(row),
			..self.clone()
		}
	}

	pub fn field(&self, field: impl Into<String>) -> Self {
		Self {
			field: Some(field.into()),
			..self.clone()
		}
	}
}

impl fmt::Display for Location {
	fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		let parts = [
			self.workbook.clone(),
			self.sheet.clone(),
			self.row.map(|row| format!("row {row}")),
			self.field.clone(),
		];

		let mut first = true;
		for part in parts.into_iter().flatten() {
			if !first {
				formatter.write_str(" / ")?;
			}
			formatter.write_str(&part)?;
			first = false;
		}

		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
	pub location: Location,
	pub warning: Warning,
}

/// Collects diagnostics for one compile, tracing each as it arrives.
#[derive(Debug, Default)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn warn(&mut self, location: Location, warning: Warning) {
		tracing::warn!(%location, %warning, "data warning");
		self.entries.push(Diagnostic { location, warning });
	}

	pub fn extend(&mut self, other: Diagnostics) {
		self.entries.extend(other.entries);
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
		self.entries.iter()
	}

	pub fn into_vec(self) -> Vec<Diagnostic> {
		self.entries
	}
}
