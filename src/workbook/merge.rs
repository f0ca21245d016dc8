/// Tracks the last non-empty merged value seen in each column, so empty cells
/// covered by a merge read as the value of the merge's top-left cell.
#[derive(Debug, Default)]
pub struct MergeTracker {
	last: Vec<Option<String>>,
}

impl MergeTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Effective value of a cell given its own text and merged flag.
	pub fn resolve(&mut self, column: usize, text: String, merged: bool) -> String {
		if !merged {
			return text;
		}

		if self.last.len() <= column {
			self.last.resize(column + 1, None);
		}

		if !text.trim().is_empty() {
			self.last[column] = Some(text.clone());
			return text;
		}

		self.last[column].clone().unwrap_or(text)
	}
}
