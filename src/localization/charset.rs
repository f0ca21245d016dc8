use std::collections::HashSet;

/// Unique characters across `texts`, in first-seen order.
pub fn harvest<'a>(texts: impl IntoIterator<Item = &'a str>) -> String {
	let mut seen = HashSet::new();
	texts
		.into_iter()
		.flat_map(str::chars)
		.filter(|char| seen.insert(*char))
		.collect()
}
