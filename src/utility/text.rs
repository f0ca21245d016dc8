/// Split an array cell into trimmed elements. Surrounding brackets are
/// optional; elements are separated by `,` or `|`. An empty cell has no
/// elements.
pub fn split_array(text: &str) -> Vec<&str> {
	let trimmed = text.trim();
	let inner = trimmed
		.strip_prefix('[')
		.and_then(|rest| rest.strip_suffix(']'))
		.unwrap_or(trimmed);

	if inner.trim().is_empty() {
		return vec![];
	}

	inner.split([',', '|']).map(str::trim).collect()
}

pub fn parse_int(text: &str) -> Option<i32> {
	text.trim().parse().ok()
}

pub fn is_number(text: &str) -> bool {
	let text = text.trim();
	!text.is_empty() && text.parse::<f64>().map_or(false, f64::is_finite)
}

pub fn parse_bool(text: &str) -> Option<bool> {
	match text.trim().to_ascii_lowercase().as_str() {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

/// A number as JSON, integral where possible.
pub fn json_number(text: &str) -> Option<serde_json::Value> {
	let text = text.trim();
	if let Ok(value) = text.parse::<i64>() {
		return Some(value.into());
	}

	let value = text.parse::<f64>().ok()?;
	serde_json::Number::from_f64(value).map(serde_json::Value::Number)
}

pub fn is_zero(text: &str) -> bool {
	text.trim().parse::<f64>().map_or(false, |value| value == 0.)
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn split_array_handles_brackets_and_separators() {
		assert_eq!(split_array("[1,2,3]"), vec!["1", "2", "3"]);
		assert_eq!(split_array("a, b, c"), vec!["a", "b", "c"]);
		assert_eq!(split_array("x|y"), vec!["x", "y"]);
		assert_eq!(split_array(" [ ] "), Vec::<&str>::new());
		assert_eq!(split_array(""), Vec::<&str>::new());
	}

	#[test]
	fn numbers() {
		assert_eq!(json_number("12"), Some(json!(12)));
		assert_eq!(json_number("1.5"), Some(json!(1.5)));
		assert_eq!(json_number("abc"), None);
		assert!(is_number(" 3.25 "));
		assert!(!is_number("NaN"));
		assert!(is_zero("0.0"));
		assert!(!is_zero("zero"));
	}
}
