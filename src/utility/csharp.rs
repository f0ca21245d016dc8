use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

/// Turn arbitrary sheet text into a valid identifier.
pub fn identifier(text: &str) -> String {
	static INVALID: OnceLock<Regex> = OnceLock::new();
	let invalid = INVALID
		.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("pattern should compile"));

	let mut output = invalid.replace_all(text.trim(), "_").into_owned();
	if output.is_empty() || output.starts_with(|char: char| char.is_ascii_digit()) {
		output.insert(0, '_');
	}
	output
}

/// Quote a string as a regular string literal.
pub fn string_literal(text: &str) -> String {
	let mut output = String::with_capacity(text.len() + 2);
	output.push('"');
	for char in text.chars() {
		match char {
			'"' => output.push_str("\\\""),
			'\\' => output.push_str("\\\\"),
			'\n' => output.push_str("\\n"),
			'\r' => output.push_str("\\r"),
			'\t' => output.push_str("\\t"),
			other => output.push(other),
		}
	}
	output.push('"');
	output
}

/// Float literal with the `f` suffix. Input is expected to already parse as a
/// number.
pub fn float_literal(text: &str) -> String {
	format!("{}f", text.trim())
}

/// Append a trailing line comment, if any.
pub fn with_comment<'a>(statement: &'a str, comment: Option<&str>) -> Cow<'a, str> {
	match comment.map(str::trim).filter(|comment| !comment.is_empty()) {
		Some(comment) => Cow::Owned(format!("{statement} // {comment}")),
		None => Cow::Borrowed(statement),
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn identifier_sanitizes() {
		assert_eq!(identifier("Item Names"), "Item_Names");
		assert_eq!(identifier("2nd-pass"), "_2nd_pass");
		assert_eq!(identifier(""), "_");
		assert_eq!(identifier("ok_name"), "ok_name");
	}

	#[test]
	fn string_literal_escapes() {
		assert_eq!(string_literal(r#"say "hi"\n"#), r#""say \"hi\"\\n""#);
		assert_eq!(string_literal("a\nb"), r#""a\nb""#);
	}

	#[test]
	fn comment_is_optional() {
		assert_eq!(with_comment("x;", Some(" note ")), "x; // note");
		assert_eq!(with_comment("x;", Some("  ")), "x;");
		assert_eq!(with_comment("x;", None), "x;");
	}
}
