use aho_corasick::AhoCorasick;

/// Literal placeholder substitution. Every occurrence of each placeholder is
/// replaced in a single pass, so replacement text is never rescanned.
pub fn render<V: AsRef<str>>(template: &str, replacements: &[(&str, V)]) -> String {
	let (placeholders, values): (Vec<&str>, Vec<&str>) = replacements
		.iter()
		.map(|(placeholder, value)| (*placeholder, value.as_ref()))
		.unzip();

	match AhoCorasick::new(&placeholders) {
		Ok(matcher) => matcher.replace_all(template, &values),
		Err(error) => {
			tracing::error!(%error, "failed to build placeholder matcher");
			template.to_string()
		}
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn replaces_every_occurrence() {
		let output = render("class %NAME% { %BODY% } // %NAME%", &[("%NAME%", "Ids"), ("%BODY%", "x")]);
		assert_eq!(output, "class Ids { x } // Ids");
	}

	#[test]
	fn replacement_text_is_not_rescanned() {
		let output = render("%A%", &[("%A%", "%B%"), ("%B%", "nope")]);
		assert_eq!(output, "%B%");
	}
}
