/// System locales and the keywords that associate a declared language column
/// with them. Keywords of three characters or fewer must match a whole token
/// of the column name; longer ones may appear anywhere in it.
pub const SYSTEM_LOCALES: &[(&str, &[&str])] = &[
	("English", &["english", "en"]),
	("Vietnamese", &["vietnam", "vn", "vi"]),
	("Japanese", &["japan", "jp", "ja"]),
	("Korean", &["korea", "kr", "ko"]),
	("ChineseSimplified", &["simplified", "chs", "cn"]),
	("ChineseTraditional", &["traditional", "cht", "tw"]),
	("Chinese", &["chinese", "zh"]),
	("Thai", &["thai", "th"]),
	("Spanish", &["spanish", "es"]),
	("French", &["french", "fr"]),
	("German", &["german", "de"]),
	("Russian", &["russian", "ru"]),
	("Portuguese", &["portug", "pt"]),
	("Indonesian", &["indonesia", "id"]),
	("Italian", &["italian", "it"]),
	("Turkish", &["turkish", "tr"]),
	("Arabic", &["arabic", "ar"]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMatch {
	pub locale: &'static str,
	pub language: String,
	/// False when the locale fell back to the first declared language.
	pub matched: bool,
}

/// Associate every system locale with a declared language. Returns nothing
/// when no languages are declared.
pub fn match_locales(languages: &[String]) -> Vec<LocaleMatch> {
	let Some(fallback) = languages.first() else {
		return vec![];
	};

	SYSTEM_LOCALES
		.iter()
		.map(|&(locale, keywords)| {
			let found = languages
				.iter()
				.find(|language| matches_keywords(language, keywords));
			LocaleMatch {
				locale,
				language: found.unwrap_or(fallback).clone(),
				matched: found.is_some(),
			}
		})
		.collect()
}

fn matches_keywords(language: &str, keywords: &[&str]) -> bool {
	let lower = language.to_lowercase();
	let tokens = lower
		.split(|char: char| !char.is_alphanumeric())
		.filter(|token| !token.is_empty())
		.collect::<Vec<_>>();

	keywords.iter().any(|keyword| match keyword.len() <= 3 {
		true => tokens.contains(keyword),
		false => lower.contains(keyword),
	})
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use super::*;

	fn language_for(matches: &[LocaleMatch], locale: &str) -> (String, bool) {
		let found = matches
			.iter()
			.find(|entry| entry.locale == locale)
			.expect("locale should be listed");
		(found.language.clone(), found.matched)
	}

	#[test]
	fn matches_names_and_codes() {
		let languages = ["English".to_string(), "VN".to_string(), "zh-TW".to_string()];
		let matches = match_locales(&languages);

		assert_eq!(language_for(&matches, "English"), ("English".into(), true));
		assert_eq!(language_for(&matches, "Vietnamese"), ("VN".into(), true));
		assert_eq!(language_for(&matches, "ChineseTraditional"), ("zh-TW".into(), true));
		assert_eq!(language_for(&matches, "Chinese"), ("zh-TW".into(), true));
		assert_eq!(language_for(&matches, "Korean"), ("English".into(), false));
	}

	#[test]
	fn short_codes_do_not_match_inside_words() {
		// "french" contains "en" but is not English.
		let languages = ["french".to_string()];
		let matches = match_locales(&languages);

		assert_eq!(language_for(&matches, "French"), ("french".into(), true));
		assert_eq!(language_for(&matches, "English"), ("french".into(), false));
	}

	#[test]
	fn no_languages_no_matches() {
		assert!(match_locales(&[]).is_empty());
	}
}
