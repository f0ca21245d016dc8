use std::{borrow::Cow, fs, io, path::PathBuf};

use strum::{Display, EnumIter};

use super::error::{Error, Result};

/// The text templates generated sources are rendered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Template {
	Ids,
	Constants,
	Localization,
	LocalizationManager,
}

impl Template {
	fn file_name(self) -> String {
		format!("{self}.txt")
	}

	fn builtin(self) -> &'static str {
		match self {
			Self::Ids => include_str!("../../templates/ids.txt"),
			Self::Constants => include_str!("../../templates/constants.txt"),
			Self::Localization => include_str!("../../templates/localization.txt"),
			Self::LocalizationManager => include_str!("../../templates/localization_manager.txt"),
		}
	}
}

pub trait Templates: Sync {
	fn template(&self, template: Template) -> Result<Cow<'_, str>>;
}

/// Templates shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builtin;

impl Templates for Builtin {
	fn template(&self, template: Template) -> Result<Cow<'_, str>> {
		Ok(Cow::Borrowed(template.builtin()))
	}
}

/// Templates read from a folder by file name, falling back to the built-in
/// template for any file that does not exist.
#[derive(Debug, Clone)]
pub struct Directory {
	root: PathBuf,
}

impl Directory {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}
}

impl Templates for Directory {
	fn template(&self, template: Template) -> Result<Cow<'_, str>> {
		let path = self.root.join(template.file_name());
		match fs::read_to_string(&path) {
			Ok(text) => Ok(Cow::Owned(text)),
			Err(error) if error.kind() == io::ErrorKind::NotFound => Builtin.template(template),
			Err(source) => Err(Error::Unreadable {
				template,
				path,
				source,
			}),
		}
	}
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;
	use strum::IntoEnumIterator;

	use super::*;

	#[test]
	fn builtin_templates_carry_their_placeholders() {
		let expected = [
			(Template::Ids, "%IDS%"),
			(Template::Constants, "%CONSTANTS%"),
			(Template::Localization, "%ID_STRINGS%"),
			(Template::LocalizationManager, "%LOCALE_CASES%"),
		];

		for (template, placeholder) in expected {
			let text = Builtin.template(template).unwrap();
			assert!(text.contains(placeholder), "{template} lacks {placeholder}");
			assert!(text.contains("%CLASS_NAME%"), "{template} lacks a class name");
		}
	}

	#[test]
	fn directory_overrides_by_file_name() {
		let folder = tempfile::tempdir().unwrap();
		fs::write(folder.path().join("constants.txt"), "custom %CONSTANTS%").unwrap();
		let templates = Directory::new(folder.path());

		assert_eq!(templates.template(Template::Constants).unwrap(), "custom %CONSTANTS%");
		for template in Template::iter().filter(|template| *template != Template::Constants) {
			assert_eq!(templates.template(template).unwrap(), template.builtin());
		}
	}
}
