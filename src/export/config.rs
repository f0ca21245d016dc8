use figment::value::magic::RelativePathBuf;
use serde::Deserialize;

use crate::{cipher, json};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub workbooks: Vec<WorkbookConfig>,
	pub kinds: KindConfig,
	pub ids: IdsConfig,
	pub constants: ConstantsConfig,
	pub json: JsonConfig,
	pub localization: LocalizationConfig,
	/// Folder of template overrides.
	pub templates: Option<RelativePathBuf>,
	pub cipher: Option<cipher::Config>,
}

#[derive(Debug, Deserialize)]
pub struct WorkbookConfig {
	pub path: RelativePathBuf,
	/// Sheets that are never compiled.
	#[serde(default)]
	pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
	Ids,
	Constants,
	Localization,
	Json,
}

/// Sheet name conventions that decide which compiler handles a sheet.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KindConfig {
	pub ids_suffix: String,
	pub constants_suffix: String,
	pub localization_prefix: String,
	pub ignore_prefix: String,
}

impl Default for KindConfig {
	fn default() -> Self {
		Self {
			ids_suffix: "IDs".into(),
			constants_suffix: "Constants".into(),
			localization_prefix: "Localization".into(),
			ignore_prefix: "~".into(),
		}
	}
}

impl KindConfig {
	/// `None` for sheets that are never compiled.
	pub fn classify(&self, sheet_name: &str) -> Option<SheetKind> {
		if !self.ignore_prefix.is_empty() && sheet_name.starts_with(&self.ignore_prefix) {
			return None;
		}

		let kind = if sheet_name.ends_with(&self.ids_suffix) {
			SheetKind::Ids
		} else if sheet_name.ends_with(&self.constants_suffix) {
			SheetKind::Constants
		} else if sheet_name.starts_with(&self.localization_prefix) {
			SheetKind::Localization
		} else {
			SheetKind::Json
		};

		Some(kind)
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IdsConfig {
	pub output: Option<RelativePathBuf>,
	/// One file per sheet, rather than one combined file.
	pub separate: bool,
	/// Emit `[enum]` groups only as enums.
	pub only_enums: bool,
	pub combined_name: String,
}

impl Default for IdsConfig {
	fn default() -> Self {
		Self {
			output: None,
			separate: true,
			only_enums: false,
			combined_name: "IDs".into(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConstantsConfig {
	pub output: Option<RelativePathBuf>,
	pub separate: bool,
	pub combined_name: String,
}

impl Default for ConstantsConfig {
	fn default() -> Self {
		Self {
			output: None,
			separate: true,
			combined_name: "Constants".into(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
	pub output: Option<RelativePathBuf>,
	/// One file per workbook mapping sheet names to their JSON text.
	pub combine: bool,
	pub encrypt: bool,
	#[serde(flatten)]
	pub options: json::Options,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
	pub output: Option<RelativePathBuf>,
	pub separate: bool,
	pub combined_name: String,
	pub manager_name: String,
	pub charset_output: Option<RelativePathBuf>,
	/// Languages whose characters are harvested for font subsetting.
	pub charset_languages: Vec<String>,
}

impl Default for LocalizationConfig {
	fn default() -> Self {
		Self {
			output: None,
			separate: true,
			combined_name: "Localization".into(),
			manager_name: "LocalizationManager".into(),
			charset_output: None,
			charset_languages: vec![],
		}
	}
}

#[cfg(test)]
mod test {
	use figment::{
		providers::{Format, Toml},
		Figment,
	};
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn classifies_sheet_names() {
		let kinds = KindConfig::default();

		assert_eq!(kinds.classify("ItemIDs"), Some(SheetKind::Ids));
		assert_eq!(kinds.classify("GameConstants"), Some(SheetKind::Constants));
		assert_eq!(kinds.classify("Localization_UI"), Some(SheetKind::Localization));
		assert_eq!(kinds.classify("Weapons"), Some(SheetKind::Json));
		assert_eq!(kinds.classify("~Scratch"), None);
	}

	#[test]
	fn defaults_fill_missing_keys() {
		let config = Figment::from(Toml::string(
			r#"
			[ids]
			output = "out/ids"
			only_enums = true

			[json]
			combine = true
			keep_zero = ["armor"]
			"#,
		))
		.extract::<Config>()
		.unwrap();

		assert!(config.ids.output.is_some());
		assert!(config.ids.separate);
		assert!(config.ids.only_enums);
		assert!(config.json.combine);
		assert!(config.json.options.keep_zero.contains("armor"));
		assert_eq!(config.kinds.ids_suffix, "IDs");
		assert_eq!(config.localization.manager_name, "LocalizationManager");
		assert!(config.constants.output.is_none());
	}
}
