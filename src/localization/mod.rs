mod charset;
mod compile;
mod emit;
mod locale;

pub use {
	charset::harvest,
	compile::{compile, LocalizationTable},
	emit::{blob_name, duplicate_identifiers, emit_blobs, emit_manager, emit_table},
	locale::{match_locales, LocaleMatch, SYSTEM_LOCALES},
};
