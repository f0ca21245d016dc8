mod artifact;
mod config;
mod error;
mod export;
mod writer;

pub use {
	artifact::{Artifact, ArtifactKind, CompiledArtifacts},
	config::{
		Config, ConstantsConfig, IdsConfig, JsonConfig, KindConfig, LocalizationConfig, SheetKind,
		WorkbookConfig,
	},
	error::{Error, Result},
	export::{compile, Selection, Services},
	writer::{write, FileWriter, FsWriter, WriteSummary},
};
