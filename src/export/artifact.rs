use std::path::PathBuf;

use strum::Display;

use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ArtifactKind {
	Ids,
	Constants,
	Json,
	Localization,
	Charset,
}

/// One generated file, ready to be handed to a writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
	pub kind: ArtifactKind,
	pub folder: PathBuf,
	pub file_name: String,
	pub content: String,
}

#[derive(Debug, Default)]
pub struct CompiledArtifacts {
	pub artifacts: Vec<Artifact>,
	pub diagnostics: Vec<Diagnostic>,
}

impl CompiledArtifacts {
	pub fn of_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &Artifact> {
		self.artifacts
			.iter()
			.filter(move |artifact| artifact.kind == kind)
	}

	pub fn find(&self, file_name: &str) -> Option<&Artifact> {
		self.artifacts
			.iter()
			.find(|artifact| artifact.file_name == file_name)
	}
}
