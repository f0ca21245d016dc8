use std::{fs, path::Path};

use anyhow::Context;

use super::artifact::Artifact;

/// Destination for generated artifacts.
pub trait FileWriter {
	fn write(&self, folder: &Path, file_name: &str, content: &str) -> anyhow::Result<()>;
}

/// Writes artifacts to the local file system, creating folders as needed.
#[derive(Debug, Default)]
pub struct FsWriter;

impl FileWriter for FsWriter {
	fn write(&self, folder: &Path, file_name: &str, content: &str) -> anyhow::Result<()> {
		fs::create_dir_all(folder)
			.with_context(|| format!("failed to create {}", folder.display()))?;

		let path = folder.join(file_name);
		fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))
	}
}

#[derive(Debug, Default, PartialEq)]
pub struct WriteSummary {
	pub written: usize,
	pub failed: usize,
}

/// Hand every artifact to `writer`. A failed write is logged and counted; it
/// does not stop the remaining artifacts.
pub fn write(artifacts: &[Artifact], writer: &dyn FileWriter) -> WriteSummary {
	let mut summary = WriteSummary::default();

	for artifact in artifacts {
		match writer.write(&artifact.folder, &artifact.file_name, &artifact.content) {
			Ok(()) => {
				tracing::debug!(
					folder = %artifact.folder.display(),
					file_name = artifact.file_name,
					"artifact written"
				);
				summary.written += 1;
			}
			Err(error) => {
				tracing::error!(file_name = artifact.file_name, ?error, "write failed");
				summary.failed += 1;
			}
		}
	}

	summary
}
