use std::path::PathBuf;

use super::source::Template;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("template {template} could not be read from {}", .path.display())]
	Unreadable {
		template: Template,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Failure(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
