use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("workbook {path} could not be read", path = .0.display())]
	Unreadable(PathBuf, #[source] std::io::Error),

	#[error("workbook {path} is malformed: {1}", path = .0.display())]
	Malformed(PathBuf, #[source] serde_json::Error),

	#[error(transparent)]
	Failure(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
