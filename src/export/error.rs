#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("no workbooks were provided")]
	NoWorkbooks,

	#[error("no output folder is configured for any artifact kind")]
	NoOutput,

	#[error(transparent)]
	Template(#[from] crate::template::Error),

	#[error(transparent)]
	Failure(#[from] anyhow::Error),
}

macro_rules! impl_to_failure {
	($source:ty) => {
		impl From<$source> for Error {
			fn from(value: $source) -> Self {
				Self::Failure(value.into())
			}
		}
	};
}

impl_to_failure!(serde_json::Error);

pub type Result<T, E = Error> = std::result::Result<T, E>;
