use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PbpError {
	#[error("Failed to build HTTP client: {0}")]
	Client(#[from] reqwest::Error),

	#[error("Failed to read roster {path}: {source}")]
	Roster {
		path: PathBuf,
		#[source]
		source: csv::Error,
	},

	#[error("Failed to create output directory {path}: {source}")]
	OutputDir {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error(transparent)]
	Csv(#[from] csv::Error),

	#[error(transparent)]
	Io(#[from] io::Error),
}

impl PbpError {
	pub fn roster(path: impl Into<PathBuf>, source: csv::Error) -> Self {
		PbpError::Roster { path: path.into(), source }
	}

	pub fn output_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
		PbpError::OutputDir { path: path.into(), source }
	}
}
