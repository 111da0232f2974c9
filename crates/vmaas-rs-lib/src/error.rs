//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("bincode error: {0}")]
	Bincode(#[from] bincode::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	/// The snapshot carries a `last_change` that is not RFC 3339.
	#[error("parsing last_change: {0}")]
	LastChange(#[source] time::error::Parse),
	/// The request was rejected before any resolution work started.
	#[error("processing input: {0}")]
	ProcessingInput(String),
}
