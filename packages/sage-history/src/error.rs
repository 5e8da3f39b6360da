pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to write history record at {path:?}.")]
	WriteRecord { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to encode history record for {identity}.")]
	EncodeRecord { identity: String, source: serde_json::Error },
	#[error("Failed to create history directory at {path:?}.")]
	CreateDir { path: std::path::PathBuf, source: std::io::Error },
}
