pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Embedding dimension {actual} does not match the index dimension {expected}.")]
	DimensionMismatch { expected: usize, actual: usize },
	#[error("Cannot index an empty embedding vector.")]
	EmptyEmbedding,
}
