pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Embedding provider failed: {message}")]
	Embedding { message: String },
	#[error("Generation provider failed: {message}")]
	Generation { message: String },
	#[error("Entitlement lookup failed: {message}")]
	Entitlement { message: String },
	#[error("History store failed: {message}")]
	History { message: String },
	#[error("Responder is shutting down.")]
	Unavailable,
	#[error(transparent)]
	Index(#[from] sage_corpus::Error),
}
