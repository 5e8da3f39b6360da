mod error;
mod file;
mod memory;

pub use error::{Error, Result};
pub use file::FileHistoryStore;
pub use memory::MemoryHistoryStore;

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One question/answer exchange. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
	pub question: String,
	pub answer: String,
}

/// Durable per-identity conversation log. The pipeline only appends turns;
/// same-identity calls are serialized by the responder facade, so the store
/// itself stays a plain key-value record.
pub trait HistoryStore
where
	Self: Send + Sync,
{
	/// Ordered history for `identity`. Unknown identities and undecodable
	/// records load as empty histories rather than errors.
	fn load<'a>(&'a self, identity: &'a str) -> BoxFuture<'a, Result<Vec<Turn>>>;

	/// Overwrites the record for `identity` with the full ordered sequence.
	fn save<'a>(&'a self, identity: &'a str, turns: &'a [Turn]) -> BoxFuture<'a, Result<()>>;
}
