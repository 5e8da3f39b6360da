use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::{BoxFuture, Error, HistoryStore, Result, Turn};

/// One pretty-printed JSON record per identity under a dedicated directory.
#[derive(Clone, Debug)]
pub struct FileHistoryStore {
	dir: PathBuf,
}
impl FileHistoryStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub async fn ensure_dir(&self) -> Result<()> {
		fs::create_dir_all(&self.dir)
			.await
			.map_err(|err| Error::CreateDir { path: self.dir.clone(), source: err })
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn record_path(&self, identity: &str) -> PathBuf {
		self.dir.join(format!("{}.json", record_stem(identity)))
	}
}
impl HistoryStore for FileHistoryStore {
	fn load<'a>(&'a self, identity: &'a str) -> BoxFuture<'a, Result<Vec<Turn>>> {
		Box::pin(async move {
			let path = self.record_path(identity);
			let raw = match fs::read_to_string(&path).await {
				Ok(raw) => raw,
				Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
				Err(err) => {
					tracing::warn!(identity, path = %path.display(), error = %err, "History record unreadable. Using empty history.");

					return Ok(Vec::new());
				},
			};

			match serde_json::from_str(&raw) {
				Ok(turns) => Ok(turns),
				Err(err) => {
					tracing::warn!(identity, path = %path.display(), error = %err, "History record undecodable. Using empty history.");

					Ok(Vec::new())
				},
			}
		})
	}

	fn save<'a>(&'a self, identity: &'a str, turns: &'a [Turn]) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let path = self.record_path(identity);
			let payload = serde_json::to_string_pretty(turns)
				.map_err(|err| Error::EncodeRecord { identity: identity.to_string(), source: err })?;

			fs::write(&path, payload)
				.await
				.map_err(|err| Error::WriteRecord { path, source: err })
		})
	}
}

/// Identities that are not filesystem-safe map to a stable name derived from
/// their bytes, so the same identity always lands on the same record.
fn record_stem(identity: &str) -> String {
	let safe = !identity.is_empty()
		&& identity
			.chars()
			.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));

	if safe {
		identity.to_string()
	} else {
		Uuid::new_v5(&Uuid::NAMESPACE_OID, identity.as_bytes()).to_string()
	}
}
