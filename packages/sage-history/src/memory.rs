use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{BoxFuture, HistoryStore, Result, Turn};

/// In-memory store for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
	records: RwLock<HashMap<String, Vec<Turn>>>,
}
impl MemoryHistoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}
impl HistoryStore for MemoryHistoryStore {
	fn load<'a>(&'a self, identity: &'a str) -> BoxFuture<'a, Result<Vec<Turn>>> {
		Box::pin(async move {
			let records = self.records.read().await;

			Ok(records.get(identity).cloned().unwrap_or_default())
		})
	}

	fn save<'a>(&'a self, identity: &'a str, turns: &'a [Turn]) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut records = self.records.write().await;

			records.insert(identity.to_string(), turns.to_vec());

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn round_trips_and_overwrites() {
		let store = MemoryHistoryStore::new();
		let turns = vec![Turn { question: "Q".to_string(), answer: "A".to_string() }];

		store.save("1", &turns).await.expect("Failed to save history.");

		assert_eq!(store.load("1").await.expect("Failed to load history."), turns);
		assert!(store.load("2").await.expect("Failed to load history.").is_empty());

		store.save("1", &[]).await.expect("Failed to save history.");

		assert!(store.load("1").await.expect("Failed to load history.").is_empty());
	}
}
