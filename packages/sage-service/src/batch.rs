use std::sync::Arc;

use color_eyre::{Result, eyre};
use tokio::{sync::Semaphore, task::JoinSet};

use crate::EmbeddingProvider;

/// Embeds every text through a bounded worker pool. Output order always
/// matches input order, whatever order the calls complete in.
pub async fn embed_batch(
	provider: Arc<dyn EmbeddingProvider>,
	cfg: &sage_config::EmbeddingProviderConfig,
	texts: Vec<String>,
	workers: usize,
) -> Result<Vec<Vec<f32>>> {
	let total = texts.len();
	let semaphore = Arc::new(Semaphore::new(workers.max(1)));
	let mut set = JoinSet::new();

	for (idx, text) in texts.into_iter().enumerate() {
		let provider = provider.clone();
		let cfg = cfg.clone();
		let semaphore = semaphore.clone();

		set.spawn(async move {
			let _permit = semaphore
				.acquire_owned()
				.await
				.map_err(|err| eyre::eyre!("Embedding pool closed: {err}."))?;
			let vector = provider.embed(&cfg, &text).await?;

			Ok::<_, color_eyre::Report>((idx, vector))
		});
	}

	let mut slots: Vec<Option<Vec<f32>>> = vec![None; total];

	while let Some(joined) = set.join_next().await {
		let (idx, vector) = joined.map_err(|err| eyre::eyre!("Embedding task failed: {err}."))??;

		slots[idx] = Some(vector);
	}

	slots
		.into_iter()
		.map(|slot| slot.ok_or_else(|| eyre::eyre!("Embedding task produced no vector.")))
		.collect()
}
