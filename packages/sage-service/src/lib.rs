mod answer;
mod batch;
mod error;
pub mod prompts;

pub use batch::embed_batch;
pub use error::{Error, Result};

use std::{
	collections::HashMap,
	future::Future,
	path::Path,
	pin::Pin,
	sync::{Arc, Mutex as StdMutex},
};

use tokio::sync::{Mutex, Semaphore};

use sage_chunking::{ChunkingConfig, Tokenizer};
use sage_config::{
	CompletionProviderConfig, Config, EmbeddingProviderConfig, EntitlementProviderConfig,
};
use sage_corpus::{Tier, VectorIndex, load_document};
use sage_history::HistoryStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<f32>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

pub trait EntitlementProvider
where
	Self: Send + Sync,
{
	fn has_active_entitlement<'a>(
		&'a self,
		cfg: &'a EntitlementProviderConfig,
		identity: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<bool>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub completion: Arc<dyn CompletionProvider>,
	pub entitlement: Arc<dyn EntitlementProvider>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		completion: Arc<dyn CompletionProvider>,
		entitlement: Arc<dyn EntitlementProvider>,
	) -> Self {
		Self { embedding, completion, entitlement }
	}

	/// Providers backed by the HTTP clients in `sage-providers`.
	pub fn http() -> Self {
		Self::new(Arc::new(HttpEmbedding), Arc::new(HttpCompletion), Arc::new(HttpEntitlement))
	}
}

struct HttpEmbedding;
impl EmbeddingProvider for HttpEmbedding {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<f32>>> {
		Box::pin(sage_providers::embedding::embed(cfg, text))
	}
}

struct HttpCompletion;
impl CompletionProvider for HttpCompletion {
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(sage_providers::completion::complete(cfg, prompt))
	}
}

struct HttpEntitlement;
impl EntitlementProvider for HttpEntitlement {
	fn has_active_entitlement<'a>(
		&'a self,
		cfg: &'a EntitlementProviderConfig,
		identity: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<bool>> {
		Box::pin(sage_providers::entitlement::has_active_entitlement(cfg, identity))
	}
}

struct TierIndices {
	general_signal: VectorIndex,
	general_no_signal: VectorIndex,
	expert: VectorIndex,
}

/// Orchestrates the whole answering pipeline. Built once at process start;
/// the three tier indices never change afterwards, so concurrent answer
/// calls read them without locking.
pub struct Responder {
	cfg: Config,
	history: Arc<dyn HistoryStore>,
	providers: Providers,
	indices: TierIndices,
	identity_locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
	answer_permits: Semaphore,
}
impl Responder {
	/// Loads every corpus document, chunks and embeds it, and builds all
	/// three tier indices before the first answer can be served. An
	/// embedding failure here aborts startup; a missing document only
	/// leaves its tier permanently empty.
	pub async fn init(
		cfg: Config,
		tokenizer: Tokenizer,
		history: Arc<dyn HistoryStore>,
		providers: Providers,
	) -> Result<Self> {
		let chunking = ChunkingConfig {
			max_tokens: cfg.chunking.max_tokens,
			overlap_tokens: cfg.chunking.overlap_tokens,
		};
		let general_signal = build_tier_index(
			&cfg,
			&providers,
			&chunking,
			&tokenizer,
			Tier::GeneralSignal,
			Path::new(&cfg.corpus.general_signal),
		)
		.await?;
		let general_no_signal = build_tier_index(
			&cfg,
			&providers,
			&chunking,
			&tokenizer,
			Tier::GeneralNoSignal,
			Path::new(&cfg.corpus.general_no_signal),
		)
		.await?;
		let expert = build_tier_index(
			&cfg,
			&providers,
			&chunking,
			&tokenizer,
			Tier::Expert,
			Path::new(&cfg.corpus.expert),
		)
		.await?;
		let answer_permits = Semaphore::new(cfg.service.max_concurrent_answers as usize);

		Ok(Self {
			cfg,
			history,
			providers,
			indices: TierIndices { general_signal, general_no_signal, expert },
			identity_locks: StdMutex::new(HashMap::new()),
			answer_permits,
		})
	}

	pub fn cfg(&self) -> &Config {
		&self.cfg
	}

	fn general_index(&self, entitled: bool) -> &VectorIndex {
		if entitled { &self.indices.general_signal } else { &self.indices.general_no_signal }
	}

	/// One lock per identity; answer calls for the same identity serialize
	/// on it so the history read-modify-write never loses a turn.
	fn identity_lock(&self, identity: &str) -> Arc<Mutex<()>> {
		let mut locks = self.identity_locks.lock().unwrap_or_else(|err| err.into_inner());

		locks.entry(identity.to_string()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
	}
}

async fn build_tier_index(
	cfg: &Config,
	providers: &Providers,
	chunking: &ChunkingConfig,
	tokenizer: &Tokenizer,
	tier: Tier,
	path: &Path,
) -> Result<VectorIndex> {
	let text = load_document(path);

	if text.trim().is_empty() {
		tracing::warn!(tier = tier.as_str(), "No corpus content. Tier retrieval stays empty.");

		return Ok(VectorIndex::empty());
	}

	let chunks = sage_chunking::split_text(&text, chunking, tokenizer);

	if chunks.is_empty() {
		return Ok(VectorIndex::empty());
	}

	let texts: Vec<String> = chunks.into_iter().map(|chunk| chunk.text).collect();
	let vectors = embed_batch(
		providers.embedding.clone(),
		&cfg.providers.embedding,
		texts.clone(),
		cfg.retrieval.embed_workers as usize,
	)
	.await
	.map_err(|err| Error::Embedding { message: err.to_string() })?;
	let index = VectorIndex::build(texts.into_iter().zip(vectors).collect())?;

	tracing::info!(tier = tier.as_str(), chunks = index.len(), "Built tier index.");

	Ok(index)
}
