use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	pub chunking: Chunking,
	pub retrieval: Retrieval,
	pub history: History,
	pub language: Language,
	pub providers: Providers,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	pub max_concurrent_answers: u32,
}

/// One source file per knowledge-base tier. A missing file degrades that tier
/// to permanently empty retrieval; it does not fail startup.
#[derive(Debug, Deserialize)]
pub struct Corpus {
	pub general_signal: String,
	pub general_no_signal: String,
	pub expert: String,
}

#[derive(Debug, Deserialize)]
pub struct Chunking {
	pub max_tokens: u32,
	pub overlap_tokens: u32,
	pub tokenizer_repo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Retrieval {
	pub top_k: u32,
	pub embed_workers: u32,
}

#[derive(Debug, Deserialize)]
pub struct History {
	pub dir: String,
	pub max_summary_turns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Language {
	/// Language the users write tickets in, e.g. "Persian".
	pub native: String,
	/// Primary language of the embedding corpus, e.g. "English".
	pub retrieval: String,
	/// Name the assistant answers under, embedded in the answer prompt.
	pub brand: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub completion: CompletionProviderConfig,
	pub entitlement: EntitlementProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	pub max_attempts: u32,
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CompletionProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	pub max_attempts: u32,
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EntitlementProviderConfig {
	pub api_base: String,
	pub api_key: Option<String>,
	pub path: String,
	pub timeout_ms: u64,
}
