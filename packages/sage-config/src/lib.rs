mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Chunking, CompletionProviderConfig, Config, Corpus, EmbeddingProviderConfig,
	EntitlementProviderConfig, History, Language, Providers, Retrieval, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.max_concurrent_answers == 0 {
		return Err(Error::Validation {
			message: "service.max_concurrent_answers must be greater than zero.".to_string(),
		});
	}

	for (label, path) in [
		("corpus.general_signal", &cfg.corpus.general_signal),
		("corpus.general_no_signal", &cfg.corpus.general_no_signal),
		("corpus.expert", &cfg.corpus.expert),
	] {
		if path.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.chunking.max_tokens == 0 {
		return Err(Error::Validation {
			message: "chunking.max_tokens must be greater than zero.".to_string(),
		});
	}
	if cfg.chunking.overlap_tokens >= cfg.chunking.max_tokens {
		return Err(Error::Validation {
			message: "chunking.overlap_tokens must be less than chunking.max_tokens.".to_string(),
		});
	}
	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.embed_workers == 0 {
		return Err(Error::Validation {
			message: "retrieval.embed_workers must be greater than zero.".to_string(),
		});
	}
	if cfg.history.dir.trim().is_empty() {
		return Err(Error::Validation { message: "history.dir must be non-empty.".to_string() });
	}
	if cfg.history.max_summary_turns == 0 {
		return Err(Error::Validation {
			message: "history.max_summary_turns must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("language.native", &cfg.language.native),
		("language.retrieval", &cfg.language.retrieval),
		("language.brand", &cfg.language.brand),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.max_attempts == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.max_attempts must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.completion.max_attempts == 0 {
		return Err(Error::Validation {
			message: "providers.completion.max_attempts must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.completion.temperature.is_finite()
		|| cfg.providers.completion.temperature < 0.0
	{
		return Err(Error::Validation {
			message: "providers.completion.temperature must be zero or greater.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("completion", &cfg.providers.completion.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	if cfg.providers.entitlement.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.entitlement.api_base must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.chunking.tokenizer_repo.as_deref().map(|repo| repo.trim().is_empty()).unwrap_or(false) {
		cfg.chunking.tokenizer_repo = None;
	}
	if cfg
		.providers
		.entitlement
		.api_key
		.as_deref()
		.map(|key| key.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.providers.entitlement.api_key = None;
	}
}
