use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// Embeds one text. Index construction fans these calls out through the
/// service's bounded worker pool; retrieval issues one per query.
pub async fn embed(cfg: &sage_config::EmbeddingProviderConfig, text: &str) -> Result<Vec<f32>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;
	let body = serde_json::json!({
		"model": cfg.model,
		"input": text,
		"dimensions": cfg.dimensions,
	});
	let dimensions = cfg.dimensions as usize;

	crate::with_retry(cfg.max_attempts, "embedding", || {
		let client = client.clone();
		let url = url.clone();
		let headers = headers.clone();
		let body = body.clone();

		async move {
			let res = client.post(url).headers(headers).json(&body).send().await?;
			let json: Value = res.error_for_status()?.json().await?;

			parse_embedding_vector(json, dimensions)
		}
	})
	.await
}

fn parse_embedding_vector(json: Value, dimensions: usize) -> Result<Vec<f32>> {
	let embedding = json
		.get("data")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|item| item.get("embedding"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Embedding response is missing an embedding array."))?;
	let mut vec = Vec::with_capacity(embedding.len());

	for value in embedding {
		let number =
			value.as_f64().ok_or_else(|| eyre::eyre!("Embedding value must be numeric."))?;

		vec.push(number as f32);
	}

	if vec.len() != dimensions {
		return Err(eyre::eyre!(
			"Embedding dimension {} does not match the configured dimensions {}.",
			vec.len(),
			dimensions
		));
	}

	Ok(vec)
}
