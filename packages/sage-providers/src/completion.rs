use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// One chat-completion round trip. Translation, history summarization, answer
/// synthesis, and reply condensing all go through here; only the prompt
/// differs.
pub async fn complete(cfg: &sage_config::CompletionProviderConfig, prompt: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "user", "content": prompt }
		],
	});

	crate::with_retry(cfg.max_attempts, "completion", || {
		let client = client.clone();
		let url = url.clone();
		let headers = headers.clone();
		let body = body.clone();

		async move {
			let res = client.post(url).headers(headers).json(&body).send().await?;
			let json: Value = res.error_for_status()?.json().await?;

			parse_completion_text(json)
		}
	})
	.await
}

fn parse_completion_text(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| eyre::eyre!("Completion response is missing message content."))?;
	let text = content.trim().to_string();

	if text.is_empty() {
		return Err(eyre::eyre!("Completion response content is empty."));
	}

	Ok(text)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_and_trims_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "  An answer.\n" } }
			]
		});
		let parsed = parse_completion_text(json).expect("parse failed");

		assert_eq!(parsed, "An answer.");
	}

	#[test]
	fn rejects_empty_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "   " } }
			]
		});

		assert!(parse_completion_text(json).is_err());
	}

	#[test]
	fn rejects_missing_choices() {
		let json = serde_json::json!({ "id": "cmpl-1" });

		assert!(parse_completion_text(json).is_err());
	}
}
