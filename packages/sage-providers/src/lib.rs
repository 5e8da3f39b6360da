pub mod completion;
pub mod embedding;
pub mod entitlement;

use std::{future::Future, time::Duration};

use color_eyre::{Result, eyre};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

const BASE_BACKOFF_MS: u64 = 250;
const MAX_BACKOFF_MS: u64 = 10_000;

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(eyre::eyre!("Default header values must be strings."));
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

pub(crate) async fn with_retry<T, F, Fut>(max_attempts: u32, label: &str, mut call: F) -> Result<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let attempts = max_attempts.max(1);
	let mut last_err = None;

	for attempt in 1..=attempts {
		match call().await {
			Ok(value) => return Ok(value),
			Err(err) => {
				if attempt < attempts {
					tracing::warn!(error = %err, attempt, label, "Provider request failed. Retrying.");
					tokio::time::sleep(backoff_for_attempt(attempt)).await;
				}

				last_err = Some(err);
			},
		}
	}

	Err(last_err.unwrap_or_else(|| eyre::eyre!("Provider request failed.")))
}

fn backoff_for_attempt(attempt: u32) -> Duration {
	let exp = attempt.saturating_sub(1).min(6);
	let base = BASE_BACKOFF_MS.saturating_mul(1 << exp);

	Duration::from_millis(base.min(MAX_BACKOFF_MS))
}
