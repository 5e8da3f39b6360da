use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// Asks the entitlement collaborator whether `identity` holds an active
/// entitlement. Consumed once per answer call; the flag is never stored.
pub async fn has_active_entitlement(
	cfg: &sage_config::EntitlementProviderConfig,
	identity: &str,
) -> Result<bool> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut request = client.post(url).json(&serde_json::json!({ "identity": identity }));

	if let Some(key) = cfg.api_key.as_deref() {
		request = request.bearer_auth(key);
	}

	let json: Value = request.send().await?.error_for_status()?.json().await?;

	parse_entitlement_response(json)
}

fn parse_entitlement_response(json: Value) -> Result<bool> {
	json.get("active")
		.and_then(Value::as_bool)
		.ok_or_else(|| eyre::eyre!("Entitlement response is missing an active flag."))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_the_active_flag() {
		let json = serde_json::json!({ "active": true });

		assert!(parse_entitlement_response(json).expect("parse failed"));
	}

	#[test]
	fn rejects_a_missing_flag() {
		let json = serde_json::json!({ "status": "ok" });

		assert!(parse_entitlement_response(json).is_err());
	}
}
