use std::{fs, sync::Arc};

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use sage_api::{routes, state::AppState};
use sage_history::MemoryHistoryStore;
use sage_service::{
	BoxFuture, CompletionProvider, EmbeddingProvider, EntitlementProvider, Providers, Responder,
};
use sage_testkit::{TestDir, word_tokenizer};

const CANNED_ANSWER: &str = "حداقل واریزی ده دلار است.";

struct StubEmbedding;

impl EmbeddingProvider for StubEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a sage_config::EmbeddingProviderConfig,
		_text: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<f32>>> {
		Box::pin(async move { Ok(vec![0.0, 0.0, 0.0]) })
	}
}

struct StubCompletion;

impl CompletionProvider for StubCompletion {
	fn complete<'a>(
		&'a self,
		_cfg: &'a sage_config::CompletionProviderConfig,
		_prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async move { Ok(CANNED_ANSWER.to_string()) })
	}
}

struct StubEntitlement {
	fail: bool,
}

impl EntitlementProvider for StubEntitlement {
	fn has_active_entitlement<'a>(
		&'a self,
		_cfg: &'a sage_config::EntitlementProviderConfig,
		_identity: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<bool>> {
		let fail = self.fail;

		Box::pin(async move {
			if fail {
				Err(color_eyre::eyre::eyre!("entitlement service down"))
			} else {
				Ok(true)
			}
		})
	}
}

fn test_config(docs: &TestDir) -> sage_config::Config {
	sage_config::Config {
		service: sage_config::Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			max_concurrent_answers: 4,
		},
		corpus: sage_config::Corpus {
			general_signal: docs.path().join("signal.txt").display().to_string(),
			general_no_signal: docs.path().join("no_signal.txt").display().to_string(),
			expert: docs.path().join("expert.txt").display().to_string(),
		},
		chunking: sage_config::Chunking { max_tokens: 300, overlap_tokens: 50, tokenizer_repo: None },
		retrieval: sage_config::Retrieval { top_k: 3, embed_workers: 4 },
		history: sage_config::History {
			dir: docs.path().join("history").display().to_string(),
			max_summary_turns: 10,
		},
		language: sage_config::Language {
			native: "Persian".to_string(),
			retrieval: "English".to_string(),
			brand: "Daraei Academy".to_string(),
		},
		providers: sage_config::Providers {
			embedding: sage_config::EmbeddingProviderConfig {
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "test".to_string(),
				dimensions: 3,
				timeout_ms: 1_000,
				max_attempts: 1,
				default_headers: serde_json::Map::new(),
			},
			completion: sage_config::CompletionProviderConfig {
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/chat/completions".to_string(),
				model: "test".to_string(),
				temperature: 0.2,
				timeout_ms: 1_000,
				max_attempts: 1,
				default_headers: serde_json::Map::new(),
			},
			entitlement: sage_config::EntitlementProviderConfig {
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: None,
				path: "/internal/entitlements/check".to_string(),
				timeout_ms: 1_000,
			},
		},
	}
}

async fn make_state(docs: &TestDir, entitlement_fails: bool) -> AppState {
	fs::write(docs.path().join("signal.txt"), "Signal subscribers get daily trade signals.")
		.expect("Failed to write signal doc.");

	let providers = Providers::new(
		Arc::new(StubEmbedding),
		Arc::new(StubCompletion),
		Arc::new(StubEntitlement { fail: entitlement_fails }),
	);
	let responder = Responder::init(
		test_config(docs),
		word_tokenizer(),
		Arc::new(MemoryHistoryStore::new()),
		providers,
	)
	.await
	.expect("Failed to build responder.");

	AppState::with_responder(Arc::new(responder))
}

async fn response_json(response: axum::response::Response) -> Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Response body must be JSON.")
}

#[tokio::test]
async fn health_returns_ok() {
	let docs = TestDir::new("sage_api");
	let app = routes::router(make_state(&docs, false).await);
	let response = app
		.oneshot(Request::builder().uri("/health").body(Body::empty()).expect("Bad request."))
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn answers_a_ticket_with_a_numeric_identity() {
	let docs = TestDir::new("sage_api");
	let app = routes::router(make_state(&docs, false).await);
	let payload = serde_json::json!({
		"subject": "Minimum deposit",
		"body": "How much money do I need to start trading?",
		"identity": 42,
	});
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/tickets/answer")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Bad request."),
		)
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = response_json(response).await;

	assert_eq!(json["answer"], CANNED_ANSWER);
}

#[tokio::test]
async fn answers_a_ticket_with_a_string_identity() {
	let docs = TestDir::new("sage_api");
	let app = routes::router(make_state(&docs, false).await);
	let payload = serde_json::json!({
		"subject": "Plans",
		"body": "Which plan should I pick?",
		"identity": "user-7",
	});
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/tickets/answer")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Bad request."),
		)
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn provider_failures_map_to_bad_gateway() {
	let docs = TestDir::new("sage_api");
	let app = routes::router(make_state(&docs, true).await);
	let payload = serde_json::json!({
		"subject": "Plans",
		"body": "Which plan should I pick?",
		"identity": 7,
	});
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/tickets/answer")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Bad request."),
		)
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

	let json = response_json(response).await;

	assert_eq!(json["error_code"], "upstream_provider");
}

#[tokio::test]
async fn condenses_a_drafted_reply() {
	let docs = TestDir::new("sage_api");
	let app = routes::router(make_state(&docs, false).await);
	let payload = serde_json::json!({ "text": "A long drafted answer." });
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/replies/condense")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Bad request."),
		)
		.await
		.expect("Request failed.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = response_json(response).await;

	assert_eq!(json["reply"], CANNED_ANSWER);
}
