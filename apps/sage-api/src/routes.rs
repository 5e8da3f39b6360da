use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use sage_service::Error as ServiceError;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/tickets/answer", post(answer))
		.route("/v1/replies/condense", post(condense))
		.with_state(state)
}

/// Ticket identities arrive as numbers from some callers and strings from
/// others; both address the same history record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Identity {
	Number(i64),
	Text(String),
}
impl Identity {
	fn into_key(self) -> String {
		match self {
			Self::Number(value) => value.to_string(),
			Self::Text(value) => value,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
	pub subject: String,
	pub body: String,
	pub identity: Identity,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
	pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct CondenseRequest {
	pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CondenseResponse {
	pub reply: String,
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn answer(
	State(state): State<AppState>,
	Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
	let identity = payload.identity.into_key();
	let answer = state.responder.answer(&payload.subject, &payload.body, &identity).await?;

	Ok(Json(AnswerResponse { answer }))
}

async fn condense(
	State(state): State<AppState>,
	Json(payload): Json<CondenseRequest>,
) -> Result<Json<CondenseResponse>, ApiError> {
	let reply = state.responder.condense_reply(&payload.text).await?;

	Ok(Json(CondenseResponse { reply }))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::Embedding { .. }
			| ServiceError::Generation { .. }
			| ServiceError::Entitlement { .. } => (StatusCode::BAD_GATEWAY, "upstream_provider"),
			ServiceError::History { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "history_store"),
			ServiceError::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
			ServiceError::Index(_) => (StatusCode::INTERNAL_SERVER_ERROR, "index"),
		};

		Self { status, error_code, message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code.to_string(), message: self.message };

		(self.status, Json(body)).into_response()
	}
}
