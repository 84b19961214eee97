use std::convert::Infallible;

use axum::{
	Json, Router,
	body::Body,
	extract::{Query, State},
	http::{StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::state::AppState;
use legis_service::{
	Candidate, ChatRequest, Error, OnboardingRequest, OnboardingResponse, SearchHit, SearchRequest,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
	pub q: String,
	pub top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct StreamParams {
	pub session_id: String,
	pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
	pub reply: String,
	pub sources: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			Error::NotFound { message } => Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message),
			Error::Provider { message } => {
				tracing::error!(error = %message, "Provider error.");

				Self::new(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", "Upstream provider failed.")
			},
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage error.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "Internal error.")
			},
			Error::Qdrant { message } => {
				tracing::error!(error = %message, "Qdrant error.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "Internal error.")
			},
			Error::Internal { message } => {
				tracing::error!(error = %message, "Internal error.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "Internal error.")
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	let cors_allow_any = state.service.cfg.service.cors_allow_any;
	let router = Router::new()
		.route("/health", get(health))
		.route("/onboarding", post(onboarding))
		.route("/search", get(search))
		.route("/chat", post(chat))
		.route("/chat/stream", get(chat_stream))
		.with_state(state);

	if cors_allow_any { router.layer(CorsLayer::permissive()) } else { router }
}

async fn health() -> Json<Value> {
	Json(json!({ "ok": true }))
}

async fn onboarding(
	State(state): State<AppState>,
	Json(payload): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>, ApiError> {
	let response = state.service.create_profile(payload).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
	let hits =
		state.service.search(SearchRequest { query: params.q, top_k: params.top_k }).await?;

	Ok(Json(hits))
}

async fn chat(
	State(state): State<AppState>,
	Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
	let reply = state.service.answer(payload).await?;

	Ok(Json(ChatResponse { reply: reply.text, sources: reply.sources }))
}

/// Plain-text body of raw fragments. The last fragment is the sources marker.
async fn chat_stream(
	State(state): State<AppState>,
	Query(params): Query<StreamParams>,
) -> Result<Response, ApiError> {
	let fragments = state
		.service
		.answer_stream(ChatRequest { session_id: params.session_id, message: params.q })
		.await?;
	let body = Body::from_stream(fragments.map(Ok::<_, Infallible>));

	Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}
