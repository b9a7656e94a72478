// src/server/handlers.rs

use super::AppState;
use crate::{
    error::AppResult,
    jobs::JobPoll,
    models::{ExtractionRequest, ExtractionResult},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GET /get_layer_two_data
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LayerTwoQuery {
    pub tiles_input_data2: Option<String>,
    pub course_id: Option<String>,
    pub parent_id: Option<String>,
    pub csrf_name: Option<String>,
}

impl From<LayerTwoQuery> for ExtractionRequest {
    fn from(query: LayerTwoQuery) -> Self {
        ExtractionRequest::new(
            query.tiles_input_data2.as_deref().unwrap_or_default(),
            query.course_id.as_deref().unwrap_or_default(),
            query.parent_id.as_deref().unwrap_or_default(),
            query.csrf_name.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Serialize)]
pub struct SubmittedResponse {
    status: &'static str,
    message: &'static str,
    req_id: String,
}

#[derive(Serialize)]
pub struct CompletedResponse {
    status: &'static str,
    data: ExtractionResult,
}

pub async fn get_layer_two_data(
    State(state): State<AppState>,
    Query(query): Query<LayerTwoQuery>,
) -> AppResult<Response> {
    let request = ExtractionRequest::from(query);

    if state.synchronous {
        let data = state.runner.run_sync(request).await?;
        return Ok(Json(CompletedResponse {
            status: "success",
            data,
        })
        .into_response());
    }

    let ticket = state.runner.submit(request)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(SubmittedResponse {
            status: "processing",
            message: "Processing started. Use /get_status?req_id=... to check progress.",
            req_id: ticket.req_id,
        }),
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// GET /get_status
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub req_id: String,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusResponse {
    Done { data: ExtractionResult },
    Processing { message: &'static str },
}

pub async fn get_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Json<StatusResponse> {
    Json(match state.runner.poll(&query.req_id) {
        JobPoll::Done(data) => StatusResponse::Done { data },
        JobPoll::Processing => StatusResponse::Processing {
            message: "Still working...",
        },
    })
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
