use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::answers::AnswerSet;
use super::engine::ScoreEngine;

/// Payload posted by a form: the current answers and whether a partial preview is wanted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default)]
    pub preview: bool,
}

/// Router builder exposing the catalog and the gated scoring endpoint.
pub fn assessment_router(engine: Arc<ScoreEngine>) -> Router {
    Router::new()
        .route("/api/v1/assessment/criteria", get(criteria_handler))
        .route("/api/v1/assessment/score", post(score_handler))
        .with_state(engine)
}

pub(crate) async fn criteria_handler(State(engine): State<Arc<ScoreEngine>>) -> Response {
    (StatusCode::OK, Json(engine.catalog())).into_response()
}

pub(crate) async fn score_handler(
    State(engine): State<Arc<ScoreEngine>>,
    request: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let ScoreRequest { answers, preview } = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "rejecting unreadable score request");
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    if let Err(error) = answers.ensure_known(engine.catalog()) {
        let payload = json!({
            "error": error.to_string(),
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    if preview {
        return (StatusCode::OK, Json(engine.preview(&answers))).into_response();
    }

    match engine.assess(&answers) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(violation) => {
            debug!(missing = ?violation.missing, "rejecting incomplete assessment");
            let payload = json!({
                "error": violation.to_string(),
                "missing": violation.missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
