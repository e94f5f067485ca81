use axum::{extract::State, Extension, Json};
use outletdb_ask::{answer_question, interpret_or_default, AskAnswer};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AskRequest {
    pub question: String,
}

/// `POST /ask`: filter the stored outlets by a feature named in plain language.
///
/// Unsupported locations, unknown features, and interpreter failures all
/// produce an empty list with guidance text rather than an error status.
pub(super) async fn ask(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AskRequest>,
) -> Result<Json<ApiResponse<AskAnswer>>, ApiError> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "question must not be blank",
        ));
    }

    let interpretation = interpret_or_default(state.interpreter.as_ref(), question).await;
    let outlets = outletdb_db::list_outlet_records(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let answer = answer_question(&interpretation, &outlets);
    tracing::info!(
        feature = ?interpretation.feature,
        location = ?interpretation.location,
        matches = answer.outlets.len(),
        "answered question"
    );
    Ok(Json(ApiResponse::new(answer, req_id.0)))
}
