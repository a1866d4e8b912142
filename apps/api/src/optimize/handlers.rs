//! Axum route handlers for the Optimize API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::optimize::invoker::{optimize_text, OptimizeRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized: String,
}

/// POST /optimize
///
/// Rewrites the submitted text with the mode's prompt template and returns
/// the generated result. Unknown modes use the default rewrite template.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let optimized = optimize_text(
        state.llm.as_ref(),
        state.config.gemini_api_key.as_deref(),
        &state.model,
        &request,
    )
    .await?;

    Ok(Json(OptimizeResponse { optimized }))
}
