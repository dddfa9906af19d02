use axum::{extract::State, http::StatusCode};

use crate::state::ApiState;

/// Resets the collection to the seed books.
#[tracing::instrument(skip_all)]
pub async fn reset_state(State(state): State<ApiState>) -> StatusCode {
    state.books().reset().await;

    StatusCode::NO_CONTENT
}
