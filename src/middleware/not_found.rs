use axum::extract::State;

use crate::{
    error::{ApiError, NotFoundError},
    traits::ErrorVerbosityProvider,
};

/// Fallback handler for unknown routes.
pub async fn not_found<S: ErrorVerbosityProvider>(State(state): State<S>) -> ApiError {
    tracing::debug!("No route matched");

    NotFoundError::new(state.error_verbosity()).into()
}
