use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use crate::traits::ApiKeyProvider;

/// Middleware to trace incoming and outgoing headers.
///
/// The API key header is masked.
pub async fn trace_headers<S: ApiKeyProvider>(
    State(state): State<S>,
    req: Request,
    next: Next,
) -> Response {
    let mut incoming_headers = req.headers().clone();
    if let Some(api_key) = incoming_headers.get_mut(state.header_name()) {
        *api_key = HeaderValue::from_static("...");
    }
    tracing::trace!(?incoming_headers, "Headers");

    let response = next.run(req).await;

    let outgoing_headers = response.headers();
    tracing::trace!(?outgoing_headers, "Headers");

    response
}
