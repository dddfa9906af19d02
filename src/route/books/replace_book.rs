use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{extractor::json::ApiJson, state::ApiState, types::book::Book};

#[derive(Debug)]
pub struct ReplaceBookResponse {
    pub book: Book,
}

impl IntoResponse for ReplaceBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.book)).into_response()
    }
}

/// Replaces the books sharing the payload's id with the payload.
///
/// Only books with a matching id are removed. An unknown id is simply inserted.
#[tracing::instrument(skip_all, fields(book_id = book.id))]
pub async fn replace_book(
    State(state): State<ApiState>,
    ApiJson(book): ApiJson<Book>,
) -> ReplaceBookResponse {
    state.books().replace(book.clone()).await;

    tracing::debug!("Book replaced");

    ReplaceBookResponse { book }
}
