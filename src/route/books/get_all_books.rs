use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{state::ApiState, types::book::Book};

#[derive(Debug)]
pub struct GetAllBooksResponse {
    pub books: Vec<Book>,
}

impl IntoResponse for GetAllBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.books)).into_response()
    }
}

/// Reseeds the collection and returns it.
#[tracing::instrument(skip_all)]
pub async fn get_all_books(State(state): State<ApiState>) -> GetAllBooksResponse {
    let books = state.books().reset_and_list().await;

    tracing::debug!(count = books.len(), "Listing books");

    GetAllBooksResponse { books }
}
