use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{extractor::json::ApiJson, state::ApiState, types::book::Book};

#[derive(Debug)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl CreateBookResponse {
    fn location(&self) -> String {
        format!("/books/{}", self.book.id)
    }
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        let location = self.location();

        (
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(self.book),
        )
            .into_response()
    }
}

/// Appends the book to the collection.
#[tracing::instrument(skip_all, fields(book_id = book.id))]
pub async fn create_book(
    State(state): State<ApiState>,
    ApiJson(book): ApiJson<Book>,
) -> CreateBookResponse {
    state.books().create(book.clone()).await;

    tracing::debug!("Book created");

    CreateBookResponse { book }
}
