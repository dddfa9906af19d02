use axum::{
    routing::{get, post},
    Router,
};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .route("/getall", get(super::get_all_books::get_all_books))
        .route(
            "/books",
            post(super::create_book::create_book).put(super::replace_book::replace_book),
        )
}
