use axum::{routing::delete, Router};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new().route("/state", delete(super::reset_state::reset_state))
}
