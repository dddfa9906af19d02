pub mod app;
pub mod reset_state;
