pub mod api_key;
pub mod json;
pub mod valid_api_key;
