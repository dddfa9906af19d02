pub mod book;
pub mod used_api_key;
