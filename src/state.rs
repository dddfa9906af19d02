use std::{ops::Deref, sync::Arc};

use crate::{
    error::ErrorVerbosity,
    server::ServerConfig,
    traits::{ApiKeyProvider, ErrorVerbosityProvider},
};

pub mod books;

use books::BookStore;

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity: config.error_verbosity(),
                api_key_header_name: config.api_key_header_name().to_string(),
                admin_api_key: config.admin_api_key().to_string(),
                books: BookStore::seeded(),
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    api_key_header_name: String,
    admin_api_key: String,
    books: BookStore,
}

impl ApiStateInner {
    pub fn books(&self) -> &BookStore {
        &self.books
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}

impl ApiKeyProvider for ApiState {
    fn header_name(&self) -> &str {
        &self.api_key_header_name
    }

    /// Byte-for-byte comparison against the configured admin key.
    fn validate(&self, key: &str) -> bool {
        key.as_bytes() == self.admin_api_key.as_bytes()
    }
}
