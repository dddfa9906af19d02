use std::{future::Future, net::SocketAddr, path::Path};

use anyhow::Context;
use axum::{http::HeaderName, middleware, Router};
use derivative::Derivative;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    error::ErrorVerbosity,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found,
        trace_headers::trace_headers, trace_response_body::trace_response_body,
    },
    route,
    state::ApiState,
};

pub const DEFAULT_API_KEY_HEADER_NAME: &str = "X-Api-Key";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[source] serde_yaml::Error),
    #[error("Invalid API key header name: {0}")]
    InvalidHeaderName(#[source] axum::http::header::InvalidHeaderName),
    #[error("Admin API key must not be empty")]
    EmptyAdminApiKey,
}

/// Formats every T as `...`
fn mask_fmt<T>(_: &T, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.write_str("...")
}

fn default_api_key_header_name() -> String {
    DEFAULT_API_KEY_HEADER_NAME.to_string()
}

#[derive(Derivative, Deserialize)]
#[derivative(Debug)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    #[serde(default = "default_api_key_header_name")]
    api_key_header_name: String,
    #[derivative(Debug(format_with = "crate::server::mask_fmt"))]
    admin_api_key: String,
}

impl ServerConfig {
    pub fn new(
        socket_address: SocketAddr,
        error_verbosity: ErrorVerbosity,
        api_key_header_name: String,
        admin_api_key: String,
    ) -> Result<Self, ConfigError> {
        Self {
            socket_address,
            error_verbosity,
            api_key_header_name,
            admin_api_key,
        }
        .validated()
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str::<Self>(yaml)
            .map_err(ConfigError::Parse)?
            .validated()
    }

    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(ConfigError::Read)?;

        let config = Self::from_yaml(&yaml)?;

        tracing::debug!(?config, "Config loaded");

        Ok(config)
    }

    /// Normalizes the header name and rejects an empty admin key.
    fn validated(mut self) -> Result<Self, ConfigError> {
        let header_name = HeaderName::from_bytes(self.api_key_header_name.as_bytes())
            .map_err(ConfigError::InvalidHeaderName)?;
        self.api_key_header_name = header_name.as_str().to_string();

        if self.admin_api_key.is_empty() {
            return Err(ConfigError::EmptyAdminApiKey);
        }

        Ok(self)
    }

    pub fn socket_address(&self) -> SocketAddr {
        self.socket_address
    }

    pub fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }

    pub fn api_key_header_name(&self) -> &str {
        &self.api_key_header_name
    }

    pub fn admin_api_key(&self) -> &str {
        &self.admin_api_key
    }
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Builds the application with a freshly seeded book collection.
    pub fn router(&self) -> Router {
        let state = ApiState::new(&self.config);

        Router::new()
            .merge(route::books::app::app())
            .merge(route::state::app::app())
            .merge(route::admin::app::app())
            .fallback(not_found::<ApiState>)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                method_not_allowed::<ApiState>,
            ))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                trace_response_body::<ApiState>,
            ))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                trace_headers::<ApiState>,
            ))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                            .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                            .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                    )
                    .layer(RequestDecompressionLayer::new())
                    .layer(CompressionLayer::new())
                    .layer(CorsLayer::permissive()),
            )
    }

    /// Binds the configured address and serves until CTRL+C or SIGTERM.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` completes.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server failed")?;

        tracing::info!("Server stopped");

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("CTRL+C received"),
            Err(err) => {
                tracing::error!(%err, "Failed to install CTRL+C signal handler");

                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;

                tracing::info!("SIGTERM received");
            }
            Err(err) => {
                tracing::error!(%err, "Failed to install SIGTERM signal handler");

                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
