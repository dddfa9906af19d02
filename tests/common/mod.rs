use std::{
    fmt::Debug,
    net::SocketAddr,
    time::{Duration, Instant},
};

use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use the_books::{
    error::ErrorVerbosity,
    server::{Server, ServerConfig, DEFAULT_API_KEY_HEADER_NAME},
};
use tokio::{net::TcpListener, sync::oneshot};

pub const ADMIN_API_KEY: &str = "SuperSecretApiKey";

const JSON_MEDIA_TYPE: &str = "application/json";
const MAX_ELAPSED: Duration = Duration::from_millis(1000);

/// A server running on an ephemeral loopback port.
///
/// Dropping it resets the book collection and shuts the server down, on panics too.
/// Requires a multi-threaded runtime.
pub struct TestServer {
    address: SocketAddr,
    client: Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        Self::spawn_with_verbosity(ErrorVerbosity::Full).await
    }

    pub async fn spawn_with_verbosity(error_verbosity: ErrorVerbosity) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Bind failed");
        let address = listener.local_addr().expect("Listener has no address");

        let config = ServerConfig::new(
            address,
            error_verbosity,
            DEFAULT_API_KEY_HEADER_NAME.to_string(),
            ADMIN_API_KEY.to_string(),
        )
        .expect("Test config is invalid");

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(Server::new(config).serve(listener, async move {
            shutdown_rx.await.ok();
        }));

        Self {
            address,
            client: Client::new(),
            shutdown: Some(shutdown),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let reset = self.client.delete(self.url("/state")).send();

        tokio::task::block_in_place(|| {
            let _ = tokio::runtime::Handle::current().block_on(reset);
        });

        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Asserts the status code and that the response arrived within [`MAX_ELAPSED`] of `started`.
pub fn assert_common_response_parts(
    started: Instant,
    response: &Response,
    expected_status: StatusCode,
) {
    assert_eq!(response.status(), expected_status);

    let elapsed = started.elapsed();
    assert!(elapsed < MAX_ELAPSED, "Response took {elapsed:?}");
}

/// Asserts the common parts, a JSON media type and a body equal to `expected_content`.
#[allow(dead_code)]
pub async fn assert_response_with_content<T>(
    started: Instant,
    response: Response,
    expected_status: StatusCode,
    expected_content: &T,
) where
    T: DeserializeOwned + PartialEq + Debug,
{
    assert_common_response_parts(started, &response, expected_status);
    assert_eq!(media_type(&response).as_deref(), Some(JSON_MEDIA_TYPE));

    let bytes = response.bytes().await.expect("Failed to read body");
    let content: T = serde_json::from_slice(&bytes).expect("Body is not the expected JSON");

    assert_eq!(&content, expected_content);
}

/// Serializes `model` as a UTF-8 JSON body.
#[allow(dead_code)]
pub fn with_json_body<T: Serialize>(request: RequestBuilder, model: &T) -> RequestBuilder {
    let body = serde_json::to_vec(model).expect("Failed to serialize body");

    request
        .header(CONTENT_TYPE, "application/json; charset=utf-8")
        .body(body)
}

/// The `Content-Type` without parameters.
pub fn media_type(response: &Response) -> Option<String> {
    let content_type = response.headers().get(CONTENT_TYPE)?.to_str().ok()?;

    content_type
        .split(';')
        .next()
        .map(|media_type| media_type.trim().to_ascii_lowercase())
}
