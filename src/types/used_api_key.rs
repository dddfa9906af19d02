/// A struct to hold the API key sent with a request.
///
/// Only the header value is kept, never the configured key.
#[derive(Debug, Clone)]
pub struct UsedApiKey {
    pub value: String,
}
