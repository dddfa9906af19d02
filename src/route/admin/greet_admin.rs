use crate::extractor::valid_api_key::ValidApiKey;

/// Greets the caller if the request carries the admin API key.
///
/// This function will reject if [`ValidApiKey`] rejects.
#[tracing::instrument(skip_all)]
pub async fn greet_admin(ValidApiKey(_): ValidApiKey) -> &'static str {
    "Hi admin!"
}
