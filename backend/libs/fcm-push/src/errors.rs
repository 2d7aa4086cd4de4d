use thiserror::Error;

/// FCM client error types
#[derive(Error, Debug)]
pub enum FcmError {
    #[error("Failed to read service account key: {0}")]
    KeyRead(String),

    #[error("Failed to parse service account key: {0}")]
    KeyParse(String),

    #[error("Failed to sign OAuth2 assertion: {0}")]
    Assertion(String),

    #[error("OAuth2 token exchange failed: {0}")]
    TokenExchange(String),

    #[error("FCM send request failed: {0}")]
    SendRequest(String),

    #[error("Failed to parse FCM response: {0}")]
    ResponseParse(String),
}
