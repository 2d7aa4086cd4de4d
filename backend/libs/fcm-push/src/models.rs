use serde::{Deserialize, Serialize};

/// Outbound push content, rendered once per message by the caller.
///
/// FCM v1 takes a structured notification block plus a separate data map;
/// `image` and `high_priority` translate into `notification.image` and
/// `android.priority` respectively.
#[derive(Debug, Clone, Default)]
pub struct FcmPush {
    pub title: String,
    pub body: String,
    pub data: Option<serde_json::Value>,
    pub image: Option<String>,
    pub high_priority: bool,
}

/// Result of one delivery attempt to one registration token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmSendResult {
    pub token: String,
    pub message_id: Option<String>,
    pub success: bool,
    /// FCM v1 error status (e.g. "UNREGISTERED") when the gateway rejected
    /// the message for this token.
    pub error_status: Option<String>,
    pub error_message: Option<String>,
}

impl FcmSendResult {
    /// True when the gateway confirmed the registration will never accept
    /// deliveries again. `UNREGISTERED` is the uninstalled/expired case;
    /// `INVALID_ARGUMENT` is returned for malformed registration tokens.
    /// Quota and availability errors stay transient.
    pub fn permanently_invalid(&self) -> bool {
        matches!(
            self.error_status.as_deref(),
            Some("UNREGISTERED") | Some("INVALID_ARGUMENT")
        )
    }
}

/// Multicast send result, one entry per input token in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MulticastSendResult {
    pub success_count: usize,
    pub failure_count: usize,
    pub results: Vec<FcmSendResult>,
}

/// Firebase service account key (the JSON file Google issues)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub auth_uri: String,
    pub token_uri: String,
}

/// OAuth2 token cache
#[derive(Debug, Clone)]
pub(crate) struct TokenCache {
    pub access_token: String,
    pub expires_at: i64,
}

/// JWT claims for the Google OAuth2 assertion
#[derive(Debug, Serialize)]
pub(crate) struct JwtClaims {
    pub iss: String,
    pub sub: String,
    pub scope: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

/// Google OAuth2 token response
#[derive(Debug, Deserialize)]
pub(crate) struct GoogleTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[allow(dead_code)]
    pub token_type: String,
}

/// FCM v1 message request
#[derive(Debug, Serialize)]
pub(crate) struct FcmMessage {
    pub message: FcmMessageContent,
}

#[derive(Debug, Serialize)]
pub(crate) struct FcmMessageContent {
    pub token: String,
    pub notification: FcmNotification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<FcmAndroidConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FcmNotification {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FcmAndroidConfig {
    pub priority: &'static str,
}

/// FCM v1 success response
#[derive(Debug, Deserialize)]
pub(crate) struct FcmApiResponse {
    pub name: Option<String>,
}

/// FCM v1 error response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct FcmApiError {
    pub error: Option<FcmErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FcmErrorDetail {
    pub status: Option<String>,
    pub message: Option<String>,
}
