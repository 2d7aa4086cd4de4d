use serde::{Deserialize, Serialize};

/// Outbound push content for the Expo relay.
///
/// Expo uses a flat message schema: there is no structured
/// notification/data split and no first-class image field, so rich media
/// URLs travel inside `data`.
#[derive(Debug, Clone)]
pub struct ExpoPush {
    pub title: String,
    pub body: String,
    pub data: Option<serde_json::Value>,
    /// One of "high", "default", "normal" (Expo's accepted values).
    pub priority: String,
}

/// Result of one delivery attempt to one Expo push token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpoSendResult {
    pub token: String,
    pub ticket_id: Option<String>,
    pub success: bool,
    /// Expo error code from the ticket details (e.g. "DeviceNotRegistered").
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

impl ExpoSendResult {
    /// True when Expo confirmed the token will never accept deliveries
    /// again. Only `DeviceNotRegistered` carries that meaning; every other
    /// ticket error (message too big, rate limited, credential problems)
    /// is transient from the recipient's point of view.
    pub fn permanently_invalid(&self) -> bool {
        self.error_code.as_deref() == Some("DeviceNotRegistered")
    }
}

/// Batch send result, one entry per input token in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSendResult {
    pub success_count: usize,
    pub failure_count: usize,
    pub results: Vec<ExpoSendResult>,
}

/// One message in the request array sent to the relay.
#[derive(Debug, Serialize)]
pub(crate) struct ExpoPushMessage {
    pub to: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub priority: String,
    pub sound: &'static str,
}

/// Relay response: a ticket array parallel to the request messages.
#[derive(Debug, Deserialize)]
pub(crate) struct ExpoPushResponse {
    pub data: Vec<ExpoPushTicket>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExpoPushTicket {
    pub status: String,
    pub id: Option<String>,
    pub message: Option<String>,
    pub details: Option<ExpoTicketDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExpoTicketDetails {
    pub error: Option<String>,
}
