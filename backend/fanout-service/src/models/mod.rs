use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Transport a device token is delivered through.
///
/// FCM tokens are pushed directly through the Firebase gateway under our
/// own credentials; Expo tokens are forwarded through Expo's hosted relay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Fcm,
    Expo,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Fcm => "fcm",
            TransportKind::Expo => "expo",
        }
    }

    /// Parse a stored transport value. Records written before the
    /// transport column existed carry no kind; those and anything
    /// unrecognized read back as Expo, which is what every legacy client
    /// registered.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fcm" => TransportKind::Fcm,
            _ => TransportKind::Expo,
        }
    }

    /// Classify a registration. An explicit `"fcm"` token type wins unless
    /// the token is visibly Expo-shaped (a relay-issued token can never be
    /// delivered natively); everything else, including an absent type,
    /// registers as Expo for backward compatibility.
    pub fn from_token_type(token_type: Option<&str>, token: &str) -> Self {
        match token_type.map(str::to_lowercase).as_deref() {
            Some("fcm") if !expo_push::is_expo_token(token) => TransportKind::Fcm,
            _ => TransportKind::Expo,
        }
    }
}

/// Notification priority as requested by the admin client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Lenient parse: absent or unrecognized values fold to medium.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(str::to_lowercase).as_deref() {
            Some("low") => Priority::Low,
            Some("high") => Priority::High,
            _ => Priority::Medium,
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Priority::High)
    }
}

/// One registered app installation, keyed by the token string itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceToken {
    pub token: String,
    pub transport: TransportKind,
    /// Originating OS, informational only.
    pub platform: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// A validated notification ready for dispatch. Immutable once built;
/// each channel renders it into its own wire schema.
#[derive(Debug, Clone)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    /// Opaque string map carried to the client for deep-linking.
    pub data: HashMap<String, String>,
    pub priority: Priority,
    pub image_url: Option<String>,
}

impl NotificationPayload {
    /// The data map as a JSON object, or None when empty.
    pub fn data_value(&self) -> Option<serde_json::Value> {
        if self.data.is_empty() {
            return None;
        }
        Some(serde_json::json!(self.data))
    }
}

/// Outcome of one delivery attempt to one token, as classified by a
/// channel sender.
#[derive(Debug, Clone)]
pub struct PerTokenResult {
    pub token: String,
    pub succeeded: bool,
    /// True only when the transport confirmed the registration is dead
    /// (uninstalled app, expired or malformed token). Transient errors
    /// never set this.
    pub permanently_invalid: bool,
    pub error_detail: Option<String>,
}

/// Sent/failed tally for one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelTally {
    pub sent: usize,
    pub failed: usize,
}

impl ChannelTally {
    pub fn from_results(results: &[PerTokenResult]) -> Self {
        let sent = results.iter().filter(|r| r.succeeded).count();
        Self {
            sent,
            failed: results.len() - sent,
        }
    }
}

/// Aggregated result of one fan-out dispatch. Built fresh per request,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    pub fcm: ChannelTally,
    pub expo: ChannelTally,
    pub invalid_tokens_removed: usize,
}

impl DispatchOutcome {
    pub fn total_sent(&self) -> usize {
        self.fcm.sent + self.expo.sent
    }

    pub fn total_failed(&self) -> usize {
        self.fcm.failed + self.expo.failed
    }
}

/// Market price snapshot posted by the admin client; title and body of the
/// price notification are derived from these fields. Unknown extra fields
/// are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceData {
    pub market: Option<String>,
    pub breed: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub avg_price: Option<f64>,
}

/// Free-form notification posted by the admin client. The target fields
/// are advisory metadata: delivery is a broadcast to every registered
/// token and the app filters by market on the client side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomNotificationRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub priority: Option<String>,
    pub target_audience: Option<String>,
    pub target_market: Option<String>,
    pub image_url: Option<String>,
}
