use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::ExpoError;
use crate::models::*;

/// Expo rejects requests carrying more than 100 messages; larger pools
/// must be split into sequential batches.
pub const PUSH_BATCH_LIMIT: usize = 100;

const DEFAULT_ENDPOINT: &str = "https://exp.host/--/api/v2/push/send";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// True for tokens issued by the Expo relay. Expo tokens carry a literal
/// prefix; everything else is a raw vendor registration token.
pub fn is_expo_token(token: &str) -> bool {
    token.starts_with("ExponentPushToken[") || token.starts_with("ExpoPushToken[")
}

/// Expo push relay client
///
/// Sends batched push messages to Expo's hosted endpoint and maps the
/// returned ticket array back onto the input tokens.
pub struct ExpoClient {
    endpoint: String,
    access_token: Option<String>,
    http_client: reqwest::Client,
}

impl ExpoClient {
    /// Create a client for the public Expo endpoint. The access token is
    /// optional; Expo only enforces it for projects with push security
    /// enabled.
    pub fn new(access_token: Option<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string(), access_token)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_endpoint(endpoint: String, access_token: Option<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint,
            access_token,
            http_client,
        }
    }

    /// Send one notification to many Expo tokens.
    ///
    /// Pools above `PUSH_BATCH_LIMIT` are split into sequential batches and
    /// results are concatenated in input order. A failed HTTP call fails
    /// every token in that batch transiently; only a parsed
    /// `DeviceNotRegistered` ticket marks a token permanently invalid.
    pub async fn send(&self, device_tokens: &[String], push: &ExpoPush) -> BatchSendResult {
        let mut results = Vec::with_capacity(device_tokens.len());
        let mut success_count = 0;
        let mut failure_count = 0;

        for batch in device_tokens.chunks(PUSH_BATCH_LIMIT) {
            match self.send_batch(batch, push).await {
                Ok(tickets) => {
                    for (token, ticket) in batch.iter().zip(tickets) {
                        let success = ticket.status == "ok";
                        if success {
                            success_count += 1;
                        } else {
                            failure_count += 1;
                        }
                        results.push(ExpoSendResult {
                            token: token.clone(),
                            ticket_id: ticket.id,
                            success,
                            error_code: ticket.details.and_then(|d| d.error),
                            error_message: ticket.message,
                        });
                    }
                }
                Err(e) => {
                    // Transport-level failure: nothing is known about any
                    // individual token, so none of them may be invalidated.
                    warn!("Expo batch of {} tokens failed: {}", batch.len(), e);
                    failure_count += batch.len();
                    for token in batch {
                        results.push(ExpoSendResult {
                            token: token.clone(),
                            ticket_id: None,
                            success: false,
                            error_code: None,
                            error_message: Some(e.to_string()),
                        });
                    }
                }
            }
        }

        BatchSendResult {
            success_count,
            failure_count,
            results,
        }
    }

    /// Send a single batch and return its ticket array.
    async fn send_batch(
        &self,
        batch: &[String],
        push: &ExpoPush,
    ) -> Result<Vec<ExpoPushTicket>, ExpoError> {
        let messages: Vec<ExpoPushMessage> = batch
            .iter()
            .map(|token| ExpoPushMessage {
                to: token.clone(),
                title: push.title.clone(),
                body: push.body.clone(),
                data: push.data.clone(),
                priority: push.priority.clone(),
                sound: "default",
            })
            .collect();

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&messages);

        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExpoError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExpoError::Status(status.as_u16(), body));
        }

        let parsed: ExpoPushResponse = response
            .json()
            .await
            .map_err(|e| ExpoError::ResponseParse(e.to_string()))?;

        if parsed.data.len() != batch.len() {
            return Err(ExpoError::TicketMismatch {
                expected: batch.len(),
                got: parsed.data.len(),
            });
        }

        debug!("Expo accepted batch of {} messages", batch.len());
        Ok(parsed.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_expo_token_prefixes() {
        assert!(is_expo_token("ExponentPushToken[abc123]"));
        assert!(is_expo_token("ExpoPushToken[abc123]"));
        assert!(!is_expo_token("fGzK9...raw-fcm-registration-token"));
        assert!(!is_expo_token(""));
    }

    #[test]
    fn ticket_array_parses_mixed_statuses() {
        let body = r#"{"data": [
            {"status": "ok", "id": "ticket-1"},
            {"status": "error", "message": "\"ExponentPushToken[x]\" is not a registered push notification recipient",
             "details": {"error": "DeviceNotRegistered"}}
        ]}"#;

        let parsed: ExpoPushResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].status, "ok");
        assert_eq!(parsed.data[0].id.as_deref(), Some("ticket-1"));
        assert_eq!(
            parsed.data[1]
                .details
                .as_ref()
                .and_then(|d| d.error.as_deref()),
            Some("DeviceNotRegistered")
        );
    }

    #[test]
    fn device_not_registered_is_permanently_invalid() {
        let result = ExpoSendResult {
            token: "ExponentPushToken[x]".to_string(),
            ticket_id: None,
            success: false,
            error_code: Some("DeviceNotRegistered".to_string()),
            error_message: None,
        };
        assert!(result.permanently_invalid());
    }

    #[test]
    fn other_ticket_errors_are_transient() {
        for code in [Some("MessageTooBig"), Some("MessageRateExceeded"), None] {
            let result = ExpoSendResult {
                token: "ExponentPushToken[x]".to_string(),
                ticket_id: None,
                success: false,
                error_code: code.map(str::to_string),
                error_message: None,
            };
            assert!(!result.permanently_invalid(), "{:?}", code);
        }
    }

    #[test]
    fn message_serializes_flat_schema() {
        let message = ExpoPushMessage {
            to: "ExponentPushToken[abc]".to_string(),
            title: "Cocoon Price Update".to_string(),
            body: "Min: 100 Max: 200".to_string(),
            data: Some(serde_json::json!({"screen": "prices", "market": "Ramanagara"})),
            priority: "high".to_string(),
            sound: "default",
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["to"], "ExponentPushToken[abc]");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["sound"], "default");
        assert_eq!(json["data"]["market"], "Ramanagara");
    }

    #[test]
    fn message_omits_absent_data() {
        let message = ExpoPushMessage {
            to: "ExponentPushToken[abc]".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            data: None,
            priority: "default".to_string(),
            sound: "default",
        };

        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn batch_limit_splits_large_pools() {
        let tokens: Vec<String> = (0..250)
            .map(|i| format!("ExponentPushToken[{}]", i))
            .collect();
        let batches: Vec<_> = tokens.chunks(PUSH_BATCH_LIMIT).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 100);
        assert_eq!(batches[2].len(), 50);
    }
}
