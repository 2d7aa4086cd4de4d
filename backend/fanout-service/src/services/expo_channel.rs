use async_trait::async_trait;
use expo_push::{ExpoClient, ExpoPush};
use std::sync::Arc;

use crate::models::{NotificationPayload, PerTokenResult, Priority, TransportKind};
use crate::services::channel::ChannelSender;

/// Relay delivery through the Expo push service.
pub struct ExpoChannel {
    client: Arc<ExpoClient>,
}

impl ExpoChannel {
    pub fn new(client: Arc<ExpoClient>) -> Self {
        Self { client }
    }

    /// Expo gets the flat rendering. Its message schema has no image
    /// field, so a rich media URL travels inside the data map for the
    /// client to pick up.
    fn render(payload: &NotificationPayload) -> ExpoPush {
        let mut data = payload.data.clone();
        if let Some(url) = &payload.image_url {
            data.insert("imageUrl".to_string(), url.clone());
        }

        ExpoPush {
            title: payload.title.clone(),
            body: payload.body.clone(),
            data: if data.is_empty() {
                None
            } else {
                Some(serde_json::json!(data))
            },
            priority: match payload.priority {
                Priority::High => "high",
                Priority::Medium => "default",
                Priority::Low => "normal",
            }
            .to_string(),
        }
    }
}

#[async_trait]
impl ChannelSender for ExpoChannel {
    fn kind(&self) -> TransportKind {
        TransportKind::Expo
    }

    async fn send(&self, tokens: &[String], payload: &NotificationPayload) -> Vec<PerTokenResult> {
        let push = Self::render(payload);

        // The client already folds HTTP and parse failures into transient
        // per-token failures, so this cannot abort the request.
        let batch = self.client.send(tokens, &push).await;

        batch
            .results
            .into_iter()
            .map(|result| PerTokenResult {
                permanently_invalid: result.permanently_invalid(),
                succeeded: result.success,
                error_detail: result.error_message.or(result.error_code),
                token: result.token,
            })
            .collect()
    }
}
