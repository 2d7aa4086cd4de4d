use async_trait::async_trait;
use fcm_push::{FcmClient, FcmPush};
use std::sync::Arc;
use tracing::{error, warn};

use crate::models::{NotificationPayload, PerTokenResult, TransportKind};
use crate::services::channel::{all_failed, ChannelSender};

/// Native delivery through Firebase Cloud Messaging.
///
/// The client is optional: a deployment without Firebase credentials still
/// serves dispatch requests, with every FCM token reported as a transient
/// failure so nothing gets invalidated by a configuration gap.
pub struct FcmChannel {
    client: Option<Arc<FcmClient>>,
}

impl FcmChannel {
    pub fn new(client: Option<Arc<FcmClient>>) -> Self {
        Self { client }
    }

    /// FCM gets the structured rendering: notification block + data map,
    /// with urgency and rich media as first-class fields.
    fn render(payload: &NotificationPayload) -> FcmPush {
        FcmPush {
            title: payload.title.clone(),
            body: payload.body.clone(),
            data: payload.data_value(),
            image: payload.image_url.clone(),
            high_priority: payload.priority.is_high(),
        }
    }
}

#[async_trait]
impl ChannelSender for FcmChannel {
    fn kind(&self) -> TransportKind {
        TransportKind::Fcm
    }

    async fn send(&self, tokens: &[String], payload: &NotificationPayload) -> Vec<PerTokenResult> {
        let client = match &self.client {
            Some(client) => client,
            None => {
                warn!(
                    "FCM client not configured, failing {} tokens transiently",
                    tokens.len()
                );
                return all_failed(tokens, "FCM client not configured");
            }
        };

        let push = Self::render(payload);

        match client.send_multicast(tokens, &push).await {
            Ok(multicast) => multicast
                .results
                .into_iter()
                .map(|result| PerTokenResult {
                    permanently_invalid: result.permanently_invalid(),
                    succeeded: result.success,
                    error_detail: result.error_message.or(result.error_status),
                    token: result.token,
                })
                .collect(),
            Err(e) => {
                // Whole-channel failure (credentials or token exchange).
                // Nothing reached the gateway, so no token may be blamed.
                error!("FCM multicast failed: {}", e);
                all_failed(tokens, &e.to_string())
            }
        }
    }
}
