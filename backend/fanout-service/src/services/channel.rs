use async_trait::async_trait;

use crate::models::{NotificationPayload, PerTokenResult, TransportKind};

/// One delivery transport.
///
/// `send` is infallible by contract: transport-level failures are folded
/// into all-failed, non-invalidating per-token results inside the
/// implementation so that one channel's outage can never abort the other
/// channel or the request. Results come back in input token order.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    fn kind(&self) -> TransportKind;

    async fn send(&self, tokens: &[String], payload: &NotificationPayload) -> Vec<PerTokenResult>;
}

/// Fold a whole token subset into transient failures with one shared
/// error detail. Used when the transport itself failed and nothing is
/// known about any individual token.
pub fn all_failed(tokens: &[String], detail: &str) -> Vec<PerTokenResult> {
    tokens
        .iter()
        .map(|token| PerTokenResult {
            token: token.clone(),
            succeeded: false,
            permanently_invalid: false,
            error_detail: Some(detail.to_string()),
        })
        .collect()
}
