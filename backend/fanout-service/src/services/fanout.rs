/// Fan-out coordinator
///
/// Given a validated payload, loads the whole token pool, partitions it by
/// transport, dispatches to both channels concurrently, aggregates the
/// per-token outcomes, and prunes tokens a channel proved permanently
/// invalid. No rollback and no automatic retry: a mixed outcome is
/// reported as-is and retry policy belongs to the caller.
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::metrics;
use crate::models::{
    ChannelTally, DispatchOutcome, NotificationPayload, PerTokenResult, TransportKind,
};
use crate::services::channel::{all_failed, ChannelSender};
use crate::services::token_store::TokenStore;

pub struct FanoutCoordinator {
    store: Arc<dyn TokenStore>,
    fcm: Arc<dyn ChannelSender>,
    expo: Arc<dyn ChannelSender>,
}

impl FanoutCoordinator {
    pub fn new(
        store: Arc<dyn TokenStore>,
        fcm: Arc<dyn ChannelSender>,
        expo: Arc<dyn ChannelSender>,
    ) -> Self {
        Self { store, fcm, expo }
    }

    /// Dispatch one notification to every registered token.
    ///
    /// A token store failure aborts the request; everything downstream of
    /// the store degrades into counts instead of errors.
    pub async fn dispatch(&self, payload: &NotificationPayload) -> Result<DispatchOutcome> {
        let tokens = self.store.list_all().await?;

        if tokens.is_empty() {
            // "No recipients" is a valid terminal state, not an error.
            info!("Dispatch requested with no registered tokens");
            return Ok(DispatchOutcome::default());
        }

        let mut fcm_tokens = Vec::new();
        let mut expo_tokens = Vec::new();
        for device in tokens {
            match device.transport {
                TransportKind::Fcm => fcm_tokens.push(device.token),
                TransportKind::Expo => expo_tokens.push(device.token),
            }
        }

        info!(
            "Dispatching \"{}\" to {} fcm / {} expo tokens",
            payload.title,
            fcm_tokens.len(),
            expo_tokens.len()
        );

        // The channels are independent I/O; run them concurrently so one
        // gateway's latency never delays the other's delivery.
        let fcm_task = spawn_send(self.fcm.clone(), fcm_tokens.clone(), payload.clone());
        let expo_task = spawn_send(self.expo.clone(), expo_tokens.clone(), payload.clone());

        let (fcm_join, expo_join) = tokio::join!(fcm_task, expo_task);
        let fcm_results = join_or_all_failed(fcm_join, &fcm_tokens, "fcm");
        let expo_results = join_or_all_failed(expo_join, &expo_tokens, "expo");

        let fcm_tally = ChannelTally::from_results(&fcm_results);
        let expo_tally = ChannelTally::from_results(&expo_results);
        metrics::observe_dispatch("fcm", fcm_tally.sent, fcm_tally.failed);
        metrics::observe_dispatch("expo", expo_tally.sent, expo_tally.failed);

        let invalid_tokens_removed = self
            .remove_invalid_tokens(fcm_results.iter().chain(expo_results.iter()))
            .await;

        let outcome = DispatchOutcome {
            fcm: fcm_tally,
            expo: expo_tally,
            invalid_tokens_removed,
        };

        info!(
            "Dispatch complete: {} sent, {} failed, {} invalid tokens removed",
            outcome.total_sent(),
            outcome.total_failed(),
            outcome.invalid_tokens_removed
        );

        Ok(outcome)
    }

    /// Delete every token a channel proved permanently invalid. Deletions
    /// are independent: one failure is logged and skipped, and only
    /// successful deletions are counted.
    async fn remove_invalid_tokens<'a>(
        &self,
        results: impl Iterator<Item = &'a PerTokenResult>,
    ) -> usize {
        let mut removed = 0;

        for result in results.filter(|r| r.permanently_invalid) {
            match self.store.delete(&result.token).await {
                Ok(()) => {
                    metrics::observe_invalid_token_removed();
                    removed += 1;
                }
                Err(e) => {
                    warn!("Failed to remove invalid token: {}", e);
                }
            }
        }

        removed
    }
}

/// Run one channel send on its own task. A channel with an empty
/// partition is not invoked at all; a panicking channel is isolated to
/// its task instead of taking the other channel down with it.
fn spawn_send(
    channel: Arc<dyn ChannelSender>,
    tokens: Vec<String>,
    payload: NotificationPayload,
) -> JoinHandle<Vec<PerTokenResult>> {
    tokio::spawn(async move {
        if tokens.is_empty() {
            return Vec::new();
        }
        channel.send(&tokens, &payload).await
    })
}

fn join_or_all_failed(
    joined: std::result::Result<Vec<PerTokenResult>, tokio::task::JoinError>,
    tokens: &[String],
    channel_name: &str,
) -> Vec<PerTokenResult> {
    match joined {
        Ok(results) => results,
        Err(e) => {
            error!("{} channel task failed: {}", channel_name, e);
            all_failed(tokens, &format!("{} channel task failed", channel_name))
        }
    }
}
