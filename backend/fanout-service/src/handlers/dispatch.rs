use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::AppError;
use crate::models::{CustomNotificationRequest, DispatchOutcome, PriceData};
use crate::services::{validate_custom, validate_price, FanoutCoordinator};

/// Body of POST /send-notification
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationPayload {
    pub price_data: Option<PriceData>,
}

/// Wire shape of a dispatch result, as consumed by the admin client.
/// Degraded dispatches (one channel fully down) are still `success: true`
/// with the failure expressed in the counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub success: bool,
    pub fcm_sent: usize,
    pub expo_sent: usize,
    pub total_sent: usize,
    pub total_failed: usize,
    pub invalid_tokens_removed: usize,
}

impl From<DispatchOutcome> for DispatchResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        Self {
            success: true,
            fcm_sent: outcome.fcm.sent,
            expo_sent: outcome.expo.sent,
            total_sent: outcome.total_sent(),
            total_failed: outcome.total_failed(),
            invalid_tokens_removed: outcome.invalid_tokens_removed,
        }
    }
}

/// Broadcast a price-update notification derived from the posted snapshot.
///
/// POST /send-notification
pub async fn send_notification(
    coordinator: web::Data<Arc<FanoutCoordinator>>,
    req: web::Json<SendNotificationPayload>,
) -> Result<HttpResponse, AppError> {
    let price = req
        .price_data
        .as_ref()
        .ok_or_else(|| AppError::Validation("priceData is required".to_string()))?;

    let payload = validate_price(price)?;
    let outcome = coordinator.dispatch(&payload).await?;

    Ok(HttpResponse::Ok().json(DispatchResponse::from(outcome)))
}

/// Broadcast a free-form notification written by an admin.
///
/// POST /send-custom-notification
pub async fn send_custom_notification(
    coordinator: web::Data<Arc<FanoutCoordinator>>,
    req: web::Json<CustomNotificationRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = validate_custom(&req)?;

    if let Some(market) = &req.target_market {
        // Advisory only; recipients are not filtered by market here.
        info!("Custom notification targeted at market {}", market);
    }

    let outcome = coordinator.dispatch(&payload).await?;

    Ok(HttpResponse::Ok().json(DispatchResponse::from(outcome)))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-notification", web::post().to(send_notification))
        .route(
            "/send-custom-notification",
            web::post().to(send_custom_notification),
        );
}
