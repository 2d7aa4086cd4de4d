use super::ApiResponse;
use crate::error::AppError;
use crate::models::{DeviceToken, TransportKind};
use crate::services::TokenStore;
/// Device token registration handlers
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Register device token request. `tokenType` is absent in records written
/// by older app versions; those register as Expo.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTokenPayload {
    pub token: String,
    pub platform: Option<String>,
    pub token_type: Option<String>,
}

/// Unregister device token request
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UnregisterTokenPayload {
    pub token: String,
}

/// Register (or refresh) a device token
///
/// POST /register-token
pub async fn register_token(
    store: web::Data<Arc<dyn TokenStore>>,
    req: web::Json<RegisterTokenPayload>,
) -> Result<HttpResponse, AppError> {
    let token = req.token.trim();
    if token.is_empty() {
        return Err(AppError::Validation("token is required".to_string()));
    }

    let transport = TransportKind::from_token_type(req.token_type.as_deref(), token);

    store
        .upsert(DeviceToken {
            token: token.to_string(),
            transport,
            platform: req.platform.clone(),
            registered_at: Utc::now(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({
        "tokenType": transport.as_str(),
    }))))
}

/// Remove a device token (client opted out or logged out)
///
/// POST /unregister-token
pub async fn unregister_token(
    store: web::Data<Arc<dyn TokenStore>>,
    req: web::Json<UnregisterTokenPayload>,
) -> Result<HttpResponse, AppError> {
    store.delete(req.token.trim()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({
        "removed": true,
    }))))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register-token", web::post().to(register_token))
        .route("/unregister-token", web::post().to(unregister_token));
}
