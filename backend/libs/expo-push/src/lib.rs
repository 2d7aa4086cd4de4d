/// Expo Push Library
///
/// Client for the Expo push relay service, used to reach client builds
/// whose notifications are delivered through Expo's hosted gateway rather
/// than directly through a vendor push service.
///
/// It handles:
/// - Batched delivery through `POST /--/api/v2/push/send`
/// - Ticket parsing with per-token status mapping
/// - DeviceNotRegistered detection for token cleanup
/// - Optional access-token authentication

pub mod client;
pub mod errors;
pub mod models;

pub use client::{is_expo_token, ExpoClient, PUSH_BATCH_LIMIT};
pub use errors::ExpoError;
pub use models::{BatchSendResult, ExpoPush, ExpoSendResult};
