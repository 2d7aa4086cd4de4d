/// FCM Push Library
///
/// Firebase Cloud Messaging (HTTP v1) client used for native push delivery
/// to devices registered with an FCM registration token.
///
/// It handles:
/// - OAuth2 access token minting from a Google service account
/// - Token caching with automatic refresh
/// - Single and multicast message delivery with batch splitting
/// - Per-token delivery error classification (unregistered vs transient)

pub mod client;
pub mod errors;
pub mod models;

pub use client::{FcmClient, MULTICAST_BATCH_LIMIT};
pub use errors::FcmError;
pub use models::{FcmPush, FcmSendResult, MulticastSendResult, ServiceAccountKey};
