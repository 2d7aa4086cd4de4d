use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub fcm: FcmConfig,
    pub expo: ExpoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmConfig {
    /// Path to the Firebase service account key file. When unset the
    /// native channel runs unconfigured and reports every token as a
    /// transient failure.
    pub credentials_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpoConfig {
    /// Optional bearer token for projects with Expo push security enabled.
    pub access_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: std::env::var("APP_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .map_err(|e| AppError::Config(format!("invalid APP_PORT: {}", e)))?,
            },
            fcm: FcmConfig {
                credentials_path: std::env::var("FCM_CREDENTIALS_PATH").ok(),
            },
            expo: ExpoConfig {
                access_token: std::env::var("EXPO_ACCESS_TOKEN").ok(),
            },
        })
    }
}
