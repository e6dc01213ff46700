//! API request and response type definitions.

use serde::{Deserialize, Serialize};

/// Generic API response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Error payload returned alongside `success: false`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorData {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ApiErrorData {
    /// Best human-readable description of the failure.
    pub fn describe(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.reason.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// Login request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub account_status: Option<String>,
}

/// Authenticated session handed to every library query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

impl From<LoginData> for Session {
    fn from(data: LoginData) -> Self {
        Self {
            token: data.token,
            user_id: data.user_id,
        }
    }
}

/// Library query body. Dates are `YYYYMMDD`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryRequest {
    pub date_from: String,
    pub date_to: String,
}

/// One entry of the recording library.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub unique_id: String,
    pub utc_created_date: i64,
    #[serde(default)]
    pub presigned_content_url: Option<String>,
    #[serde(default)]
    pub presigned_thumbnail_url: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub media_duration_second: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}
