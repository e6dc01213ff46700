//! Recording representation.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use url::Url;

use crate::error::Result;
use crate::fs::naming::sanitize_filename;

/// File extension used for every downloaded recording.
pub const RECORDING_EXTENSION: &str = "mp4";

/// A downloadable video recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    /// Vendor-assigned unique ID.
    pub unique_id: String,

    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,

    /// Signed, time-limited content URL.
    pub content_url: String,

    /// Expiry of the signed URL, when the URL carries one.
    pub url_expires_at: Option<DateTime<Utc>>,
}

impl Recording {
    /// Create a recording, reading the URL expiry from its signature parameters.
    pub fn new(
        unique_id: impl Into<String>,
        created_at: i64,
        content_url: impl Into<String>,
    ) -> Self {
        let content_url = content_url.into();
        let url_expires_at = parse_url_expiry(&content_url);

        Self {
            unique_id: unique_id.into(),
            created_at,
            content_url,
            url_expires_at,
        }
    }

    /// Creation time as a UTC datetime, if representable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }

    /// Generate the filename for this recording.
    ///
    /// `<YYYY-MM-DDTHH-MM-SS>-<unique_id>.mp4`, stable for a given recording.
    pub fn generate_filename(&self) -> Result<String> {
        let name = format!(
            "{}-{}.{}",
            self.format_timestamp(),
            self.unique_id,
            RECORDING_EXTENSION
        );
        sanitize_filename(&name)
    }

    /// Whether the signed URL is known to have expired at `now`.
    pub fn is_url_expired(&self, now: DateTime<Utc>) -> bool {
        self.url_expires_at
            .map(|expires| expires <= now)
            .unwrap_or(false)
    }

    /// Format the creation timestamp for filename.
    fn format_timestamp(&self) -> String {
        match self.created_at_utc() {
            Some(dt) => dt.format("%Y-%m-%dT%H-%M-%S").to_string(),
            None => self.created_at.to_string(),
        }
    }
}

/// Extract the expiry instant from a presigned URL.
///
/// Understands the absolute `Expires` parameter (CloudFront, S3 query auth v2)
/// and the relative `X-Amz-Date` + `X-Amz-Expires` pair (SigV4).
pub fn parse_url_expiry(content_url: &str) -> Option<DateTime<Utc>> {
    let url = Url::parse(content_url).ok()?;

    let mut expires = None;
    let mut amz_date = None;
    let mut amz_expires = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "Expires" => expires = value.parse::<i64>().ok(),
            "X-Amz-Date" => {
                amz_date = NaiveDateTime::parse_from_str(&value, "%Y%m%dT%H%M%SZ").ok()
            }
            "X-Amz-Expires" => amz_expires = value.parse::<i64>().ok(),
            _ => {}
        }
    }

    if let Some(secs) = expires {
        return Utc.timestamp_opt(secs, 0).single();
    }

    let signed_at = amz_date?.and_utc();
    signed_at.checked_add_signed(Duration::try_seconds(amz_expires?)?)
}
