//! Arlo API HTTP client.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::types::*;
use crate::error::{Error, Result};
use crate::library::{DateWindow, RecordingLibrary};
use crate::media::{parse_library, Recording};

/// Arlo web API base URL.
pub const API_BASE: &str = "https://my.arlo.com/hmsweb";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("arlo-downloader/", env!("CARGO_PKG_VERSION"));

/// Date format of library queries.
const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// Arlo API client.
#[derive(Debug, Clone)]
pub struct ArloApi {
    client: Client,
    base_url: String,
}

impl ArloApi {
    /// Create a client against the public Arlo API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE)
    }

    /// Create a client against another base URL (e.g. a local test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The underlying HTTP client, shared with the download workers.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Make a JSON POST request, authenticated when a session is given.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        session: Option<&Session>,
        body: &B,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let mut request = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(body);

        if let Some(session) = session {
            request = request.header(header::AUTHORIZATION, &session.token);
        }

        let response = request.send().await?;
        tracing::debug!("Response status: {}", response.status());

        Ok(response)
    }
}

/// Parse a response body, keeping the body in the error for diagnosis.
fn decode<T: DeserializeOwned>(text: &str, what: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        Error::Api(format!(
            "Failed to parse {}: {} - Response: {}",
            what,
            e,
            snippet(text)
        ))
    })
}

/// At most the first 500 bytes of a body, cut on a character boundary.
fn snippet(text: &str) -> &str {
    let mut end = text.len().min(500);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn is_auth_status(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

#[async_trait]
impl RecordingLibrary for ArloApi {
    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .post("/login/v2", None, &LoginRequest { email, password })
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if is_auth_status(status) {
            tracing::error!("Auth error response: {}", text);
            return Err(Error::Authentication(format!("HTTP {}", status)));
        }

        let api_response: ApiResponse<serde_json::Value> = decode(&text, "login response")?;
        if !api_response.success {
            let details: ApiErrorData =
                serde_json::from_value(api_response.data).unwrap_or_default();
            return Err(Error::Authentication(details.describe()));
        }

        if !status.is_success() {
            return Err(Error::Authentication(format!("HTTP {}", status)));
        }

        let data: LoginData = serde_json::from_value(api_response.data)
            .map_err(|e| Error::Authentication(format!("Malformed login data: {}", e)))?;

        tracing::debug!("Logged in as user {}", data.user_id);
        Ok(data.into())
    }

    async fn fetch_library(
        &self,
        session: &Session,
        window: &DateWindow,
    ) -> Result<Vec<Recording>> {
        let body = LibraryRequest {
            date_from: window.start_date().format(QUERY_DATE_FORMAT).to_string(),
            date_to: window.end_date().format(QUERY_DATE_FORMAT).to_string(),
        };

        let response = self.post("/users/library", Some(session), &body).await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("Library response length: {} bytes", text.len());

        if is_auth_status(status) {
            return Err(Error::Authentication(format!(
                "Session rejected by library query: HTTP {}",
                status
            )));
        }

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Library query failed: HTTP {} - {}",
                status,
                snippet(&text)
            )));
        }

        let api_response: ApiResponse<serde_json::Value> = decode(&text, "library")?;
        if !api_response.success {
            let details: ApiErrorData =
                serde_json::from_value(api_response.data).unwrap_or_default();
            return Err(Error::Api(format!(
                "Library query failed: {}",
                details.describe()
            )));
        }

        let entries: Vec<LibraryEntry> = serde_json::from_value(api_response.data)?;
        Ok(parse_library(&entries))
    }
}
