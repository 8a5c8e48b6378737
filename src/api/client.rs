use crate::api::models::{AppEdit, TrackInfo};
use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("rollout-messenger/", env!("CARGO_PKG_VERSION"));

/// Production endpoint for the Play Developer API
pub const PLAY_API_BASE: &str = "https://androidpublisher.googleapis.com";

#[derive(Debug, Clone)]
pub struct PlayConsoleClient {
    client: Client,
    pub base_url: String,
    pub access_token: Option<String>,
    timeout_secs: u64,
}

impl PlayConsoleClient {
    // Create base client with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(PlayConsoleClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
            timeout_secs,
        })
    }

    pub fn with_token(base_url: String, access_token: String) -> Result<Self, ApiError> {
        let mut client = PlayConsoleClient::new(base_url)?;
        client.access_token = Some(access_token);
        Ok(client)
    }

    pub fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Begin an edit transaction for the package and return its id
    pub async fn insert_edit(&self, package_name: &str) -> Result<AppEdit, ApiError> {
        let endpoint = format!("/androidpublisher/v3/applications/{}/edits", package_name);
        let response = self
            .build_request(Method::POST, &endpoint)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e, &endpoint))?;
        self.handle_response(response, &endpoint).await
    }

    /// Fetch status, rollout fraction and version codes for a track
    pub async fn get_track(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
    ) -> Result<TrackInfo, ApiError> {
        let endpoint = format!(
            "/androidpublisher/v3/applications/{}/edits/{}/tracks/{}",
            package_name, edit_id, track
        );
        let response = self
            .build_request(Method::GET, &endpoint)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e, &endpoint))?;
        self.handle_response(response, &endpoint).await
    }

    fn map_transport_error(&self, error: reqwest::Error, endpoint: &str) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout_secs,
                endpoint: endpoint.to_string(),
            }
        } else {
            ApiError::Http {
                status: 0,
                endpoint: endpoint.to_string(),
                message: format!("Request failed: {}", error),
            }
        }
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                401 | 403 => Err(ApiError::Unauthorized {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    server_message: error_text,
                }),
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: self.timeout_secs,
                    endpoint: endpoint.to_string(),
                }),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }
}
