//! JSON/HTTP client for the parking backend.

use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::shared::InfraError;

/// Thin wrapper over [`reqwest::Client`] bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    /// Build a client. A timeout is only set when configured.
    pub fn new(config: ApiConfig) -> Result<Self, InfraError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET an endpoint and decode the body as JSON.
    pub async fn get_json(&self, path: &str) -> Result<Value, InfraError> {
        let url = self.config.url(path);
        debug!(method = "GET", url = url.as_str(), "Calling parking API");

        let response = self.http.get(url.as_str()).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Send a JSON body. A 2xx response with an empty or non-JSON body
    /// decodes to `Value::Null`.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, InfraError> {
        let url = self.config.url(path);
        debug!(method = %method, url = url.as_str(), "Calling parking API");

        let response = self.http.request(method, url.as_str()).json(body).send().await?;
        let response = check_status(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(url = url.as_str(), error = %e, "Non-JSON success body, treating as accepted");
                Ok(Value::Null)
            }
        }
    }
}

/// Turn a non-2xx response into an error, preferring the body's `message`.
async fn check_status(response: Response) -> Result<Response, InfraError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                format!("request failed with status {}", status)
            } else {
                format!("request failed with status {}: {}", status, text.trim())
            }
        });

    warn!(status = status.as_u16(), message = message.as_str(), "Parking API error");
    Err(InfraError::UnexpectedResponse {
        status: status.as_u16(),
        message,
    })
}
