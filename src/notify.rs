/// Brightness change notifications to the matrix server
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tokio::time::Duration;

use crate::config::Config;
use crate::models::Brightness;

// Fixed tag identifying this client to the server
const SOURCE_TAG: &str = "LightSensor";
const REQUEST_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Serialize)]
struct BrightnessPayload {
    #[serde(rename = "Brightness")]
    brightness: u8,
    #[serde(rename = "Source")]
    source: &'static str,
}

/// Why a notification did not go through. The caller logs these and moves
/// on; a failed post is never retried.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("server answered HTTP {0}")]
    Status(StatusCode),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

pub struct Notifier {
    client: Client,
    url: String,
    authorization: String,
}

impl Notifier {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Notifier {
            client,
            url: format!("{}/matrix/brightness", config.server_url),
            authorization: basic_auth_value(&config.encoded_api_key),
        })
    }

    /// POST the new brightness tier to the server.
    ///
    /// Only the status code is inspected; the response body is ignored.
    pub async fn post_brightness(&self, brightness: Brightness) -> Result<(), NotifyError> {
        let payload = BrightnessPayload {
            brightness: brightness.weight(),
            source: SOURCE_TAG,
        };

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.authorization.as_str())
            .json(&payload)
            .send()
            .await?;

        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(NotifyError::Status(response.status()))
        }
    }
}

fn basic_auth_value(encoded_key: &str) -> String {
    format!("Basic {}", encoded_key)
}
