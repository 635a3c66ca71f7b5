//! Blocking HTTP client for the SonarQube web API.
//!
//! Authenticates with a user token sent as the basic-auth user name and an
//! empty password, which is how SonarQube accepts tokens.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::errors::ExportError;
use crate::export::SonarApi;

const TIMEOUT_SECS: u64 = 30;

pub struct SonarClient {
    http: Client,
    base_url: String,
    token: String,
}

impl SonarClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ExportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|source| ExportError::Http {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

impl SonarApi for SonarClient {
    fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ExportError> {
        let url = self.endpoint_url(endpoint);
        debug!("GET {} {:?}", url, query);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .basic_auth(&self.token, None::<&str>)
            .send()
            .map_err(|source| ExportError::Http {
                url: url.clone(),
                source,
            })?;

        if resp.status() != StatusCode::OK {
            return Err(ExportError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }

        resp.json::<Value>()
            .map_err(|source| ExportError::Http { url, source })
    }
}
