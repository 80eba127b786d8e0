use crate::errors::{ProtectError, Result};
use crate::github::types::{ApiResponse, ProtectionTarget};
use crate::policy::ProtectionPolicy;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::time::Duration;

pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
pub const API_VERSION: &str = "2022-11-28";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Branch protection endpoint of the hosting service
///
/// Implementations return `Ok` for any completed request, whatever its status.
/// `Err` is only for requests that never got a response.
pub trait ProtectionApi {
    fn put_protection(
        &self,
        target: &ProtectionTarget,
        token: &str,
        policy: &ProtectionPolicy,
    ) -> Result<ApiResponse>;
    fn get_protection(&self, target: &ProtectionTarget, token: &str) -> Result<ApiResponse>;
}

pub struct HttpProtectionApi {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl HttpProtectionApi {
    pub fn new(api_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProtectError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
        })
    }

    fn send(
        &self,
        request: reqwest::blocking::RequestBuilder,
        token: &str,
    ) -> Result<ApiResponse> {
        let response = request
            .header(ACCEPT, ACCEPT_MEDIA_TYPE)
            .header(USER_AGENT, concat!("branch-guard/", env!("CARGO_PKG_VERSION")))
            .header(API_VERSION_HEADER, API_VERSION)
            .bearer_auth(token)
            .send()
            .map_err(|e| ProtectError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ProtectError::Transport(e.to_string()))?;
        log::debug!("Response status {} ({} bytes)", status, body.len());

        Ok(ApiResponse { status, body })
    }
}

impl ProtectionApi for HttpProtectionApi {
    fn put_protection(
        &self,
        target: &ProtectionTarget,
        token: &str,
        policy: &ProtectionPolicy,
    ) -> Result<ApiResponse> {
        let url = target.endpoint(&self.api_url);
        log::debug!("PUT {}", url);
        self.send(self.client.put(url).json(policy), token)
    }

    fn get_protection(&self, target: &ProtectionTarget, token: &str) -> Result<ApiResponse> {
        let url = target.endpoint(&self.api_url);
        log::debug!("GET {}", url);
        self.send(self.client.get(url), token)
    }
}

/// Records every call and answers with canned responses
#[cfg(test)]
pub struct MockProtectionApi {
    pub put_response: Option<ApiResponse>,
    pub get_response: Option<ApiResponse>,
    pub puts: std::sync::Mutex<Vec<(ProtectionTarget, String, String)>>,
    pub gets: std::sync::Mutex<Vec<(ProtectionTarget, String)>>,
}

#[cfg(test)]
impl MockProtectionApi {
    /// Both requests succeed with the body the service would echo back
    pub fn new() -> Self {
        let echoed = serde_json::json!({
            "url": "https://api.github.com/repos/acme/widgets/branches/master/protection",
            "required_status_checks": { "strict": true, "contexts": ["quality", "deploy"] },
            "required_pull_request_reviews": { "required_approving_review_count": 1 },
            "enforce_admins": { "enabled": true },
            "required_linear_history": { "enabled": true }
        })
        .to_string();

        Self {
            put_response: Some(ApiResponse {
                status: 200,
                body: echoed.clone(),
            }),
            get_response: Some(ApiResponse {
                status: 200,
                body: echoed,
            }),
            puts: std::sync::Mutex::new(Vec::new()),
            gets: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_put_status(mut self, status: u16, body: &str) -> Self {
        self.put_response = Some(ApiResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn with_get_status(mut self, status: u16, body: &str) -> Self {
        self.get_response = Some(ApiResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn with_put_unreachable(mut self) -> Self {
        self.put_response = None;
        self
    }

    pub fn with_get_unreachable(mut self) -> Self {
        self.get_response = None;
        self
    }

    /// `(target, token, body)` of each PUT
    pub fn get_puts(&self) -> Vec<(ProtectionTarget, String, String)> {
        self.puts.lock().unwrap().clone()
    }

    pub fn get_gets(&self) -> Vec<(ProtectionTarget, String)> {
        self.gets.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.puts.lock().unwrap().len() + self.gets.lock().unwrap().len()
    }
}

#[cfg(test)]
impl ProtectionApi for MockProtectionApi {
    fn put_protection(
        &self,
        target: &ProtectionTarget,
        token: &str,
        policy: &ProtectionPolicy,
    ) -> Result<ApiResponse> {
        let body = serde_json::to_string(policy)?;
        self.puts
            .lock()
            .unwrap()
            .push((target.clone(), token.to_string(), body));
        self.put_response
            .clone()
            .ok_or_else(|| ProtectError::Transport("connection refused".to_string()))
    }

    fn get_protection(&self, target: &ProtectionTarget, token: &str) -> Result<ApiResponse> {
        self.gets
            .lock()
            .unwrap()
            .push((target.clone(), token.to_string()));
        self.get_response
            .clone()
            .ok_or_else(|| ProtectError::Transport("operation timed out".to_string()))
    }
}
