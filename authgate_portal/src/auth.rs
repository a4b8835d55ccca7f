use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use authgate_lib::error::AuthgateError;
use crate::config;

/// A session issued by the authentication backend
/// Authgate only relays this to the browser, it does not manage sessions.
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum AuthError {

    /// The backend processed the request and rejected the credentials
    #[error("authentication denied: {0}")]
    Denied(String),

    /// The backend could not be asked (transport error, 5xx, garbled response)
    #[error("authentication service unavailable: {0}")]
    Unavailable(String),
}

/// The authentication backend as seen by the submission controller
///
/// This is injected into the AppState so tests can substitute it.
#[axum::async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
}


#[derive(Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SignInResponse {
    access_token: String,
    token_type: String,
    expires_in: i64,
}

/// Failure body of the hosted backend, which is not consistent across
/// endpoint versions, hence the alternatives.
#[derive(Deserialize)]
struct SignInFailure {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl SignInFailure {
    fn reason(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}


/// Client for the hosted authentication service (password grant)
pub struct HostedAuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HostedAuthClient {

    pub fn new(cfg: &config::AuthService) -> Result<Self, AuthgateError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()
            .or_else(|e| Err(AuthgateError::AuthClientSetup(e.to_string())))?;
        Ok(Self {
            http,
            base_url: cfg.url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }
}

#[axum::async_trait]
impl AuthProvider for HostedAuthClient {

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let url = format!("{}/auth/v1/token", self.base_url);
        let response = match self.http.post(&url)
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&SignInRequest { email, password })
            .send().await {
            Ok(x) => x,
            Err(e) => {
                log::warn!("cannot reach authentication backend at '{}': {}", url, e);
                return Err(AuthError::Unavailable(e.to_string()));
            },
        };

        let status = response.status();
        if status.is_success() {
            match response.json::<SignInResponse>().await {
                Ok(body) => {
                    let expires_at = Utc::now() + TimeDelta::seconds(body.expires_in);
                    Ok(AuthSession {
                        access_token: body.access_token,
                        token_type: body.token_type,
                        expires_at,
                    })
                },
                Err(e) => {
                    log::error!("garbled session response from authentication backend: {}", e);
                    Err(AuthError::Unavailable(e.to_string()))
                },
            }
        } else if status.is_server_error() {
            log::warn!("authentication backend failed with {}", status);
            Err(AuthError::Unavailable(format!("backend returned {}", status)))
        } else {
            let reason = match response.json::<SignInFailure>().await {
                Ok(body) => body.reason().unwrap_or_else(|| status.to_string()),
                Err(_) => status.to_string(),
            };
            Err(AuthError::Denied(reason))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reason_alternatives() {
        let f = SignInFailure {
            error_description: Some("invalid login credentials".to_string()),
            msg: Some("ignored".to_string()),
            message: None,
        };
        assert_eq!(f.reason().unwrap(), "invalid login credentials");

        let f = SignInFailure { error_description: None, msg: Some("rate limited".to_string()), message: None };
        assert_eq!(f.reason().unwrap(), "rate limited");

        let f = SignInFailure { error_description: None, msg: None, message: None };
        assert!(f.reason().is_none());
    }
}
