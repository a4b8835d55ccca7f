use std::path::PathBuf;
use serde::Deserialize;
use authgate_lib::error::AuthgateError;

#[derive(Deserialize, Clone)]
pub struct Config {

    /// General configuration options
    pub general: General,

    /// Configuration for the http(s) server(s)
    pub http: Http,

    /// Configuration for the hosted authentication backend
    pub auth: AuthService,

    /// Configuration for the failed-login attempt guard
    #[serde(default)]
    pub rate_limit: RateLimit,
}


impl Config {

    /// Read config from a toml file
    pub fn from_file(file_path: &PathBuf) -> Result<Self, AuthgateError> {
        let toml_content = std::fs::read_to_string(&file_path).or_else(|e| {
            let e = AuthgateError::ConfigFileUnreadable(file_path.display().to_string(), e);
            Err(e)
        })?;
        let config: Self = toml::from_str(&toml_content).or_else(|e| {
            let e = AuthgateError::ConfigFileUnparsable(file_path.display().to_string(), e);
            Err(e)
        })?;
        Ok(config)
    }
}


#[derive(Deserialize, Clone)]
pub struct General {

    /// Where the browser is sent after a successful login
    #[serde(default = "default_login_redirect")]
    pub login_redirect: String,
}

fn default_login_redirect() -> String { "/".to_string() }


#[derive(Deserialize, Clone)]
pub struct Http {

    /// The url to run the http server onto (eg. "localhost:8080")
    pub url_http: String,

    /// The url to run the https server onto (eg. "localhost:8443")
    pub url_https: String,

    /// Path to the TLS cert file in PEM format
    pub tls_cert: PathBuf,

    /// Path to the TLS key file in PEM format
    pub tls_key: PathBuf,
}


#[derive(Deserialize, Clone)]
/// The hosted authentication backend that actually verifies credentials
/// Authgate never sees whether a password is correct, it only relays.
pub struct AuthService {

    /// Base url of the authentication service (eg. "https://auth.example.com")
    pub url: String,

    /// The public api key handed to the authentication service with each request
    pub api_key: String,

    /// Timeout for requests towards the authentication service
    #[serde(default = "default_auth_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_auth_timeout_ms() -> u64 { 10_000 }


#[derive(Deserialize, Clone)]
pub struct RateLimit {

    /// Failed login attempts per form session until the guard locks
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Lock duration in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

fn default_max_attempts() -> u32 { 5 }
fn default_window_ms() -> u64 { 60_000 }

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_ms: default_window_ms(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_rate_limit_defaults() {
        let toml_content = r#"
            [general]

            [http]
            url_http = "localhost:8080"
            url_https = "localhost:8443"
            tls_cert = "tls/cert.pem"
            tls_key = "tls/key.pem"

            [auth]
            url = "https://auth.example.com"
            api_key = "anon-key"
        "#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.rate_limit.max_attempts, 5);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.auth.timeout_ms, 10_000);
        assert_eq!(config.general.login_redirect, "/");
    }

    #[test]
    fn parse_with_explicit_rate_limit() {
        let toml_content = r#"
            [general]
            login_redirect = "/dashboard"

            [http]
            url_http = "localhost:8080"
            url_https = "localhost:8443"
            tls_cert = "tls/cert.pem"
            tls_key = "tls/key.pem"

            [auth]
            url = "https://auth.example.com"
            api_key = "anon-key"
            timeout_ms = 2500

            [rate_limit]
            max_attempts = 3
            window_ms = 30000
        "#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.rate_limit.max_attempts, 3);
        assert_eq!(config.rate_limit.window_ms, 30_000);
        assert_eq!(config.auth.timeout_ms, 2500);
        assert_eq!(config.general.login_redirect, "/dashboard");
    }
}
