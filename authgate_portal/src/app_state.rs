use std::path::PathBuf;
use std::sync::Arc;
use axum_server::tls_rustls::RustlsConfig;
use tokio::time::Duration;
use authgate_lib::error::AuthgateError;
use crate::auth::{AuthProvider, HostedAuthClient};
use crate::config::Config;
use crate::guards::SessionGuards;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: Arc<dyn AuthProvider>,
    pub guards: SessionGuards,
}

impl AppState {

    pub async fn new(config_file: &PathBuf) -> Result<Self, AuthgateError> {
        let config = Config::from_file(config_file)?;
        let auth: Arc<dyn AuthProvider> = Arc::new(HostedAuthClient::new(&config.auth)?);
        let guards = SessionGuards::new(config.rate_limit.max_attempts,
                                        Duration::from_millis(config.rate_limit.window_ms));
        Ok(AppState {
            config,
            auth,
            guards,
        })
    }

    /// Assemble an AppState around a substituted authentication backend
    #[cfg(test)]
    pub fn with_auth_provider(config: Config, auth: Arc<dyn AuthProvider>) -> Self {
        let guards = SessionGuards::new(config.rate_limit.max_attempts,
                                        Duration::from_millis(config.rate_limit.window_ms));
        AppState {
            config,
            auth,
            guards,
        }
    }

    pub async fn get_rustls_config(&self) -> Result<RustlsConfig, AuthgateError> {
        let tls_cfg = RustlsConfig::from_pem_file(&self.config.http.tls_cert,
                                                  &self.config.http.tls_key).await?;
        Ok(tls_cfg)
    }
}
