//! CLI configuration

use sharefile_client::{Config, Credentials};
use std::time::Duration;

/// Connection settings gathered from flags and environment
#[derive(Clone)]
pub struct CliConfig {
    /// Auth endpoint base URL
    pub hostname: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
    /// Override for the API base URL
    pub api_base: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            hostname: "https://secure.sharefile.com".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            username: String::new(),
            password: String::new(),
            api_base: None,
            timeout_secs: 30,
        }
    }
}

impl CliConfig {
    /// Password grant inputs
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            &self.hostname,
            &self.client_id,
            &self.client_secret,
            &self.username,
            &self.password,
        )
    }

    /// Library client configuration
    pub fn client_config(&self) -> Config {
        let config = Config::default().with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.api_base {
            Some(base) => config.with_api_base(base),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config() {
        let cli = CliConfig {
            api_base: Some("http://localhost:8080/".to_string()),
            timeout_secs: 5,
            ..Default::default()
        };
        let config = cli.client_config();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_base.as_deref(), Some("http://localhost:8080"));
        assert_eq!(
            cli.credentials().token_url(),
            "https://secure.sharefile.com/oauth/token"
        );
    }
}
