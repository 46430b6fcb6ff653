use thiserror::Error;
use tracing::info;

use crate::config::Config;

/// Fixed diagnostic messages for the connectivity test.
pub const SUCC_CONNECTIVITY_TEST: &str = "Connectivity test passed";
pub const ERR_CONNECTIVITY_TEST: &str = "Connectivity test failed";

/// Errors from the proxy management probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("error connecting to the proxy management endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("proxy management endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Connection details for the proxy appliance's management console.
#[derive(Debug, Clone)]
pub struct ProxyEndpoint {
    pub host: String,
    pub mgmt_port: u16,
    pub username: String,
    pub password: String,
    pub verify_tls: bool,
    pub test_target: String,
}

impl ProxyEndpoint {
    pub fn from_config(config: &Config) -> Self {
        ProxyEndpoint {
            host: config.proxy_host.clone(),
            mgmt_port: config.proxy_mgmt_port,
            username: config.username.clone(),
            password: config.password.clone(),
            verify_tls: config.verify_tls,
            test_target: config.test_target.clone(),
        }
    }

    /// URL of the management console's content-filter test endpoint for the
    /// configured target.
    fn test_url(&self) -> String {
        format!(
            "https://{}:{}/ContentFilter/TestUrl/{}",
            self.host, self.mgmt_port, self.test_target
        )
    }
}

/// Issue a single GET against the management console's URL test endpoint.
///
/// Best-effort probe: no retries, and timeout policy is left to the HTTP
/// client's defaults.
pub async fn check_connectivity(endpoint: &ProxyEndpoint) -> Result<(), ProbeError> {
    info!(
        host = %endpoint.host,
        port = endpoint.mgmt_port,
        "Querying proxy server to check connectivity"
    );

    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(!endpoint.verify_tls)
        .build()?;

    let response = client
        .get(endpoint.test_url())
        .basic_auth(&endpoint.username, Some(&endpoint.password))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::Status(status));
    }

    Ok(())
}
