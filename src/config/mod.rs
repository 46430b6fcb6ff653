use std::path::PathBuf;

use clap::Parser;

/// Connector configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "proxycat")]
#[command(about = "Category list connector and policy server for web proxy appliances")]
pub struct Config {
    /// HTTP server listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "PROXYCAT_LISTEN_ADDR")]
    pub listen_addr: String,

    /// Path to the persisted list data file
    #[arg(long, default_value = "data/list_data.json", env = "PROXYCAT_DATA_PATH")]
    pub data_path: PathBuf,

    /// Proxy appliance hostname or IP
    #[arg(long, default_value = "127.0.0.1", env = "PROXYCAT_PROXY_HOST")]
    pub proxy_host: String,

    /// Proxy appliance management console port
    #[arg(long, default_value = "8082", env = "PROXYCAT_PROXY_MGMT_PORT")]
    pub proxy_mgmt_port: u16,

    /// Management console username
    #[arg(long, default_value = "admin", env = "PROXYCAT_USERNAME")]
    pub username: String,

    /// Management console password
    #[arg(long, default_value = "", env = "PROXYCAT_PASSWORD")]
    pub password: String,

    /// Verify the management console's TLS certificate
    #[arg(long, default_value = "true", env = "PROXYCAT_VERIFY_TLS")]
    pub verify_tls: bool,

    /// Test URL submitted to the management console's URL checker
    #[arg(
        long,
        default_value = "http://www.google.com",
        env = "PROXYCAT_TEST_TARGET"
    )]
    pub test_target: String,

    /// Run a single action and exit instead of serving
    #[arg(long, env = "PROXYCAT_ACTION")]
    pub action: Option<String>,

    /// Target URL for the one-shot action
    #[arg(long, env = "PROXYCAT_URL")]
    pub url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Enable graceful shutdown
    #[arg(long, default_value = "true", env = "PROXYCAT_GRACEFUL_SHUTDOWN")]
    pub graceful_shutdown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: "0.0.0.0:8080".to_string(),
            data_path: PathBuf::from("data/list_data.json"),
            proxy_host: "127.0.0.1".to_string(),
            proxy_mgmt_port: 8082,
            username: "admin".to_string(),
            password: String::new(),
            verify_tls: true,
            test_target: "http://www.google.com".to_string(),
            action: None,
            url: None,
            log_level: "info".to_string(),
            graceful_shutdown: true,
        }
    }
}
