use std::time::Duration;

use alloy_primitives::Address;
use url::Url;

/// Default RPC endpoint (Somnia Shannon Testnet).
pub const DEFAULT_RPC_URL: &str = "https://dream-rpc.somnia.network";

/// Default backend endpoint for the fallback snapshot.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Default bound on the on-chain bulk read and the fallback fetch.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration.
///
/// Built once at application start and passed to whichever component needs it;
/// there is no process-wide singleton.
#[derive(Debug, Clone)]
pub struct Config {
    /// RPC endpoint for on-chain reads.
    pub rpc_url: Url,
    /// Rewards contract address. `None` disables event subscriptions entirely.
    pub rewards_contract: Option<Address>,
    /// Backend endpoint serving the fallback leaderboard snapshot.
    pub backend_url: Url,
    /// Bound applied to the on-chain bulk read and the fallback fetch.
    pub request_timeout: Duration,
}

impl Config {
    /// Create a configuration with default endpoints.
    pub fn new(rewards_contract: Option<Address>) -> Self {
        Self {
            rpc_url: Url::parse(DEFAULT_RPC_URL).expect("valid default url"),
            rewards_contract,
            backend_url: Url::parse(DEFAULT_BACKEND_URL).expect("valid default url"),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Create a configuration from the environment.
    ///
    /// Reads `STREAMBEAT_RPC_URL`, `STREAMBEAT_REWARDS_CONTRACT` and
    /// `STREAMBEAT_BACKEND_URL`, falling back to the defaults. An unset
    /// rewards contract is not an error: it disables subscriptions.
    pub fn from_env() -> crate::Result<Self> {
        let rpc_url = std::env::var("STREAMBEAT_RPC_URL")
            .unwrap_or_else(|_| DEFAULT_RPC_URL.to_string())
            .parse()?;
        let backend_url = std::env::var("STREAMBEAT_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
            .parse()?;
        let rewards_contract = match std::env::var("STREAMBEAT_REWARDS_CONTRACT") {
            Ok(address) => Some(address.parse::<Address>()?),
            Err(_) => None,
        };
        Ok(Self {
            rpc_url,
            rewards_contract,
            backend_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Set the rewards contract address.
    pub fn rewards_contract(mut self, address: Address) -> Self {
        self.rewards_contract = Some(address);
        self
    }

    /// Set the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
