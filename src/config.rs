/// Address every listener binds to unless overridden on the command line.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Ports served by the default deployment, one listener each.
pub const DEFAULT_PORTS: [u16; 2] = [3000, 4000];

/// Endpoint a single listener binds to.
///
/// Port 0 asks the OS for an ephemeral port; the address actually bound is
/// reported on the [`crate::listeners::Listener`] produced by startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
}

impl ListenerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port` form accepted by `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Ordered set of listeners the service starts.
#[derive(Clone, Debug)]
pub struct Config {
    pub listeners: Vec<ListenerConfig>,
}

impl Config {
    pub fn new(listeners: Vec<ListenerConfig>) -> Self {
        Self { listeners }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_PORTS
                .iter()
                .map(|&port| ListenerConfig::new(DEFAULT_HOST, port))
                .collect(),
        )
    }
}
