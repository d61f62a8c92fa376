use std::io;

use thiserror::Error;

use crate::config::ListenerConfig;

/// Errors that abort service startup.
///
/// Transport-level failures on individual connections are not represented
/// here; they stay local to the connection that hit them.
#[derive(Debug, Error)]
pub enum Error {
    /// A listener could not be bound to its configured endpoint.
    #[error("failed to bind {}:{}: {}", .config.host, .config.port, .source)]
    Bind {
        config: ListenerConfig,
        #[source]
        source: io::Error,
    },

    /// The configuration names no listeners to start.
    #[error("no listeners configured")]
    NoListeners,
}
