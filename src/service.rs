use futures::future::join_all;
use log::info;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::Error;
use crate::listeners::{http, Listener, ListenerMessage};

/// A running responder service.
///
/// Returned by [`start`]; owns the listener tasks and the channel used to
/// stop them. Dropping the handle closes the shutdown channel, which also
/// stops the listeners, but [`Service::stop`] additionally waits for
/// in-flight connections to drain and sockets to be released.
pub struct Service {
    listeners: Vec<Listener>,
    shutdown: broadcast::Sender<ListenerMessage>,
    tasks: Vec<JoinHandle<()>>,
}

impl Service {
    /// The bound listeners, in configuration order.
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Stops every listener and waits for their tasks to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(ListenerMessage::Stop);
        join_all(self.tasks).await;
    }

    /// Parks until every listener task exits. Listener tasks only exit when
    /// stopped, so this effectively runs the service for the life of the
    /// process.
    pub async fn wait(self) {
        join_all(self.tasks).await;
    }
}

/// Binds every configured listener and spawns its accept loop.
///
/// Listeners are bound strictly in configuration order. Any bind failure
/// aborts the whole startup: sockets bound so far are released and the
/// offending config is reported in the error, so a partially started
/// service is never returned.
pub async fn start(config: Config) -> Result<Service, Error> {
    if config.listeners.is_empty() {
        return Err(Error::NoListeners);
    }

    let (shutdown, _) = broadcast::channel(100);

    let mut bound = Vec::with_capacity(config.listeners.len());
    for listener_config in &config.listeners {
        let tcp = TcpListener::bind(listener_config.bind_addr())
            .await
            .map_err(|source| Error::Bind {
                config: listener_config.clone(),
                source,
            })?;
        let local_addr = tcp.local_addr().map_err(|source| Error::Bind {
            config: listener_config.clone(),
            source,
        })?;

        info!("listening at http://{local_addr}");
        bound.push((Listener::new(listener_config.clone(), local_addr), tcp));
    }

    let mut listeners = Vec::with_capacity(bound.len());
    let mut tasks = Vec::with_capacity(bound.len());
    for (listener, tcp) in bound {
        let receiver = shutdown.subscribe();
        tasks.push(tokio::spawn(http::serve(tcp, listener.port(), receiver)));
        listeners.push(listener);
    }

    Ok(Service {
        listeners,
        shutdown,
        tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_configuration_is_rejected() {
        match start(Config::new(Vec::new())).await {
            Err(Error::NoListeners) => {}
            Ok(_) => panic!("service started with no listeners"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
