use std::net::SocketAddr;

use colored::Colorize;

use crate::config::ListenerConfig;

pub mod http;

/// Control messages delivered to running listener tasks.
#[derive(Clone, Debug)]
pub enum ListenerMessage {
    Stop,
}

/// A listener that has been bound to its endpoint.
#[derive(Clone, Debug)]
pub struct Listener {
    pub config: ListenerConfig,
    /// Address reported by the OS. Differs from the config when an
    /// ephemeral port (0) was requested.
    pub local_addr: SocketAddr,
}

impl Listener {
    pub fn new(config: ListenerConfig, local_addr: SocketAddr) -> Self {
        Self { config, local_addr }
    }

    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }
}

pub fn format_listeners(listeners: &[Listener]) -> String {
    if listeners.is_empty() {
        return String::from("No listeners configured.");
    }

    let mut output = format!("{:>5} | {:<32} | {:<10}\n", "ID", "URL", "STATUS");
    output = output + "-----------------------------------------------------\n";

    for (id, listener) in listeners.iter().enumerate() {
        output = output
            + format!(
                "{:>5} | {:<32} | {:<10}\n",
                id.to_string(),
                format!("http://{}/", listener.local_addr),
                "active".to_string().green().bold(),
            )
            .as_str();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_listener_reports_the_os_port() {
        let config = ListenerConfig::new("127.0.0.1", 0);
        let listener = Listener::new(config, "127.0.0.1:49152".parse().unwrap());

        assert_eq!(listener.port(), 49152);
    }

    #[test]
    fn listener_table_names_every_endpoint() {
        let listeners = vec![
            Listener::new(
                ListenerConfig::new("0.0.0.0", 3000),
                "0.0.0.0:3000".parse().unwrap(),
            ),
            Listener::new(
                ListenerConfig::new("0.0.0.0", 4000),
                "0.0.0.0:4000".parse().unwrap(),
            ),
        ];

        let table = format_listeners(&listeners);

        assert!(table.contains("http://0.0.0.0:3000/"));
        assert!(table.contains("http://0.0.0.0:4000/"));
    }
}
