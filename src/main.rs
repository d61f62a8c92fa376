//! Binary entry point: parses the listener set from the command line and
//! runs the responder service until interrupted.
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use herald::banner::banner;
use herald::config::{Config, ListenerConfig, DEFAULT_HOST, DEFAULT_PORTS};
use herald::listeners::format_listeners;
use herald::service;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address every listener binds to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Ports to serve on, one listener per port
    #[arg(short = 'P', long = "port", default_values_t = DEFAULT_PORTS)]
    ports: Vec<u16>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    banner();

    let config = Config::new(
        cli.ports
            .iter()
            .map(|&port| ListenerConfig::new(cli.host.clone(), port))
            .collect(),
    );

    let service = match service::start(config).await {
        Ok(service) => service,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    println!("{}", format_listeners(service.listeners()));

    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("shutdown signal received, stopping listeners...");
            service.stop().await;
        }
        Err(err) => {
            error!("unable to listen for shutdown signal: {err}");
            service.wait().await;
        }
    }
}
