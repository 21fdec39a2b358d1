use std::process::ExitCode;

use clap::Parser;
use flexi_logger::{Duplicate, Logger};
use irc_server::config::Config;
use irc_server::connection::handle_connection;
use irc_server::hub::{self, Hub};
use log::{error, info};
use tokio::net::TcpListener;

/// A minimal RFC 1459/2812 IRC server.
#[derive(Parser, Debug)]
#[command(name = "irc_server")]
struct Cli {
    /// Listen port, overriding the configured network settings.
    port: Option<u16>,

    /// Server password clients must PASS before registering.
    password: Option<String>,

    /// Run entirely from a TOML configuration file.
    #[arg(long)]
    config: Option<String>,
}

struct Settings {
    bind_address: String,
    port: u16,
    password: String,
}

fn resolve_settings(cli: &Cli) -> Result<Settings, String> {
    let file_config = match &cli.config {
        Some(path) => Some(Config::load(path).map_err(|e| format!("failed to load config: {e}"))?),
        None => None,
    };

    let bind_address = file_config
        .as_ref()
        .map(|c| c.network.bind_address.clone())
        .unwrap_or_else(|| "127.0.0.1".to_string());

    let port = cli
        .port
        .or_else(|| file_config.as_ref().map(|c| c.network.port))
        .ok_or_else(|| "port required: pass <port> or --config".to_string())?;
    if port == 0 {
        return Err("port must be between 1 and 65535".to_string());
    }

    let password = cli
        .password
        .clone()
        .ok_or_else(|| "password required: pass <password>".to_string())?;
    if password.is_empty() {
        return Err("password must be non-empty".to_string());
    }

    Ok(Settings { bind_address, port, password })
}

#[tokio::main]
async fn main() -> ExitCode {
    Logger::try_with_str("info")
        .and_then(|logger| logger.log_to_stderr().duplicate_to_stderr(Duplicate::All).start())
        .ok();

    let cli = Cli::parse();
    let settings = match resolve_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind((settings.bind_address.as_str(), settings.port)).await {
        Ok(l) => l,
        Err(e) => {
            error!("failed to bind {}:{}: {e}", settings.bind_address, settings.port);
            return ExitCode::FAILURE;
        }
    };
    info!("listening on {}:{}", settings.bind_address, settings.port);

    let (to_hub, inbound) = hub::channel(256);
    tokio::spawn(Hub::new(settings.password, inbound).run());

    let mut next_id: u64 = 1;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received, closing listener");
                break;
            }
            accepted = listener.accept() => {
                let (socket, addr) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };
                let cid = next_id;
                next_id += 1;
                info!("accepted connection {cid} from {addr}");
                let to_hub = to_hub.clone();
                tokio::spawn(async move {
                    handle_connection(socket, cid, to_hub).await;
                });
            }
        }
    }
    ExitCode::SUCCESS
}
