use disjoint_paths::web::{start_server, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let mut config = ServerConfig::from_env();

    // A port on the command line wins over the environment
    if let Some(arg) = env::args().nth(1) {
        match arg.parse() {
            Ok(port) => config.port = port,
            Err(_) => log::warn!("ignoring invalid port argument {}", arg),
        }
    }

    log::info!(
        "starting server: port {}, cors {}, max sessions {}",
        config.port,
        config.enable_cors,
        config.max_sessions
    );

    start_server(config).await?;

    Ok(())
}
