use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::web::api::{create_router, AppState};

/// Configuration for the web server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_cors: bool,
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3005,
            enable_cors: true,
            max_sessions: 100,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `DISJOINT_PATHS_PORT`, `DISJOINT_PATHS_CORS`
    /// and `DISJOINT_PATHS_MAX_SESSIONS`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(port) = parse_var(&lookup, "DISJOINT_PATHS_PORT") {
            config.port = port;
        }
        if let Some(cors) = lookup("DISJOINT_PATHS_CORS") {
            match cors.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.enable_cors = true,
                "0" | "false" | "no" | "off" => config.enable_cors = false,
                other => log::warn!("ignoring DISJOINT_PATHS_CORS={}", other),
            }
        }
        if let Some(max) = parse_var(&lookup, "DISJOINT_PATHS_MAX_SESSIONS") {
            config.max_sessions = max;
        }
        config
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={}", key, raw);
            None
        }
    }
}

/// Builds the application router for a configuration
pub fn build_app(config: &ServerConfig) -> Router {
    let app = create_router().with_state(AppState::new(config.max_sessions));

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
        app.layer(ServiceBuilder::new().layer(cors).into_inner())
    } else {
        app
    }
}

/// Start the web server with custom configuration
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    log::info!("disjoint paths server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DISJOINT_PATHS_PORT", "8080"),
            ("DISJOINT_PATHS_CORS", "off"),
            ("DISJOINT_PATHS_MAX_SESSIONS", "nope"),
        ]);
        let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.port, 8080);
        assert!(!config.enable_cors);
        assert_eq!(config.max_sessions, ServerConfig::default().max_sessions);
    }
}
