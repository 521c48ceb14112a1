use std::env;
use std::net::SocketAddr;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::security_headers;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

pub struct Config {
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Self {
        let raw = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw.parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid BIND_ADDR '{}': {}, falling back to default", raw, e);
            DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address must parse")
        });

        Self { bind_addr }
    }
}
