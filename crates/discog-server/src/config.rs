use std::net::{Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Default port of the catalog's web front end.
pub const DEFAULT_PORT: u16 = 5001;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
        }
    }
}
