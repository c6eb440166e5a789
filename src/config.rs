use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Port used when neither the command line nor `PORT` names one.
pub const DEFAULT_PORT: u16 = 9999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

/// Runtime configuration. The listening port is the only setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
}

impl Config {
    /// Read the port from the first CLI argument, else `PORT`, else [`DEFAULT_PORT`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_args_and_env(std::env::args().nth(1), std::env::var("PORT").ok())
    }

    pub fn from_args_and_env(
        arg: Option<String>,
        env_port: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match arg.or(env_port) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { port })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}
