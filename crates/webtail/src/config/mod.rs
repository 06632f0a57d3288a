use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Log output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Configuration derived from CLI arguments
///
/// Built once at startup and shared read-only with every request handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub address: IpAddr,
    pub port: u16,
    /// When set, every poll tails this file and the `filename` parameter is ignored
    pub fixed_file: Option<PathBuf>,
    /// Line cap applied to a first poll (offset 0) that names no limit
    pub default_limit: usize,
    pub log_format: LogFormat,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}
