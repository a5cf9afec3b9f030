//! Network reachability probing.
//!
//! The probe is a heuristic used only to decide which mirror to try first.
//! It never fails: DNS errors, refused connections and timeouts all read as
//! "unreachable".

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Trait for reachability checks - allows faking the network in tests
pub trait NetworkProbe {
    fn is_reachable(&self, host: &str, port: u16) -> bool;
}

/// Probe that opens a real TCP connection.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    pub timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(crate::defaults::PROBE_TIMEOUT)
    }
}

impl NetworkProbe for TcpProbe {
    fn is_reachable(&self, host: &str, port: u16) -> bool {
        check_host_access(host, port, self.timeout)
    }
}

/// Try to open a TCP connection to `host:port` within `timeout`.
///
/// Every resolved address is tried in turn; the first successful connection
/// wins.
pub fn check_host_access(host: &str, port: u16, timeout: Duration) -> bool {
    let addrs = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            log::debug!("failed to resolve {}:{}: {}", host, port, e);
            return false;
        }
    };

    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(_) => {
                log::debug!("{}:{} reachable via {}", host, port, addr);
                return true;
            }
            Err(e) => log::debug!("connect to {} failed: {}", addr, e),
        }
    }

    false
}
