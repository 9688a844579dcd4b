use std::io::ErrorKind;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use tracing::{debug, warn};

use crate::config::ConnectConfig;
use crate::connection::Connection;
use crate::error::{Result, TransportError};
use crate::subsystem::{Subsystem, SubsystemGuard};

/// Connect to `host:port` with blocking defaults.
pub fn connect(host: &str, port: u16) -> Result<Connection> {
    connect_with_config(host, port, &ConnectConfig::default())
}

/// Connect to `host:port`, applying `config` to the established socket.
///
/// `host` may be a name or a literal address. Every resolved candidate is
/// tried once, in resolution order, and the first that connects wins.
pub fn connect_with_config(host: &str, port: u16, config: &ConnectConfig) -> Result<Connection> {
    let guard = Subsystem::global().acquire()?;
    let target = format!("{host}:{port}");

    let candidates = resolve(host, port).map_err(|source| {
        debug!(%target, error = %source, "address resolution failed");
        TransportError::ResolutionFailed {
            target: target.clone(),
            source,
        }
    })?;

    dial(target, &candidates, config, guard)
}

/// Connect to the first reachable address among `candidates`, in order.
pub fn connect_addrs(candidates: &[SocketAddr], config: &ConnectConfig) -> Result<Connection> {
    let guard = Subsystem::global().acquire()?;
    let target = candidates
        .iter()
        .map(SocketAddr::to_string)
        .collect::<Vec<_>>()
        .join(",");
    dial(target, candidates, config, guard)
}

fn resolve(host: &str, port: u16) -> std::io::Result<Vec<SocketAddr>> {
    let candidates: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    if candidates.is_empty() {
        return Err(std::io::Error::new(
            ErrorKind::NotFound,
            "name resolved to no addresses",
        ));
    }
    Ok(candidates)
}

// On failure the guard is dropped here, so a failed connect holds no
// subsystem reference.
fn dial(
    target: String,
    candidates: &[SocketAddr],
    config: &ConnectConfig,
    guard: SubsystemGuard,
) -> Result<Connection> {
    let mut attempts = Vec::with_capacity(candidates.len());

    for (index, addr) in candidates.iter().enumerate() {
        match try_candidate(addr, config) {
            Ok(stream) => {
                debug!(%target, %addr, attempt = index + 1, "connected");
                return Ok(Connection::established(stream, Some(*addr), guard));
            }
            Err(err) => {
                if index + 1 < candidates.len() {
                    debug!(%target, %addr, error = %err, "candidate failed; trying next address");
                } else {
                    debug!(%target, %addr, error = %err, "candidate failed; no addresses left");
                }
                attempts.push((*addr, err));
            }
        }
    }

    warn!(%target, attempts = attempts.len(), "unable to connect");
    Err(TransportError::AllCandidatesFailed { target, attempts })
}

// A stream that fails configuration is dropped, closing its socket.
fn try_candidate(addr: &SocketAddr, config: &ConnectConfig) -> std::io::Result<TcpStream> {
    let stream = match config.connect_timeout {
        Some(timeout) => TcpStream::connect_timeout(addr, timeout)?,
        None => TcpStream::connect(addr)?,
    };
    stream.set_read_timeout(config.read_timeout)?;
    stream.set_write_timeout(config.write_timeout)?;
    if config.nodelay {
        stream.set_nodelay(true)?;
    }
    Ok(stream)
}
