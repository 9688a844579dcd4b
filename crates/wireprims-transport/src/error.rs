use std::net::SocketAddr;

use wireprims_codec::CodecError;

/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Name lookup failed or produced no addresses.
    #[error("failed to resolve {target}: {source}")]
    ResolutionFailed {
        target: String,
        source: std::io::Error,
    },

    /// Every resolved candidate address refused or errored.
    #[error("failed to connect to {target}: all {} candidate addresses failed", .attempts.len())]
    AllCandidatesFailed {
        target: String,
        attempts: Vec<(SocketAddr, std::io::Error)>,
    },

    /// The network subsystem could not be acquired.
    #[error("network subsystem unavailable: {0}")]
    SubsystemUnavailable(String),

    /// The underlying read reported an error. The connection is closed.
    #[error("read failed: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// The peer closed the connection before the requested bytes arrived.
    #[error("connection closed by peer after {received} of {expected} bytes")]
    ConnectionClosed { expected: usize, received: usize },

    /// The underlying write reported an error. The connection is closed.
    #[error("write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// The connection was already disconnected by an earlier failure.
    #[error("connection is disconnected")]
    Disconnected,

    /// An I/O error outside a read or write transfer (shutdown, socket setup).
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding a wire value failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl TransportError {
    /// Whether this error left the connection Disconnected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransportError::ReadFailed(_)
                | TransportError::ConnectionClosed { .. }
                | TransportError::WriteFailed(_)
                | TransportError::Disconnected
        )
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
