use std::fmt;
use std::io;

use wireprims_codec::CodecError;
use wireprims_transport::TransportError;

// Exit codes shared by every subcommand.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

fn io_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        _ => TRANSPORT_ERROR,
    }
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    let code = match &err {
        TransportError::ReadFailed(source)
        | TransportError::WriteFailed(source)
        | TransportError::Io(source) => io_code(source),
        TransportError::AllCandidatesFailed { attempts, .. } => {
            if !attempts.is_empty() && attempts.iter().all(|(_, e)| io_code(e) == TIMEOUT) {
                TIMEOUT
            } else {
                TRANSPORT_ERROR
            }
        }
        TransportError::ResolutionFailed { .. } | TransportError::SubsystemUnavailable(_) => {
            TRANSPORT_ERROR
        }
        TransportError::ConnectionClosed { .. } => FAILURE,
        TransportError::Codec(_) => DATA_INVALID,
        TransportError::Disconnected => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}
