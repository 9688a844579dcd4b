use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};

/// A connected byte stream a [`Connection`](crate::Connection) can own.
///
/// Implemented for [`TcpStream`]. Any other blocking `Read + Write` type can
/// implement it to run the same full-transfer logic, which is how callers
/// hand in a socket they configured themselves.
pub trait WireStream: Read + Write {
    /// Shut the stream down in both directions.
    ///
    /// The descriptor itself is released when the stream is dropped.
    fn close(&mut self) -> std::io::Result<()>;
}

impl WireStream for TcpStream {
    fn close(&mut self) -> std::io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(err) if err.kind() == ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

#[cfg(unix)]
impl WireStream for std::os::unix::net::UnixStream {
    fn close(&mut self) -> std::io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(err) if err.kind() == ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

impl<S: WireStream + ?Sized> WireStream for Box<S> {
    fn close(&mut self) -> std::io::Result<()> {
        (**self).close()
    }
}
