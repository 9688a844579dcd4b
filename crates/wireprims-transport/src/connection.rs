use std::io::ErrorKind;
use std::net::{SocketAddr, TcpStream};

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};
use wireprims_codec::{order, WireBuffer, WireKind, WireValue};

use crate::error::{Result, TransportError};
use crate::stream::WireStream;
use crate::subsystem::{Subsystem, SubsystemGuard};

/// Whether a [`Connection`] still owns a live socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// An owning handle over one established stream.
///
/// Reads and writes are full-transfer: they move exactly the requested byte
/// count or fail. Any `ReadFailed`, `ConnectionClosed` or `WriteFailed`
/// closes the stream and moves the handle to
/// [`ConnectionState::Disconnected`]; from then on every operation returns
/// [`TransportError::Disconnected`] without touching the network.
///
/// Operations take `&mut self`, so one handle is used by one thread at a
/// time. Share it behind a `Mutex` if several workers need it.
pub struct Connection<S: WireStream = TcpStream> {
    stream: Option<S>,
    peer: Option<SocketAddr>,
    _guard: Option<SubsystemGuard>,
}

impl<S: WireStream> Connection<S> {
    /// Wrap an already-connected, caller-configured stream.
    ///
    /// Takes a reference on the global network subsystem for the lifetime
    /// of the handle.
    pub fn from_stream(stream: S) -> Result<Self> {
        let guard = Subsystem::global().acquire()?;
        Ok(Self::established(stream, None, guard))
    }

    pub(crate) fn established(stream: S, peer: Option<SocketAddr>, guard: SubsystemGuard) -> Self {
        Self {
            stream: Some(stream),
            peer,
            _guard: Some(guard),
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        if self.stream.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Whether the handle still owns a live stream.
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// The candidate address this connection was established to, if known.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Borrow the underlying stream while connected.
    pub fn get_ref(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Read exactly `n` bytes.
    pub fn receive_exact(&mut self, n: usize) -> Result<Bytes> {
        let mut buf = BytesMut::zeroed(n);
        self.receive_exact_into(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Fill `buf` completely from the stream.
    ///
    /// A peer close before `buf` is full is `ConnectionClosed`, never a
    /// short or padded result.
    pub fn receive_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(TransportError::Disconnected)?;
        let result = fill(stream, buf);
        match &result {
            Ok(()) => trace!(bytes = buf.len(), "received"),
            Err(err) => {
                debug!(error = %err, "receive failed; closing connection");
                self.teardown();
            }
        }
        result
    }

    /// Write every byte of `bytes`, looping over partial writes.
    pub fn send_exact(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(TransportError::Disconnected)?;
        let result = drain(stream, bytes);
        match &result {
            Ok(()) => trace!(bytes = bytes.len(), "sent"),
            Err(err) => {
                debug!(error = %err, "send failed; closing connection");
                self.teardown();
            }
        }
        result
    }

    /// Send the first `length` bytes of `buffer`.
    ///
    /// A `length` beyond the buffer's capacity is rejected before any I/O
    /// and leaves the connection usable.
    pub fn send_buffer(&mut self, buffer: &WireBuffer, length: usize) -> Result<()> {
        if !self.is_connected() {
            return Err(TransportError::Disconnected);
        }
        let bytes = buffer.prefix(length)?;
        self.send_exact(bytes)
    }

    /// Encode `values` into one buffer and send it in a single transfer.
    pub fn send_values(&mut self, values: &[WireValue]) -> Result<()> {
        if !self.is_connected() {
            return Err(TransportError::Disconnected);
        }
        let buffer = WireBuffer::encode(values)?;
        self.send_buffer(&buffer, buffer.capacity())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Read a network-order `u16`.
    pub fn read_uint16(&mut self) -> Result<u16> {
        Ok(order::from_wire_u16(self.read_array()?))
    }

    /// Read a network-order `i32`.
    pub fn read_int32(&mut self) -> Result<i32> {
        Ok(order::from_wire_i32(self.read_array()?))
    }

    /// Read a network-order `i64`.
    pub fn read_int64(&mut self) -> Result<i64> {
        Ok(order::from_wire_i64(self.read_array()?))
    }

    /// Read an `f64` whose bit pattern was sent as a network-order `i64`.
    pub fn read_double(&mut self) -> Result<f64> {
        let bits = self.read_int64()?;
        Ok(f64::from_bits(bits as u64))
    }

    /// Read a `u16`-length-prefixed UTF-8 string.
    ///
    /// Invalid UTF-8 is a codec error. The bytes were fully consumed, so the
    /// connection stays in sync and usable.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_uint16()? as usize;
        let bytes = self.receive_exact(len)?;
        let text = std::str::from_utf8(&bytes).map_err(wireprims_codec::CodecError::from)?;
        Ok(text.to_owned())
    }

    /// Read one value of the given kind.
    pub fn read_value(&mut self, kind: WireKind) -> Result<WireValue> {
        Ok(match kind {
            WireKind::Byte => WireValue::Byte(self.read_byte()?),
            WireKind::UInt16 => WireValue::UInt16(self.read_uint16()?),
            WireKind::Int32 => WireValue::Int32(self.read_int32()?),
            WireKind::Int64 => WireValue::Int64(self.read_int64()?),
            WireKind::Double => WireValue::Double(self.read_double()?),
            WireKind::String => WireValue::String(self.read_string()?),
        })
    }

    /// Close the connection and release its subsystem reference.
    ///
    /// Consumes the handle. Disconnecting a handle that already failed is a
    /// no-op success.
    pub fn disconnect(mut self) -> Result<()> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        let result = stream.close();
        drop(stream);
        debug!(peer = ?self.peer, "disconnected");
        result.map_err(TransportError::Io)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.receive_exact_into(&mut bytes)?;
        Ok(bytes)
    }

    fn teardown(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.close();
        }
        self._guard = None;
    }
}

fn fill<S: WireStream>(stream: &mut S, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(TransportError::ConnectionClosed {
                    expected: buf.len(),
                    received: filled,
                })
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TransportError::ReadFailed(err)),
        }
    }
    Ok(())
}

fn drain<S: WireStream>(stream: &mut S, bytes: &[u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < bytes.len() {
        match stream.write(&bytes[offset..]) {
            Ok(0) => {
                return Err(TransportError::WriteFailed(std::io::Error::from(
                    ErrorKind::WriteZero,
                )))
            }
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TransportError::WriteFailed(err)),
        }
    }

    loop {
        match stream.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TransportError::WriteFailed(err)),
        }
    }
}

impl<S: WireStream> Drop for Connection<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: WireStream> std::fmt::Debug for Connection<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.state())
            .field("peer", &self.peer)
            .finish()
    }
}
