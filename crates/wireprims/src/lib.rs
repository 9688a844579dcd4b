//! Blocking TCP client for a big-endian typed-value wire protocol.
//!
//! wireprims connects to one remote endpoint and moves fixed-width integers,
//! doubles, and length-prefixed UTF-8 strings in network byte order, with
//! full-transfer reads and writes and deterministic cleanup.
//!
//! # Crate Structure
//!
//! - [`codec`]: Byte order conversion, `WireBuffer`, `WireValue`
//! - [`transport`]: `connect`, `Connection`, typed reads and buffer sends
//!
//! ```no_run
//! use wireprims::codec::WireBuffer;
//! use wireprims::transport::connect;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = connect("127.0.0.1", 7000)?;
//!
//! let mut request = WireBuffer::allocate(6);
//! request.write_uint16(0, 1)?;
//! request.write_int32(2, -1)?;
//! conn.send_buffer(&request, request.capacity())?;
//!
//! let price = conn.read_double()?;
//! println!("price: {price}");
//! conn.disconnect()?;
//! # Ok(())
//! # }
//! ```

/// Re-export codec types.
pub mod codec {
    pub use wireprims_codec::*;
}

/// Re-export transport types.
pub mod transport {
    pub use wireprims_transport::*;
}

pub use wireprims_codec::{WireBuffer, WireKind, WireValue};
pub use wireprims_transport::{connect, connect_with_config, ConnectConfig, Connection};
