//! Network byte order conversion and bounds-checked wire buffers.
//!
//! This is the pure layer of wireprims. Nothing here touches a socket:
//! - [`order`] converts 16/32/64-bit integers and `f64` bit patterns between
//!   host and big-endian layout
//! - [`WireBuffer`] stages an outbound message with offset-addressed writes
//! - [`WireValue`] names the values the protocol can carry
//!
//! Strings travel as a big-endian `u16` byte count followed by that many
//! UTF-8 bytes, with no terminator.

pub mod buffer;
pub mod error;
pub mod order;
pub mod value;

pub use buffer::WireBuffer;
pub use error::{CodecError, Result};
pub use value::{WireKind, WireValue, MAX_STRING_LEN, STRING_PREFIX_SIZE};
