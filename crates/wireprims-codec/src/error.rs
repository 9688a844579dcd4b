/// Errors that can occur while encoding or decoding wire values.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A write of `width` bytes at `offset` does not fit the buffer.
    #[error("write of {width} bytes at offset {offset} exceeds buffer capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        capacity: usize,
    },

    /// The UTF-8 encoding of a string does not fit the 16-bit length prefix.
    #[error("string too long for u16 length prefix ({len} bytes, max 65535)")]
    StringTooLong { len: usize },

    /// Received string bytes are not valid UTF-8.
    #[error("string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
