use bytes::BytesMut;

use crate::error::{CodecError, Result};
use crate::order;
use crate::value::{WireValue, MAX_STRING_LEN, STRING_PREFIX_SIZE};

/// A fixed-capacity byte region for staging an outbound message.
///
/// Every write is offset-addressed and bounds-checked. A write that would
/// run past the end is rejected before any byte is touched, so a failed
/// write never leaves a partially encoded value behind.
///
/// Contents are unspecified until written. The current implementation
/// zero-fills on allocation, but callers must not depend on that.
#[derive(Clone, PartialEq, Eq)]
pub struct WireBuffer {
    data: BytesMut,
}

impl WireBuffer {
    /// Allocate a buffer of exactly `length` bytes.
    pub fn allocate(length: usize) -> Self {
        Self {
            data: BytesMut::zeroed(length),
        }
    }

    /// Allocate a buffer sized for `values` and write them back to back.
    pub fn encode(values: &[WireValue]) -> Result<Self> {
        let total = values.iter().map(WireValue::encoded_len).sum();
        let mut buffer = Self::allocate(total);
        let mut offset = 0;
        for value in values {
            offset += buffer.write_value(offset, value)?;
        }
        Ok(buffer)
    }

    /// Release the buffer. Equivalent to dropping it.
    pub fn deallocate(self) {
        drop(self);
    }

    /// Capacity fixed at allocation time.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The whole buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The whole buffer, mutably.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The first `length` bytes.
    pub fn prefix(&self, length: usize) -> Result<&[u8]> {
        self.check(0, length)?;
        Ok(&self.data[..length])
    }

    /// Write a single byte at `offset`.
    pub fn write_byte(&mut self, offset: usize, value: u8) -> Result<usize> {
        self.put(offset, &[value])
    }

    /// Write a `u16` at `offset` in network byte order.
    pub fn write_uint16(&mut self, offset: usize, value: u16) -> Result<usize> {
        self.put(offset, &order::to_wire_u16(value))
    }

    /// Write an `i32` at `offset` in network byte order.
    pub fn write_int32(&mut self, offset: usize, value: i32) -> Result<usize> {
        self.put(offset, &order::to_wire_i32(value))
    }

    /// Write an `i64` at `offset` in network byte order.
    pub fn write_int64(&mut self, offset: usize, value: i64) -> Result<usize> {
        self.put(offset, &order::to_wire_i64(value))
    }

    /// Write the bit pattern of an `f64` at `offset` in network byte order.
    pub fn write_double(&mut self, offset: usize, value: f64) -> Result<usize> {
        self.put(offset, &order::to_wire_f64(value))
    }

    /// Write a length-prefixed UTF-8 string at `offset`.
    ///
    /// The big-endian byte count goes at `offset`, the bytes at `offset + 2`.
    /// Needs `2 + value.len()` bytes of room. Returns the bytes written.
    pub fn write_string(&mut self, offset: usize, value: &str) -> Result<usize> {
        let encoded = value.as_bytes();
        if encoded.len() > MAX_STRING_LEN {
            return Err(CodecError::StringTooLong { len: encoded.len() });
        }
        let width = STRING_PREFIX_SIZE + encoded.len();
        self.check(offset, width)?;

        let body = offset + STRING_PREFIX_SIZE;
        self.data[offset..body].copy_from_slice(&order::to_wire_u16(encoded.len() as u16));
        self.data[body..offset + width].copy_from_slice(encoded);
        Ok(width)
    }

    /// Write any [`WireValue`] at `offset`. Returns the bytes written.
    pub fn write_value(&mut self, offset: usize, value: &WireValue) -> Result<usize> {
        match value {
            WireValue::Byte(v) => self.write_byte(offset, *v),
            WireValue::UInt16(v) => self.write_uint16(offset, *v),
            WireValue::Int32(v) => self.write_int32(offset, *v),
            WireValue::Int64(v) => self.write_int64(offset, *v),
            WireValue::Double(v) => self.write_double(offset, *v),
            WireValue::String(v) => self.write_string(offset, v),
        }
    }

    fn put(&mut self, offset: usize, bytes: &[u8]) -> Result<usize> {
        self.check(offset, bytes.len())?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    fn check(&self, offset: usize, width: usize) -> Result<()> {
        let capacity = self.capacity();
        match offset.checked_add(width) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(CodecError::OutOfBounds {
                offset,
                width,
                capacity,
            }),
        }
    }
}

impl AsRef<[u8]> for WireBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for WireBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireBuffer")
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_has_exact_capacity() {
        let buffer = WireBuffer::allocate(13);
        assert_eq!(buffer.capacity(), 13);
        assert_eq!(buffer.as_bytes().len(), 13);
        assert_eq!(WireBuffer::allocate(0).capacity(), 0);
    }

    #[test]
    fn int32_minus_one_is_all_ones() {
        let mut buffer = WireBuffer::allocate(4);
        assert_eq!(buffer.write_int32(0, -1).unwrap(), 4);
        assert_eq!(buffer.as_bytes(), &[0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn uint16_one() {
        let mut buffer = WireBuffer::allocate(2);
        buffer.write_uint16(0, 1).unwrap();
        assert_eq!(buffer.as_bytes(), &[0x00, 0x01]);
    }

    #[test]
    fn string_ok_layout() {
        let mut buffer = WireBuffer::allocate(4);
        assert_eq!(buffer.write_string(0, "ok").unwrap(), 4);
        assert_eq!(buffer.as_bytes(), &[0x00, 0x02, 0x6F, 0x6B]);
    }

    #[test]
    fn string_writes_exactly_prefix_plus_bytes() {
        let text = "grüße";
        let len = text.len();
        let mut buffer = WireBuffer::allocate(len + 4);
        buffer.as_mut_bytes().fill(0xAA);

        let written = buffer.write_string(1, text).unwrap();
        assert_eq!(written, 2 + len);

        let bytes = buffer.as_bytes();
        assert_eq!(bytes[0], 0xAA);
        assert_eq!(&bytes[1..3], &(len as u16).to_be_bytes());
        assert_eq!(&bytes[3..3 + len], text.as_bytes());
        assert_eq!(bytes[3 + len], 0xAA, "no terminator may be written");
    }

    #[test]
    fn empty_string_is_just_a_prefix() {
        let mut buffer = WireBuffer::allocate(2);
        assert_eq!(buffer.write_string(0, "").unwrap(), 2);
        assert_eq!(buffer.as_bytes(), &[0x00, 0x00]);
    }

    #[test]
    fn max_length_string_fits_prefix() {
        let text = "x".repeat(MAX_STRING_LEN);
        let mut buffer = WireBuffer::allocate(MAX_STRING_LEN + 2);
        buffer.write_string(0, &text).unwrap();
        assert_eq!(&buffer.as_bytes()[..2], &[0xFF, 0xFF]);
    }

    #[test]
    fn oversized_string_rejected() {
        let text = "x".repeat(MAX_STRING_LEN + 1);
        let mut buffer = WireBuffer::allocate(MAX_STRING_LEN + 3);
        let err = buffer.write_string(0, &text).unwrap_err();
        assert!(matches!(err, CodecError::StringTooLong { len } if len == MAX_STRING_LEN + 1));
    }

    #[test]
    fn out_of_bounds_writes_rejected_and_leave_buffer_untouched() {
        let mut buffer = WireBuffer::allocate(6);
        buffer.as_mut_bytes().fill(0x11);

        assert!(matches!(
            buffer.write_int32(3, 7),
            Err(CodecError::OutOfBounds {
                offset: 3,
                width: 4,
                capacity: 6
            })
        ));
        assert!(buffer.write_int64(0, 7).is_err());
        assert!(buffer.write_double(0, 1.0).is_err());
        assert!(buffer.write_byte(6, 1).is_err());
        assert!(buffer.write_uint16(usize::MAX, 1).is_err());
        assert!(buffer.write_string(3, "abc").is_err());

        assert_eq!(buffer.as_bytes(), &[0x11; 6]);
    }

    #[test]
    fn write_at_exact_end_is_accepted() {
        let mut buffer = WireBuffer::allocate(6);
        buffer.write_int32(2, 0x0102_0304).unwrap();
        assert_eq!(&buffer.as_bytes()[2..], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn double_encoded_through_int64_path() {
        let mut buffer = WireBuffer::allocate(8);
        buffer.write_double(0, 1.0).unwrap();
        assert_eq!(buffer.as_bytes(), &0x3FF0_0000_0000_0000u64.to_be_bytes());
    }

    #[test]
    fn encode_packs_values_back_to_back() {
        let buffer = WireBuffer::encode(&[
            WireValue::Byte(0x7F),
            WireValue::UInt16(1),
            WireValue::String("ok".into()),
            WireValue::Int32(-1),
        ])
        .unwrap();

        assert_eq!(
            buffer.as_bytes(),
            &[0x7F, 0x00, 0x01, 0x00, 0x02, 0x6F, 0x6B, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn prefix_is_bounds_checked() {
        let buffer = WireBuffer::allocate(4);
        assert_eq!(buffer.prefix(3).unwrap().len(), 3);
        assert!(matches!(
            buffer.prefix(5),
            Err(CodecError::OutOfBounds { .. })
        ));
    }
}
