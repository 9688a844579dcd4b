//! Host ↔ network (big-endian) byte order conversion.
//!
//! Every conversion here is a pure relocation of bytes over the value's
//! width: a byte reversal on little-endian hosts, the identity on big-endian
//! hosts. Applying a conversion twice returns the original layout, so the
//! `ntoh_*` functions are the same transformation as their `hton_*`
//! counterparts.
//!
//! `f64` values never go through numeric conversion. Their IEEE-754 bit
//! pattern is reinterpreted as a 64-bit integer, reordered, and reinterpreted
//! back, so NaN payloads and signed zeros survive unchanged.

/// Convert a `u16` from host to network byte order.
pub const fn hton_u16(value: u16) -> u16 {
    value.to_be()
}

/// Convert a `u16` from network to host byte order.
pub const fn ntoh_u16(value: u16) -> u16 {
    u16::from_be(value)
}

/// Convert an `i32` from host to network byte order.
pub const fn hton_i32(value: i32) -> i32 {
    value.to_be()
}

/// Convert an `i32` from network to host byte order.
pub const fn ntoh_i32(value: i32) -> i32 {
    i32::from_be(value)
}

/// Convert an `i64` from host to network byte order.
pub const fn hton_i64(value: i64) -> i64 {
    value.to_be()
}

/// Convert an `i64` from network to host byte order.
pub const fn ntoh_i64(value: i64) -> i64 {
    i64::from_be(value)
}

/// Convert a `u64` from host to network byte order.
pub const fn hton_u64(value: u64) -> u64 {
    value.to_be()
}

/// Convert a `u64` from network to host byte order.
pub const fn ntoh_u64(value: u64) -> u64 {
    u64::from_be(value)
}

/// Convert the bit pattern of an `f64` from host to network byte order.
///
/// The result is generally not a meaningful number on the host; it is only
/// a carrier for the reordered bits.
pub fn hton_f64(value: f64) -> f64 {
    f64::from_bits(hton_u64(value.to_bits()))
}

/// Convert the bit pattern of an `f64` from network to host byte order.
pub fn ntoh_f64(value: f64) -> f64 {
    f64::from_bits(ntoh_u64(value.to_bits()))
}

/// Reorder a host-native byte view of a fixed-width value into network
/// order, in place. The same call converts back.
pub fn reorder_in_place(bytes: &mut [u8]) {
    if cfg!(target_endian = "little") {
        bytes.reverse();
    }
}

/// Wire bytes of a `u16`.
pub const fn to_wire_u16(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Host value of a wire `u16`.
pub const fn from_wire_u16(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Wire bytes of an `i32`.
pub const fn to_wire_i32(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Host value of a wire `i32`.
pub const fn from_wire_i32(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

/// Wire bytes of an `i64`.
pub const fn to_wire_i64(value: i64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Host value of a wire `i64`.
pub const fn from_wire_i64(bytes: [u8; 8]) -> i64 {
    i64::from_be_bytes(bytes)
}

/// Wire bytes of an `f64`, encoded through the `i64` path.
pub fn to_wire_f64(value: f64) -> [u8; 8] {
    to_wire_i64(value.to_bits() as i64)
}

/// Host value of a wire `f64`, decoded through the `i64` path.
pub fn from_wire_f64(bytes: [u8; 8]) -> f64 {
    f64::from_bits(from_wire_i64(bytes) as u64)
}
