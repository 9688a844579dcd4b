use std::fmt;

/// Size of the big-endian length prefix in front of every wire string.
pub const STRING_PREFIX_SIZE: usize = 2;

/// Maximum UTF-8 byte length a wire string can carry.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// A single value the protocol can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Byte(u8),
    UInt16(u16),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
}

impl WireValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> WireKind {
        match self {
            WireValue::Byte(_) => WireKind::Byte,
            WireValue::UInt16(_) => WireKind::UInt16,
            WireValue::Int32(_) => WireKind::Int32,
            WireValue::Int64(_) => WireKind::Int64,
            WireValue::Double(_) => WireKind::Double,
            WireValue::String(_) => WireKind::String,
        }
    }

    /// Number of bytes this value occupies on the wire.
    ///
    /// For strings this includes the 2-byte length prefix.
    pub fn encoded_len(&self) -> usize {
        match self {
            WireValue::String(s) => STRING_PREFIX_SIZE + s.len(),
            other => other.kind().fixed_width().unwrap_or_default(),
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Byte(v) => write!(f, "{v}"),
            WireValue::UInt16(v) => write!(f, "{v}"),
            WireValue::Int32(v) => write!(f, "{v}"),
            WireValue::Int64(v) => write!(f, "{v}"),
            WireValue::Double(v) => write!(f, "{v}"),
            WireValue::String(v) => write!(f, "{v}"),
        }
    }
}

/// The kind of a [`WireValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Byte,
    UInt16,
    Int32,
    Int64,
    Double,
    String,
}

impl WireKind {
    /// Wire width in bytes, or `None` for variable-length kinds.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            WireKind::Byte => Some(1),
            WireKind::UInt16 => Some(2),
            WireKind::Int32 => Some(4),
            WireKind::Int64 | WireKind::Double => Some(8),
            WireKind::String => None,
        }
    }

    /// Short name used on the command line and in output (`u8`, `i32`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            WireKind::Byte => "u8",
            WireKind::UInt16 => "u16",
            WireKind::Int32 => "i32",
            WireKind::Int64 => "i64",
            WireKind::Double => "f64",
            WireKind::String => "str",
        }
    }

    /// Look up a kind by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "u8" => Some(WireKind::Byte),
            "u16" => Some(WireKind::UInt16),
            "i32" => Some(WireKind::Int32),
            "i64" => Some(WireKind::Int64),
            "f64" => Some(WireKind::Double),
            "str" => Some(WireKind::String),
            _ => None,
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_len_per_kind() {
        assert_eq!(WireValue::Byte(7).encoded_len(), 1);
        assert_eq!(WireValue::UInt16(7).encoded_len(), 2);
        assert_eq!(WireValue::Int32(7).encoded_len(), 4);
        assert_eq!(WireValue::Int64(7).encoded_len(), 8);
        assert_eq!(WireValue::Double(7.0).encoded_len(), 8);
        assert_eq!(WireValue::String("ok".into()).encoded_len(), 4);
    }

    #[test]
    fn string_len_counts_utf8_bytes() {
        // "€" is three bytes in UTF-8.
        assert_eq!(WireValue::String("€".into()).encoded_len(), 5);
    }

    #[test]
    fn kind_names_roundtrip() {
        for kind in [
            WireKind::Byte,
            WireKind::UInt16,
            WireKind::Int32,
            WireKind::Int64,
            WireKind::Double,
            WireKind::String,
        ] {
            assert_eq!(WireKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(WireKind::from_name("u32"), None);
    }
}
