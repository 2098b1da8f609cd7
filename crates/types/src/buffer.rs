//! Fixed-width numeric buffers.

use std::fmt;

use thiserror::Error;

use crate::Value;

/// The family of fixed-width numeric buffer kinds.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum BufferKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl BufferKind {
    pub const ALL: [BufferKind; 11] = [
        BufferKind::Int8,
        BufferKind::Uint8,
        BufferKind::Uint8Clamped,
        BufferKind::Int16,
        BufferKind::Uint16,
        BufferKind::Int32,
        BufferKind::Uint32,
        BufferKind::Float32,
        BufferKind::Float64,
        BufferKind::BigInt64,
        BufferKind::BigUint64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BufferKind::Int8 => "Int8Array",
            BufferKind::Uint8 => "Uint8Array",
            BufferKind::Uint8Clamped => "Uint8ClampedArray",
            BufferKind::Int16 => "Int16Array",
            BufferKind::Uint16 => "Uint16Array",
            BufferKind::Int32 => "Int32Array",
            BufferKind::Uint32 => "Uint32Array",
            BufferKind::Float32 => "Float32Array",
            BufferKind::Float64 => "Float64Array",
            BufferKind::BigInt64 => "BigInt64Array",
            BufferKind::BigUint64 => "BigUint64Array",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Width of a single element in bytes.
    pub fn element_size(self) -> usize {
        match self {
            BufferKind::Int8 | BufferKind::Uint8 | BufferKind::Uint8Clamped => 1,
            BufferKind::Int16 | BufferKind::Uint16 => 2,
            BufferKind::Int32 | BufferKind::Uint32 | BufferKind::Float32 => 4,
            BufferKind::Float64 | BufferKind::BigInt64 | BufferKind::BigUint64 => 8,
        }
    }

    pub(crate) fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("byte length {byte_len} is not a multiple of {kind} element size {element_size}")]
    Misaligned {
        kind: BufferKind,
        byte_len: usize,
        element_size: usize,
    },
}

/// Contiguous, homogeneously typed numeric storage.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericBuffer {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    BigInt64(Vec<i64>),
    BigUint64(Vec<u64>),
}

impl NumericBuffer {
    /// Allocates `len` zero-valued elements of `kind`.
    pub fn zeroed(kind: BufferKind, len: usize) -> Self {
        match kind {
            BufferKind::Int8 => NumericBuffer::Int8(vec![0; len]),
            BufferKind::Uint8 => NumericBuffer::Uint8(vec![0; len]),
            BufferKind::Uint8Clamped => NumericBuffer::Uint8Clamped(vec![0; len]),
            BufferKind::Int16 => NumericBuffer::Int16(vec![0; len]),
            BufferKind::Uint16 => NumericBuffer::Uint16(vec![0; len]),
            BufferKind::Int32 => NumericBuffer::Int32(vec![0; len]),
            BufferKind::Uint32 => NumericBuffer::Uint32(vec![0; len]),
            BufferKind::Float32 => NumericBuffer::Float32(vec![0.0; len]),
            BufferKind::Float64 => NumericBuffer::Float64(vec![0.0; len]),
            BufferKind::BigInt64 => NumericBuffer::BigInt64(vec![0; len]),
            BufferKind::BigUint64 => NumericBuffer::BigUint64(vec![0; len]),
        }
    }

    /// Reinterprets a raw little-endian byte block as elements of `kind`.
    ///
    /// # Errors
    /// Returns [`BufferError::Misaligned`] when `bytes.len()` is not a multiple
    /// of the element size.
    pub fn from_bytes(kind: BufferKind, bytes: &[u8]) -> Result<Self, BufferError> {
        let element_size = kind.element_size();
        if bytes.len() % element_size != 0 {
            return Err(BufferError::Misaligned {
                kind,
                byte_len: bytes.len(),
                element_size,
            });
        }
        let chunks = bytes.chunks_exact(element_size);
        let buffer = match kind {
            BufferKind::Int8 => NumericBuffer::Int8(bytes.iter().map(|byte| *byte as i8).collect()),
            BufferKind::Uint8 => NumericBuffer::Uint8(bytes.to_vec()),
            BufferKind::Uint8Clamped => NumericBuffer::Uint8Clamped(bytes.to_vec()),
            BufferKind::Int16 => NumericBuffer::Int16(chunks.map(|c| i16::from_le_bytes([c[0], c[1]])).collect()),
            BufferKind::Uint16 => NumericBuffer::Uint16(chunks.map(|c| u16::from_le_bytes([c[0], c[1]])).collect()),
            BufferKind::Int32 => NumericBuffer::Int32(chunks.map(|c| i32::from_le_bytes(word(c))).collect()),
            BufferKind::Uint32 => NumericBuffer::Uint32(chunks.map(|c| u32::from_le_bytes(word(c))).collect()),
            BufferKind::Float32 => NumericBuffer::Float32(chunks.map(|c| f32::from_le_bytes(word(c))).collect()),
            BufferKind::Float64 => NumericBuffer::Float64(chunks.map(|c| f64::from_le_bytes(double_word(c))).collect()),
            BufferKind::BigInt64 => NumericBuffer::BigInt64(chunks.map(|c| i64::from_le_bytes(double_word(c))).collect()),
            BufferKind::BigUint64 => NumericBuffer::BigUint64(chunks.map(|c| u64::from_le_bytes(double_word(c))).collect()),
        };
        Ok(buffer)
    }

    pub fn kind(&self) -> BufferKind {
        match self {
            NumericBuffer::Int8(_) => BufferKind::Int8,
            NumericBuffer::Uint8(_) => BufferKind::Uint8,
            NumericBuffer::Uint8Clamped(_) => BufferKind::Uint8Clamped,
            NumericBuffer::Int16(_) => BufferKind::Int16,
            NumericBuffer::Uint16(_) => BufferKind::Uint16,
            NumericBuffer::Int32(_) => BufferKind::Int32,
            NumericBuffer::Uint32(_) => BufferKind::Uint32,
            NumericBuffer::Float32(_) => BufferKind::Float32,
            NumericBuffer::Float64(_) => BufferKind::Float64,
            NumericBuffer::BigInt64(_) => BufferKind::BigInt64,
            NumericBuffer::BigUint64(_) => BufferKind::BigUint64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericBuffer::Int8(items) => items.len(),
            NumericBuffer::Uint8(items) | NumericBuffer::Uint8Clamped(items) => items.len(),
            NumericBuffer::Int16(items) => items.len(),
            NumericBuffer::Uint16(items) => items.len(),
            NumericBuffer::Int32(items) => items.len(),
            NumericBuffer::Uint32(items) => items.len(),
            NumericBuffer::Float32(items) => items.len(),
            NumericBuffer::Float64(items) => items.len(),
            NumericBuffer::BigInt64(items) => items.len(),
            NumericBuffer::BigUint64(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index` in storage order.
    ///
    /// 64-bit integer kinds surface as [`Value::BigInt`]; every other kind as
    /// [`Value::Number`].
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            NumericBuffer::Int8(items) => items.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Uint8(items) | NumericBuffer::Uint8Clamped(items) => items.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Int16(items) => items.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Uint16(items) => items.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Int32(items) => items.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Uint32(items) => items.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Float32(items) => items.get(index).map(|n| Value::Number(f64::from(*n))),
            NumericBuffer::Float64(items) => items.get(index).map(|n| Value::Number(*n)),
            NumericBuffer::BigInt64(items) => items.get(index).map(|n| Value::BigInt(i128::from(*n))),
            NumericBuffer::BigUint64(items) => items.get(index).map(|n| Value::BigInt(i128::from(*n))),
        }
    }
}

fn word(chunk: &[u8]) -> [u8; 4] {
    [chunk[0], chunk[1], chunk[2], chunk[3]]
}

fn double_word(chunk: &[u8]) -> [u8; 8] {
    [chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7]]
}

macro_rules! buffer_from_vec {
    ($($element:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$element>> for NumericBuffer {
                fn from(items: Vec<$element>) -> Self {
                    NumericBuffer::$variant(items)
                }
            }
        )*
    };
}

buffer_from_vec! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    f64 => Float64,
    i64 => BigInt64,
    u64 => BigUint64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_zero_bytes_make_one_int32() {
        let buffer = NumericBuffer::from_bytes(BufferKind::Int32, &[0, 0, 0, 0]).expect("aligned");
        assert_eq!(buffer.kind(), BufferKind::Int32);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.get(0), Some(Value::Number(0.0)));
        assert_eq!(buffer.get(1), None);
    }

    #[test]
    fn bytes_are_read_little_endian() {
        let buffer = NumericBuffer::from_bytes(BufferKind::Uint16, &[0x01, 0x02, 0xff, 0xff]).expect("aligned");
        assert_eq!(buffer, NumericBuffer::Uint16(vec![0x0201, 0xffff]));
    }

    #[test]
    fn misaligned_bytes_are_rejected() {
        let error = NumericBuffer::from_bytes(BufferKind::Float64, &[0; 12]).unwrap_err();
        assert_eq!(
            error,
            BufferError::Misaligned {
                kind: BufferKind::Float64,
                byte_len: 12,
                element_size: 8,
            }
        );
        assert!(error.to_string().contains("Float64Array"));
    }

    #[test]
    fn wide_integers_surface_as_bigint() {
        let buffer = NumericBuffer::from(vec![u64::MAX]);
        assert_eq!(buffer.get(0), Some(Value::BigInt(i128::from(u64::MAX))));
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in BufferKind::ALL {
            assert_eq!(BufferKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(BufferKind::from_name("Array"), None);
    }

    #[test]
    fn zeroed_matches_requested_kind() {
        let buffer = NumericBuffer::zeroed(BufferKind::Uint8Clamped, 3);
        assert_eq!(buffer.kind(), BufferKind::Uint8Clamped);
        assert_eq!(buffer.len(), 3);
    }
}
