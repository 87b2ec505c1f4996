//! Binary channel buffer.
//!
//! [`NetworkBuffer`] appends on write and consumes from the front on read.
//! Every read checks the remaining length first, so truncated or hostile input
//! surfaces as [`CodecError::UnexpectedEof`] instead of a panic.
//!
//! All fixed-width numbers are big-endian, matching the game protocol.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use mdminecraft_core::{BlockPosition, CodecError, CodecResult, ProtocolEnum};
use uuid::Uuid;

/// Maximum string length in characters.
pub const MAX_STRING_LEN: usize = 32_767;

const SEGMENT_BITS: u32 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Growable byte buffer with protocol primitives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkBuffer {
    data: BytesMut,
}

impl NetworkBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
        }
    }

    /// Buffer positioned at the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: BytesMut::from(bytes),
        }
    }

    /// Bytes not yet read.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    /// Returns true when everything has been read.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Freeze the unread bytes.
    pub fn freeze(self) -> Bytes {
        self.data.freeze()
    }

    fn ensure(&self, needed: usize) -> CodecResult<()> {
        if self.data.len() < needed {
            return Err(CodecError::UnexpectedEof {
                needed,
                remaining: self.data.len(),
            });
        }
        Ok(())
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.put_slice(bytes);
    }

    /// Consume `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> CodecResult<Bytes> {
        self.ensure(len)?;
        Ok(self.data.split_to(len).freeze())
    }

    /// Write a signed byte.
    pub fn write_byte(&mut self, value: i8) {
        self.data.put_i8(value);
    }

    /// Read a signed byte.
    pub fn read_byte(&mut self) -> CodecResult<i8> {
        self.ensure(1)?;
        Ok(self.data.get_i8())
    }

    /// Write a boolean as a single byte.
    pub fn write_bool(&mut self, value: bool) {
        self.data.put_u8(u8::from(value));
    }

    /// Read a boolean; any non-zero byte is true.
    pub fn read_bool(&mut self) -> CodecResult<bool> {
        self.ensure(1)?;
        Ok(self.data.get_u8() != 0)
    }

    /// Write a 16-bit integer.
    pub fn write_short(&mut self, value: i16) {
        self.data.put_i16(value);
    }

    /// Read a 16-bit integer.
    pub fn read_short(&mut self) -> CodecResult<i16> {
        self.ensure(2)?;
        Ok(self.data.get_i16())
    }

    /// Write a 32-bit integer.
    pub fn write_int(&mut self, value: i32) {
        self.data.put_i32(value);
    }

    /// Read a 32-bit integer.
    pub fn read_int(&mut self) -> CodecResult<i32> {
        self.ensure(4)?;
        Ok(self.data.get_i32())
    }

    /// Write a 64-bit integer.
    pub fn write_long(&mut self, value: i64) {
        self.data.put_i64(value);
    }

    /// Read a 64-bit integer.
    pub fn read_long(&mut self) -> CodecResult<i64> {
        self.ensure(8)?;
        Ok(self.data.get_i64())
    }

    /// Write a 32-bit float.
    pub fn write_float(&mut self, value: f32) {
        self.data.put_f32(value);
    }

    /// Read a 32-bit float.
    pub fn read_float(&mut self) -> CodecResult<f32> {
        self.ensure(4)?;
        Ok(self.data.get_f32())
    }

    /// Write a 64-bit float.
    pub fn write_double(&mut self, value: f64) {
        self.data.put_f64(value);
    }

    /// Read a 64-bit float.
    pub fn read_double(&mut self) -> CodecResult<f64> {
        self.ensure(8)?;
        Ok(self.data.get_f64())
    }

    /// Write a LEB128-style variable-length integer (1 to 5 bytes).
    pub fn write_var_int(&mut self, value: i32) {
        let mut value = value as u32;
        loop {
            if value & !SEGMENT_BITS == 0 {
                self.data.put_u8(value as u8);
                return;
            }
            self.data.put_u8((value & SEGMENT_BITS) as u8 | CONTINUE_BIT);
            value >>= 7;
        }
    }

    /// Read a variable-length integer.
    pub fn read_var_int(&mut self) -> CodecResult<i32> {
        let mut value: u32 = 0;
        for position in 0..5 {
            self.ensure(1)?;
            let byte = self.data.get_u8();
            value |= u32::from(byte & SEGMENT_BITS as u8) << (position * 7);
            if byte & CONTINUE_BIT == 0 {
                return Ok(value as i32);
            }
        }
        Err(CodecError::VarIntTooLong)
    }

    /// Write a variable-length long (1 to 10 bytes).
    pub fn write_var_long(&mut self, value: i64) {
        let mut value = value as u64;
        loop {
            if value & !u64::from(SEGMENT_BITS) == 0 {
                self.data.put_u8(value as u8);
                return;
            }
            self.data.put_u8((value & u64::from(SEGMENT_BITS)) as u8 | CONTINUE_BIT);
            value >>= 7;
        }
    }

    /// Read a variable-length long.
    pub fn read_var_long(&mut self) -> CodecResult<i64> {
        let mut value: u64 = 0;
        for position in 0..10 {
            self.ensure(1)?;
            let byte = self.data.get_u8();
            value |= u64::from(byte & SEGMENT_BITS as u8) << (position * 7);
            if byte & CONTINUE_BIT == 0 {
                return Ok(value as i64);
            }
        }
        Err(CodecError::VarIntTooLong)
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> CodecResult<()> {
        let chars = value.chars().count();
        if chars > MAX_STRING_LEN {
            return Err(CodecError::StringTooLong {
                len: chars,
                max: MAX_STRING_LEN,
            });
        }
        self.write_var_int(value.len() as i32);
        self.data.put_slice(value.as_bytes());
        Ok(())
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> CodecResult<String> {
        let len = self.read_var_int()?;
        let max_bytes = MAX_STRING_LEN * 3;
        let len = usize::try_from(len)
            .ok()
            .filter(|len| *len <= max_bytes)
            .ok_or(CodecError::StringTooLong {
                len: len.max(0) as usize,
                max: max_bytes,
            })?;
        let bytes = self.read_bytes(len)?;
        let text = std::str::from_utf8(&bytes).map_err(|_| CodecError::InvalidUtf8)?;
        let chars = text.chars().count();
        if chars > MAX_STRING_LEN {
            return Err(CodecError::StringTooLong {
                len: chars,
                max: MAX_STRING_LEN,
            });
        }
        Ok(text.to_string())
    }

    /// Write a UUID as two 64-bit integers.
    pub fn write_uuid(&mut self, value: &Uuid) {
        self.data.put_u128(value.as_u128());
    }

    /// Read a UUID.
    pub fn read_uuid(&mut self) -> CodecResult<Uuid> {
        self.ensure(16)?;
        Ok(Uuid::from_u128(self.data.get_u128()))
    }

    /// Write a block position as a packed long.
    pub fn write_block_position(&mut self, value: BlockPosition) {
        self.write_long(value.pack());
    }

    /// Read a packed block position.
    pub fn read_block_position(&mut self) -> CodecResult<BlockPosition> {
        self.read_long().map(BlockPosition::unpack)
    }

    /// Write an enum as its var-int ordinal.
    pub fn write_enum<E: ProtocolEnum>(&mut self, value: E) {
        self.write_var_int(value.ordinal());
    }

    /// Read an enum from its var-int ordinal.
    pub fn read_enum<E: ProtocolEnum>(&mut self) -> CodecResult<E> {
        E::from_ordinal(self.read_var_int()?)
    }

    /// Read a var-int list length and check it against `max`.
    pub fn read_length(&mut self, max: usize) -> CodecResult<usize> {
        let len = self.read_var_int()?;
        let len = usize::try_from(len).map_err(|_| CodecError::InvalidDiscriminant {
            kind: "list length",
            value: len,
        })?;
        if len > max {
            return Err(CodecError::ListTooLong { len, max });
        }
        Ok(len)
    }
}

impl From<Vec<u8>> for NetworkBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            data: BytesMut::from(&bytes[..]),
        }
    }
}
