//! Codec error model shared by the network and tag channels.

use crate::RegistryKey;
use std::fmt;
use thiserror::Error;

/// The two wire representations a definition may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Compact binary form used on the live connection.
    Network,
    /// Tree-structured tag form used for storage.
    Tag,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Network => f.write_str("network"),
            Channel::Tag => f.write_str("tag"),
        }
    }
}

/// Failure while reading or writing a value on either channel.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The definition has no codec for the requested channel.
    #[error("{component} cannot be encoded on the {channel} channel")]
    UnsupportedChannel {
        /// Definition that was used.
        component: RegistryKey,
        /// Channel that was requested.
        channel: Channel,
    },
    /// An erased value did not have the definition's value type.
    #[error("value passed to {component} is not a `{expected}`")]
    ValueType {
        /// Definition that was used.
        component: RegistryKey,
        /// Rust type the definition expects.
        expected: &'static str,
    },
    /// The buffer ended before the value did.
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the next read required.
        needed: usize,
        /// Bytes that were left.
        remaining: usize,
    },
    /// A bounded list declared more elements than it allows.
    #[error("list of {len} elements exceeds maximum of {max}")]
    ListTooLong {
        /// Declared or actual element count.
        len: usize,
        /// Maximum accepted count.
        max: usize,
    },
    /// A block state id did not resolve to a block.
    #[error("block state {0} is invalid")]
    InvalidBlockState(i32),
    /// An enum ordinal or discriminant was out of range.
    #[error("invalid {kind} discriminant {value}")]
    InvalidDiscriminant {
        /// What was being decoded.
        kind: &'static str,
        /// The value read.
        value: i32,
    },
    /// A var-int or var-long ran past its maximum width.
    #[error("variable-length integer is too long")]
    VarIntTooLong,
    /// String bytes were not UTF-8.
    #[error("string is not valid utf-8")]
    InvalidUtf8,
    /// A string exceeded its maximum length.
    #[error("string of {len} characters exceeds maximum of {max}")]
    StringTooLong {
        /// Length that was found.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },
    /// A tag had a different type than expected.
    #[error("expected {expected} tag, found {found}")]
    TagType {
        /// Expected tag type name.
        expected: &'static str,
        /// Actual tag type name.
        found: &'static str,
    },
    /// A required compound field was absent.
    #[error("missing required field `{0}`")]
    MissingField(String),
    /// A named constant (rarity, dye color, ...) was not recognized.
    #[error("unknown {kind} `{value}`")]
    UnknownName {
        /// What was being decoded.
        kind: &'static str,
        /// The value read.
        value: String,
    },
    /// Nested tags went deeper than allowed.
    #[error("tag nesting exceeds depth {0}")]
    NestingTooDeep(usize),
    /// A decoded color channel fell outside 0..=255.
    #[error("color channel {0} is out of range")]
    InvalidColor(i32),
    /// Text component JSON could not be parsed.
    #[error("invalid text component: {0}")]
    InvalidText(#[from] serde_json::Error),
}

impl CodecError {
    /// True when the error describes bad input rather than caller misuse.
    ///
    /// Malformed payloads abort the read; the owner of the buffer decides
    /// whether that means dropping the connection or rejecting the write.
    pub fn is_malformed(&self) -> bool {
        !matches!(
            self,
            CodecError::UnsupportedChannel { .. } | CodecError::ValueType { .. }
        )
    }
}

/// Result alias for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
