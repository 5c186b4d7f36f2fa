use thiserror::Error;

use crate::class::ConstantKind;

/// Errors raised while decoding or resolving a constant pool.
///
/// Every variant is fatal for the call that produced it; a class file that
/// yields one of these is not decodable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEndOfInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unsupported constant pool tag {tag} at offset {offset}")]
    UnsupportedConstantTag { tag: u8, offset: usize },

    #[error("malformed modified UTF-8 ({length} bytes) at offset {offset}")]
    MalformedUtf8 { offset: usize, length: usize },

    #[error("constant pool index {index} out of range (count {count})")]
    IndexOutOfRange { index: u16, count: u16 },

    #[error("constant pool index {index}: expected {expected}, found {found}")]
    KindMismatch {
        index: u16,
        expected: ConstantKind,
        found: ConstantKind,
    },
}

pub type DecodeResult<T> = Result<T, DecodeError>;
