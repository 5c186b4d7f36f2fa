//! Decoder for the constant pool section of JVM class files.
//!
//! [`ClassReader`] is a forward-only big-endian cursor. [`ConstantPool::decode`]
//! drives it over the constant pool section and returns an immutable table
//! that resolves indices on demand.

pub mod class;
mod error;
pub mod reader;

pub use class::{ConstantKind, ConstantPool, ConstantValue, CpMemberRef, CpNameAndTypeInfo};
pub use error::{DecodeError, DecodeResult};
pub use reader::ClassReader;
