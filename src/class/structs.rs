mod constant_pool;
mod java_str;

pub use constant_pool::{ConstantKind, ConstantValue, CpMemberRef, CpNameAndTypeInfo};
pub(crate) use constant_pool::ConstantPoolInfo;
pub(crate) use java_str::decode_java_utf8;

use crate::{
    class::parser,
    error::{DecodeError, DecodeResult},
    reader::ClassReader,
};

/// The decoded constant pool of a class file.
///
/// Slots are 1-based; slot 0 and the slot following every `Long` or
/// `Double` are [`ConstantKind::Reserved`]. The pool is immutable once
/// decoded, and every `resolve_*` method is a read-only lookup that fails
/// with [`DecodeError::IndexOutOfRange`] or [`DecodeError::KindMismatch`]
/// instead of panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPool {
    /// `entries[0]` is always `Empty`.
    pub(crate) entries: Vec<ConstantPoolInfo>,
}

impl ConstantPool {
    /// Decodes `constant_pool_count - 1` slots starting at the reader's
    /// current position, which must be the first tag byte.
    pub fn decode(reader: &mut ClassReader<'_>, constant_pool_count: u16) -> DecodeResult<Self> {
        parser::parse_constant_pool(reader, constant_pool_count)
    }

    /// The `constant_pool_count` of this pool: one past the highest valid index.
    pub fn count(&self) -> u16 {
        // bounded by the u16 count the pool was decoded with
        self.entries.len() as u16
    }

    pub fn kind(&self, index: u16) -> DecodeResult<ConstantKind> {
        self.entry(index).map(ConstantPoolInfo::kind)
    }

    pub fn resolve_utf8(&self, index: u16) -> DecodeResult<&str> {
        match self.entry(index)? {
            ConstantPoolInfo::Utf8(text) => Ok(&**text),
            other => Err(mismatch(index, ConstantKind::Utf8, other)),
        }
    }

    pub fn resolve_integer(&self, index: u16) -> DecodeResult<i32> {
        match self.entry(index)? {
            ConstantPoolInfo::Integer(value) => Ok(*value),
            other => Err(mismatch(index, ConstantKind::Integer, other)),
        }
    }

    pub fn resolve_float(&self, index: u16) -> DecodeResult<f32> {
        match self.entry(index)? {
            ConstantPoolInfo::Float(value) => Ok(*value),
            other => Err(mismatch(index, ConstantKind::Float, other)),
        }
    }

    pub fn resolve_long(&self, index: u16) -> DecodeResult<i64> {
        match self.entry(index)? {
            ConstantPoolInfo::Long(value) => Ok(*value),
            other => Err(mismatch(index, ConstantKind::Long, other)),
        }
    }

    pub fn resolve_double(&self, index: u16) -> DecodeResult<f64> {
        match self.entry(index)? {
            ConstantPoolInfo::Double(value) => Ok(*value),
            other => Err(mismatch(index, ConstantKind::Double, other)),
        }
    }

    /// Raw `name_index` of a `Class` entry.
    pub fn resolve_class_name_index(&self, index: u16) -> DecodeResult<u16> {
        match self.entry(index)? {
            ConstantPoolInfo::Class { name_index } => Ok(*name_index),
            other => Err(mismatch(index, ConstantKind::Class, other)),
        }
    }

    /// Text of the `Utf8` entry named by the `Class` entry at `index`.
    pub fn resolve_class_name(&self, index: u16) -> DecodeResult<&str> {
        self.resolve_utf8(self.resolve_class_name_index(index)?)
    }

    pub fn resolve_string_index(&self, index: u16) -> DecodeResult<u16> {
        match self.entry(index)? {
            ConstantPoolInfo::String { string_index } => Ok(*string_index),
            other => Err(mismatch(index, ConstantKind::String, other)),
        }
    }

    /// Text of the `Utf8` entry referenced by the `String` entry at `index`.
    pub fn resolve_string(&self, index: u16) -> DecodeResult<&str> {
        self.resolve_utf8(self.resolve_string_index(index)?)
    }

    /// Raw `(name_index, descriptor_index)` of a `NameAndType` entry.
    pub fn resolve_name_and_type_indices(&self, index: u16) -> DecodeResult<(u16, u16)> {
        match self.entry(index)? {
            ConstantPoolInfo::NameAndType {
                name_index,
                descriptor_index,
            } => Ok((*name_index, *descriptor_index)),
            other => Err(mismatch(index, ConstantKind::NameAndType, other)),
        }
    }

    pub fn resolve_name_and_type(&self, index: u16) -> DecodeResult<CpNameAndTypeInfo<'_>> {
        let (name_index, descriptor_index) = self.resolve_name_and_type_indices(index)?;
        Ok(CpNameAndTypeInfo {
            name: self.resolve_utf8(name_index)?,
            descriptor: self.resolve_utf8(descriptor_index)?,
        })
    }

    /// Resolves a `Fieldref`, `Methodref` or `InterfaceMethodref` entry.
    pub fn resolve_member_ref(&self, index: u16) -> DecodeResult<CpMemberRef<'_>> {
        let (kind, class_index, name_and_type_index) = self.member_ref_indices(index)?;
        Ok(CpMemberRef {
            kind,
            class_name: self.resolve_class_name(class_index)?,
            name_and_type_index,
            name_and_type: self.resolve_name_and_type(name_and_type_index)?,
        })
    }

    /// Raw `(class_index, name_and_type_index)` of a member ref.
    pub fn resolve_member_ref_indices(&self, index: u16) -> DecodeResult<(u16, u16)> {
        let (_, class_index, name_and_type_index) = self.member_ref_indices(index)?;
        Ok((class_index, name_and_type_index))
    }

    pub fn resolve_member_ref_class_name(&self, index: u16) -> DecodeResult<&str> {
        let (_, class_index, _) = self.member_ref_indices(index)?;
        self.resolve_class_name(class_index)
    }

    /// The member's name and type in its combined `name:descriptor` form.
    pub fn resolve_member_ref_name_and_type(&self, index: u16) -> DecodeResult<String> {
        let (_, _, name_and_type_index) = self.member_ref_indices(index)?;
        Ok(self.resolve_name_and_type(name_and_type_index)?.to_string())
    }

    /// Resolves a loadable constant: `Integer`, `Float`, `Long`, `Double` or
    /// `String`. Any other kind is reported as a mismatch against `String`.
    pub fn resolve_constant_value(&self, index: u16) -> DecodeResult<ConstantValue<'_>> {
        match self.entry(index)? {
            ConstantPoolInfo::Integer(value) => Ok(ConstantValue::Integer(*value)),
            ConstantPoolInfo::Float(value) => Ok(ConstantValue::Float(*value)),
            ConstantPoolInfo::Long(value) => Ok(ConstantValue::Long(*value)),
            ConstantPoolInfo::Double(value) => Ok(ConstantValue::Double(*value)),
            ConstantPoolInfo::String { string_index } => {
                self.resolve_utf8(*string_index).map(ConstantValue::String)
            }
            other => Err(mismatch(index, ConstantKind::String, other)),
        }
    }

    fn member_ref_indices(&self, index: u16) -> DecodeResult<(ConstantKind, u16, u16)> {
        let entry = self.entry(index)?;
        match *entry {
            ConstantPoolInfo::Fieldref {
                class_index,
                name_and_type_index,
            }
            | ConstantPoolInfo::Methodref {
                class_index,
                name_and_type_index,
            }
            | ConstantPoolInfo::InterfaceMethodref {
                class_index,
                name_and_type_index,
            } => Ok((entry.kind(), class_index, name_and_type_index)),
            _ => Err(mismatch(index, ConstantKind::Methodref, entry)),
        }
    }

    fn entry(&self, index: u16) -> DecodeResult<&ConstantPoolInfo> {
        match self.entries.get(usize::from(index)) {
            Some(entry) if index != 0 => Ok(entry),
            _ => Err(DecodeError::IndexOutOfRange {
                index,
                count: self.count(),
            }),
        }
    }
}

fn mismatch(index: u16, expected: ConstantKind, found: &ConstantPoolInfo) -> DecodeError {
    DecodeError::KindMismatch {
        index,
        expected,
        found: found.kind(),
    }
}
