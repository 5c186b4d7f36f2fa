use std::fmt::{self, Display};
use std::sync::Arc;

/// One slot of a decoded constant pool.
///
/// Reference kinds keep raw 1-based indices; they are resolved against the
/// owning [`ConstantPool`](super::ConstantPool) on demand.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConstantPoolInfo {
    Utf8(Arc<str>),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class {
        name_index: u16,
    },
    String {
        string_index: u16,
    },
    Fieldref {
        class_index: u16,
        name_and_type_index: u16,
    },
    Methodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    InterfaceMethodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
    /// Index 0 and the slot after a `Long` or `Double`.
    Empty,
}

impl ConstantPoolInfo {
    pub(crate) fn kind(&self) -> ConstantKind {
        match self {
            ConstantPoolInfo::Utf8(_) => ConstantKind::Utf8,
            ConstantPoolInfo::Integer(_) => ConstantKind::Integer,
            ConstantPoolInfo::Float(_) => ConstantKind::Float,
            ConstantPoolInfo::Long(_) => ConstantKind::Long,
            ConstantPoolInfo::Double(_) => ConstantKind::Double,
            ConstantPoolInfo::Class { .. } => ConstantKind::Class,
            ConstantPoolInfo::String { .. } => ConstantKind::String,
            ConstantPoolInfo::Fieldref { .. } => ConstantKind::Fieldref,
            ConstantPoolInfo::Methodref { .. } => ConstantKind::Methodref,
            ConstantPoolInfo::InterfaceMethodref { .. } => ConstantKind::InterfaceMethodref,
            ConstantPoolInfo::NameAndType { .. } => ConstantKind::NameAndType,
            ConstantPoolInfo::Empty => ConstantKind::Reserved,
        }
    }

    /// Whether this entry also claims the following slot.
    pub(crate) fn is_wide(&self) -> bool {
        matches!(self, ConstantPoolInfo::Long(_) | ConstantPoolInfo::Double(_))
    }
}

/// Kind of a constant pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    Utf8,
    Integer,
    Float,
    Long,
    Double,
    Class,
    String,
    Fieldref,
    Methodref,
    InterfaceMethodref,
    NameAndType,
    /// Unusable slot: index 0, or the second half of a `Long`/`Double`.
    Reserved,
}

impl ConstantKind {
    /// Wire tag of this kind, `None` for [`ConstantKind::Reserved`].
    pub fn tag(self) -> Option<u8> {
        let tag = match self {
            ConstantKind::Utf8 => 1,
            ConstantKind::Integer => 3,
            ConstantKind::Float => 4,
            ConstantKind::Long => 5,
            ConstantKind::Double => 6,
            ConstantKind::Class => 7,
            ConstantKind::String => 8,
            ConstantKind::Fieldref => 9,
            ConstantKind::Methodref => 10,
            ConstantKind::InterfaceMethodref => 11,
            ConstantKind::NameAndType => 12,
            ConstantKind::Reserved => return None,
        };
        Some(tag)
    }
}

impl Display for ConstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstantKind::Utf8 => "Utf8",
            ConstantKind::Integer => "Integer",
            ConstantKind::Float => "Float",
            ConstantKind::Long => "Long",
            ConstantKind::Double => "Double",
            ConstantKind::Class => "Class",
            ConstantKind::String => "String",
            ConstantKind::Fieldref => "Fieldref",
            ConstantKind::Methodref => "Methodref",
            ConstantKind::InterfaceMethodref => "InterfaceMethodref",
            ConstantKind::NameAndType => "NameAndType",
            ConstantKind::Reserved => "reserved slot",
        };
        f.write_str(name)
    }
}

/// A loadable constant: a primitive literal or a string literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue<'a> {
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    String(&'a str),
}

/// A resolved `NameAndType` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpNameAndTypeInfo<'a> {
    pub name: &'a str,
    pub descriptor: &'a str,
}

impl Display for CpNameAndTypeInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.descriptor)
    }
}

/// A resolved `Fieldref`, `Methodref` or `InterfaceMethodref` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpMemberRef<'a> {
    pub kind: ConstantKind,
    pub class_name: &'a str,
    pub name_and_type_index: u16,
    pub name_and_type: CpNameAndTypeInfo<'a>,
}

impl Display for CpMemberRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.name_and_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(ConstantKind::Utf8.tag(), Some(1));
        assert_eq!(ConstantKind::Long.tag(), Some(5));
        assert_eq!(ConstantKind::NameAndType.tag(), Some(12));
        assert_eq!(ConstantKind::Reserved.tag(), None);
        assert_eq!(ConstantPoolInfo::Double(1.0).kind(), ConstantKind::Double);
        assert_eq!(ConstantPoolInfo::Empty.kind(), ConstantKind::Reserved);
    }

    #[test]
    fn test_name_and_type_display() {
        let nat = CpNameAndTypeInfo {
            name: "<init>",
            descriptor: "()V",
        };
        assert_eq!(nat.to_string(), "<init>:()V");
    }
}
