mod parser;
mod structs;

pub use structs::{ConstantKind, ConstantPool, ConstantValue, CpMemberRef, CpNameAndTypeInfo};
pub(crate) use structs::{ConstantPoolInfo, decode_java_utf8};
