use crate::{
    class::{ConstantPool, ConstantPoolInfo, decode_java_utf8},
    error::{DecodeError, DecodeResult},
    reader::ClassReader,
};

const CONSTANT_UTF8: u8 = 1;
const CONSTANT_INTEGER: u8 = 3;
const CONSTANT_FLOAT: u8 = 4;
const CONSTANT_LONG: u8 = 5;
const CONSTANT_DOUBLE: u8 = 6;
const CONSTANT_CLASS: u8 = 7;
const CONSTANT_STRING: u8 = 8;
const CONSTANT_FIELDREF: u8 = 9;
const CONSTANT_METHODREF: u8 = 10;
const CONSTANT_INTERFACE_METHODREF: u8 = 11;
const CONSTANT_NAME_AND_TYPE: u8 = 12;

pub(crate) fn parse_constant_pool(
    reader: &mut ClassReader<'_>,
    constant_pool_count: u16,
) -> DecodeResult<ConstantPool> {
    let start = reader.offset();
    // slot 0 is never encoded, so a count of 0 or 1 both mean an empty pool
    let count = usize::from(constant_pool_count.max(1));

    let mut constant_pool = Vec::with_capacity(count);
    constant_pool.push(ConstantPoolInfo::Empty);

    while constant_pool.len() < count {
        let offset = reader.offset();
        let constant = parse_constant(reader)?;
        log::trace!(
            "#{} = {} at offset {}",
            constant_pool.len(),
            constant.kind(),
            offset
        );
        let need_empty = constant.is_wide();
        constant_pool.push(constant);
        if need_empty {
            if constant_pool.len() >= count {
                return Err(DecodeError::IndexOutOfRange {
                    index: constant_pool.len() as u16,
                    count: constant_pool_count,
                });
            }
            constant_pool.push(ConstantPoolInfo::Empty);
        }
    }

    log::debug!(
        "decoded constant pool: {} slots, {} bytes",
        constant_pool.len() - 1,
        reader.offset() - start
    );

    Ok(ConstantPool {
        entries: constant_pool,
    })
}

fn parse_constant(reader: &mut ClassReader<'_>) -> DecodeResult<ConstantPoolInfo> {
    let offset = reader.offset();
    let tag = reader.read_u8()?;
    let cp_info = match tag {
        CONSTANT_UTF8 => {
            let length = reader.read_u16()?;
            let payload_offset = reader.offset();
            let bytes = reader.read_bytes(length as usize)?;
            let text = decode_java_utf8(bytes).ok_or(DecodeError::MalformedUtf8 {
                offset: payload_offset,
                length: bytes.len(),
            })?;
            ConstantPoolInfo::Utf8(text)
        }
        CONSTANT_INTEGER => ConstantPoolInfo::Integer(reader.read_u32()? as i32),
        CONSTANT_FLOAT => ConstantPoolInfo::Float(f32::from_bits(reader.read_u32()?)),
        CONSTANT_LONG => ConstantPoolInfo::Long(reader.read_u64()? as i64),
        CONSTANT_DOUBLE => ConstantPoolInfo::Double(f64::from_bits(reader.read_u64()?)),
        CONSTANT_CLASS => ConstantPoolInfo::Class {
            name_index: reader.read_u16()?,
        },
        CONSTANT_STRING => ConstantPoolInfo::String {
            string_index: reader.read_u16()?,
        },
        CONSTANT_FIELDREF => {
            let (class_index, name_and_type_index) = parse_index_pair(reader)?;
            ConstantPoolInfo::Fieldref {
                class_index,
                name_and_type_index,
            }
        }
        CONSTANT_METHODREF => {
            let (class_index, name_and_type_index) = parse_index_pair(reader)?;
            ConstantPoolInfo::Methodref {
                class_index,
                name_and_type_index,
            }
        }
        CONSTANT_INTERFACE_METHODREF => {
            let (class_index, name_and_type_index) = parse_index_pair(reader)?;
            ConstantPoolInfo::InterfaceMethodref {
                class_index,
                name_and_type_index,
            }
        }
        CONSTANT_NAME_AND_TYPE => {
            let (name_index, descriptor_index) = parse_index_pair(reader)?;
            ConstantPoolInfo::NameAndType {
                name_index,
                descriptor_index,
            }
        }
        // MethodHandle, MethodType, Dynamic, InvokeDynamic, Module and Package
        // have no layout here yet and are rejected like any other tag
        _ => {
            log::debug!("unsupported constant pool tag {} at offset {}", tag, offset);
            return Err(DecodeError::UnsupportedConstantTag { tag, offset });
        }
    };
    Ok(cp_info)
}

fn parse_index_pair(reader: &mut ClassReader<'_>) -> DecodeResult<(u16, u16)> {
    let first = reader.read_u16()?;
    let second = reader.read_u16()?;
    Ok((first, second))
}
