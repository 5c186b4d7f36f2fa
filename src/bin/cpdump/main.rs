use std::{env, fs, path::PathBuf, process::ExitCode};

use constpool::{ClassReader, ConstantKind, ConstantPool, ConstantValue, DecodeResult};

const MAGIC: u32 = 0xcafe_babe;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: cpdump <file.class>");
        return ExitCode::from(2);
    };

    let class_file = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut reader = ClassReader::new(&class_file);
    let pool = match read_header(&mut reader) {
        Ok(Some((minor, major, constant_pool_count))) => {
            println!("  minor version: {minor}");
            println!("  major version: {major}");
            ConstantPool::decode(&mut reader, constant_pool_count)
        }
        Ok(None) => {
            eprintln!("{}: not a class file", path.display());
            return ExitCode::FAILURE;
        }
        Err(err) => Err(err),
    };

    match pool.and_then(|pool| dump(&pool)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", path.display(), err);
            ExitCode::FAILURE
        }
    }
}

/// Reads magic, version and `constant_pool_count`; `None` when the magic is wrong.
fn read_header(reader: &mut ClassReader<'_>) -> DecodeResult<Option<(u16, u16, u16)>> {
    if reader.read_u32()? != MAGIC {
        return Ok(None);
    }
    let minor = reader.read_u16()?;
    let major = reader.read_u16()?;
    let constant_pool_count = reader.read_u16()?;
    Ok(Some((minor, major, constant_pool_count)))
}

fn dump(pool: &ConstantPool) -> DecodeResult<()> {
    println!("Constant pool:");
    for index in 1..pool.count() {
        if let Some(line) = describe(pool, index)? {
            println!("{line}");
        }
    }
    Ok(())
}

/// One javap-style line for the slot at `index`; `None` for reserved slots.
fn describe(pool: &ConstantPool, index: u16) -> DecodeResult<Option<String>> {
    let kind = pool.kind(index)?;
    let (operands, comment) = match kind {
        ConstantKind::Reserved => return Ok(None),
        ConstantKind::Utf8 => (pool.resolve_utf8(index)?.escape_debug().to_string(), None),
        ConstantKind::Integer | ConstantKind::Float | ConstantKind::Long | ConstantKind::Double => {
            let value = match pool.resolve_constant_value(index)? {
                ConstantValue::Integer(value) => value.to_string(),
                ConstantValue::Float(value) => format!("{value}f"),
                ConstantValue::Long(value) => format!("{value}l"),
                ConstantValue::Double(value) => format!("{value}d"),
                ConstantValue::String(text) => text.escape_debug().to_string(),
            };
            (value, None)
        }
        ConstantKind::String => (
            format!("#{}", pool.resolve_string_index(index)?),
            Some(pool.resolve_string(index)?.escape_debug().to_string()),
        ),
        ConstantKind::Class => (
            format!("#{}", pool.resolve_class_name_index(index)?),
            Some(pool.resolve_class_name(index)?.to_string()),
        ),
        ConstantKind::NameAndType => {
            let (name_index, descriptor_index) = pool.resolve_name_and_type_indices(index)?;
            (
                format!("#{name_index}:#{descriptor_index}"),
                Some(pool.resolve_name_and_type(index)?.to_string()),
            )
        }
        ConstantKind::Fieldref | ConstantKind::Methodref | ConstantKind::InterfaceMethodref => {
            let (class_index, name_and_type_index) = pool.resolve_member_ref_indices(index)?;
            (
                format!("#{class_index}.#{name_and_type_index}"),
                Some(pool.resolve_member_ref(index)?.to_string()),
            )
        }
    };

    let head = format!("{:>5} = {:<18} ", format!("#{index}"), kind.to_string());
    let line = match comment {
        Some(comment) => format!("{head}{operands:<14} // {comment}"),
        None => format!("{head}{operands}"),
    };
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_prints_operands() {
        #[rustfmt::skip]
        let bytes = [
            1, 0, 3, b'F', b'o', b'o',
            7, 0, 1,
            1, 0, 3, b'r', b'u', b'n',
            1, 0, 3, b'(', b')', b'V',
            12, 0, 3, 0, 4,
            10, 0, 2, 0, 5,
            8, 0, 1,
            5, 0, 0, 0, 0, 0, 0, 0, 9,
        ];
        let mut reader = ClassReader::new(&bytes);
        let pool = ConstantPool::decode(&mut reader, 10).unwrap();

        let line = |index| describe(&pool, index).unwrap().unwrap();
        assert_eq!(line(1), "   #1 = Utf8               Foo");
        assert_eq!(line(2), "   #2 = Class              #1             // Foo");
        assert_eq!(line(5), "   #5 = NameAndType        #3:#4          // run:()V");
        assert_eq!(line(6), "   #6 = Methodref          #2.#5          // Foo.run:()V");
        assert_eq!(line(7), "   #7 = String             #1             // Foo");
        assert_eq!(line(8), "   #8 = Long               9l");
        assert_eq!(describe(&pool, 9).unwrap(), None);
    }
}
