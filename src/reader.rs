use nom::{
    IResult,
    bytes::complete::take,
    number::complete::{be_u16, be_u32, be_u64, u8},
};

use crate::error::{DecodeError, DecodeResult};

/// Forward-only big-endian cursor over a class file buffer.
///
/// Every read either consumes exactly its width and advances the offset, or
/// fails with [`DecodeError::UnexpectedEndOfInput`] and leaves the offset
/// where it was.
#[derive(Debug)]
pub struct ClassReader<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> ClassReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        self.read_with(1, u8)
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        self.read_with(2, be_u16)
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        self.read_with(4, be_u32)
    }

    pub fn read_u64(&mut self) -> DecodeResult<u64> {
        self.read_with(8, be_u64)
    }

    /// Borrows the next `n` bytes verbatim.
    pub fn read_bytes(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        self.read_with(n, take::<_, _, nom::error::Error<&'a [u8]>>(n))
    }

    fn read_with<O>(
        &mut self,
        needed: usize,
        parser: impl FnOnce(&'a [u8]) -> IResult<&'a [u8], O>,
    ) -> DecodeResult<O> {
        let input = &self.input[self.offset..];
        match parser(input) {
            Ok((rest, value)) => {
                self.offset = self.input.len() - rest.len();
                Ok(value)
            }
            Err(_) => Err(DecodeError::UnexpectedEndOfInput {
                offset: self.offset,
                needed,
                remaining: input.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_reads() {
        let bytes = [
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            0x08,
        ];
        let mut reader = ClassReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16().unwrap(), 0x0203);
        assert_eq!(reader.read_u32().unwrap(), 0x0405_0607);
        assert_eq!(reader.read_u64().unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(reader.offset(), 15);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_bytes() {
        let bytes = b"\x00\x03Foo!";
        let mut reader = ClassReader::new(bytes);
        let length = reader.read_u16().unwrap();
        assert_eq!(reader.read_bytes(length as usize).unwrap(), b"Foo");
        assert_eq!(reader.read_bytes(0).unwrap(), b"");
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_truncated_read_keeps_offset() {
        let bytes = [0xca, 0xfe, 0xba];
        let mut reader = ClassReader::new(&bytes);
        assert_eq!(reader.read_u16().unwrap(), 0xcafe);
        assert_eq!(
            reader.read_u16(),
            Err(DecodeError::UnexpectedEndOfInput {
                offset: 2,
                needed: 2,
                remaining: 1,
            })
        );
        assert_eq!(reader.offset(), 2);
        assert_eq!(reader.read_u8().unwrap(), 0xba);
        assert!(matches!(
            reader.read_u8(),
            Err(DecodeError::UnexpectedEndOfInput { needed: 1, .. })
        ));
    }

    #[test]
    fn test_read_bytes_past_end() {
        let mut reader = ClassReader::new(b"abc");
        assert_eq!(
            reader.read_bytes(4),
            Err(DecodeError::UnexpectedEndOfInput {
                offset: 0,
                needed: 4,
                remaining: 3,
            })
        );
        assert_eq!(reader.read_bytes(3).unwrap(), b"abc");
    }
}
