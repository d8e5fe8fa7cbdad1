//! Leading part of a `.class` file: magic, version and constant pool

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::error::{CpInfoError, CpInfoResult};
use super::pool::ConstantPool;
use super::writer::ClassfileWritable;
use crate::consts::CLASS_FILE_MAGIC;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFileHeader {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
}

impl ClassFileHeader {
    pub fn new(major_version: u16, minor_version: u16, constant_pool: ConstantPool) -> Self {
        Self { minor_version, major_version, constant_pool }
    }

    /// Read the header; the reader is left just past the constant pool
    pub fn read_from<R: Read>(reader: &mut R) -> CpInfoResult<Self> {
        let magic = reader.read_u32::<BigEndian>()?;
        if magic != CLASS_FILE_MAGIC {
            return Err(CpInfoError::BadMagic(magic));
        }
        let minor_version = reader.read_u16::<BigEndian>()?;
        let major_version = reader.read_u16::<BigEndian>()?;
        log::debug!("class file version {}.{}", major_version, minor_version);
        let constant_pool = ConstantPool::read_from(reader)?;
        Ok(Self { minor_version, major_version, constant_pool })
    }

    pub fn open(path: impl AsRef<Path>) -> CpInfoResult<Self> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);
        Self::read_from(&mut reader)
    }

    /// Java SE release for the major version (52 is Java 8), if it is one
    pub fn java_release(&self) -> Option<u16> {
        match self.major_version {
            45..=48 => Some(1),
            49.. => Some(self.major_version - 44),
            _ => None,
        }
    }
}

impl ClassfileWritable for ClassFileHeader {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) -> CpInfoResult<()> {
        buffer.write_u32::<BigEndian>(CLASS_FILE_MAGIC)?;
        buffer.write_u16::<BigEndian>(self.minor_version)?;
        buffer.write_u16::<BigEndian>(self.major_version)?;
        self.constant_pool.write_to_classfile(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_round_trip() {
        let mut pool = ConstantPool::new();
        pool.add_class("Hello").unwrap();
        let header = ClassFileHeader::new(52, 0, pool);
        let bytes = header.to_classfile_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
        assert_eq!(&bytes[4..8], &[0x00, 0x00, 0x00, 52]);

        let back = ClassFileHeader::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(back, header);
        assert_eq!(back.java_release(), Some(8));
    }

    #[test]
    fn test_bad_magic() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 52, 0, 1];
        assert!(matches!(
            ClassFileHeader::read_from(&mut Cursor::new(&bytes[..])),
            Err(CpInfoError::BadMagic(0xDEAD_BEEF))
        ));
    }
}
