//! Trait-based serialization for class-file structures

use std::io::Write;

use super::error::CpInfoResult;

/// An object which can be written into a class file
pub trait ClassfileWritable {
    /// Writes the bytes of this object into the given buffer.
    ///
    /// # Arguments
    ///
    /// * `buffer` - class-file byte buffer into which this object should be written
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) -> CpInfoResult<()>;

    /// Writes the bytes of this object into a newly created buffer.
    fn to_classfile_bytes(&self) -> CpInfoResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to_classfile(&mut buffer)?;
        Ok(buffer)
    }
}
