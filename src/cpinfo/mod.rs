//! Constant-pool model of the class-file format (JVMS §4.4)
//!
//! Enough of the class file to read and write the header and the constant
//! pool; fields, methods and attributes are not modelled.

pub mod constant;
pub mod error;
pub mod header;
pub mod mutf8;
pub mod pool;
pub mod reference_kind;
pub mod typed_index;
pub mod verify;
pub mod writer;

pub use constant::Constant;
pub use error::{CpInfoError, CpInfoResult};
pub use header::ClassFileHeader;
pub use pool::ConstantPool;
pub use reference_kind::ReferenceKind;
pub use typed_index::{ConstPoolEntryInfo, ConstPoolIndex, RawConstPoolIndex};
pub use verify::{verify, verify_all};
pub use writer::ClassfileWritable;
