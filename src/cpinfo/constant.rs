//! Constant pool entries (JVMS §4.4)

use std::fmt;
use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::error::{CpInfoError, CpInfoResult};
use super::mutf8;
use super::reference_kind::ReferenceKind;
use super::typed_index::*;
use super::writer::ClassfileWritable;

pub mod constant_tags {
    pub const CONSTANT_UTF8: u8 = 1;
    pub const CONSTANT_INTEGER: u8 = 3;
    pub const CONSTANT_FLOAT: u8 = 4;
    pub const CONSTANT_LONG: u8 = 5;
    pub const CONSTANT_DOUBLE: u8 = 6;
    pub const CONSTANT_CLASS: u8 = 7;
    pub const CONSTANT_STRING: u8 = 8;
    pub const CONSTANT_FIELDREF: u8 = 9;
    pub const CONSTANT_METHODREF: u8 = 10;
    pub const CONSTANT_INTERFACEMETHODREF: u8 = 11;
    pub const CONSTANT_NAMEANDTYPE: u8 = 12;
    pub const CONSTANT_METHODHANDLE: u8 = 15;
    pub const CONSTANT_METHODTYPE: u8 = 16;
    pub const CONSTANT_DYNAMIC: u8 = 17;
    pub const CONSTANT_INVOKEDYNAMIC: u8 = 18;
    pub const CONSTANT_MODULE: u8 = 19;
    pub const CONSTANT_PACKAGE: u8 = 20;
}

use constant_tags::*;

/// One constant pool entry. Cross references are typed indices, so an entry
/// can never hold index 0; whether the target exists and has the right kind
/// is checked by `verify`.
#[derive(Debug, Clone)]
pub enum Constant {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class(Utf8Index),
    String(Utf8Index),
    FieldRef {
        class: ClassIndex,
        name_and_type: NameAndTypeIndex,
    },
    MethodRef {
        class: ClassIndex,
        name_and_type: NameAndTypeIndex,
    },
    InterfaceMethodRef {
        class: ClassIndex,
        name_and_type: NameAndTypeIndex,
    },
    NameAndType {
        name: Utf8Index,
        descriptor: Utf8Index,
    },
    MethodHandle {
        kind: ReferenceKind,
        reference: RawConstPoolIndex,
    },
    MethodType(Utf8Index),
    /// `bootstrap_method_attr` indexes the BootstrapMethods attribute, not the pool
    Dynamic {
        bootstrap_method_attr: u16,
        name_and_type: NameAndTypeIndex,
    },
    InvokeDynamic {
        bootstrap_method_attr: u16,
        name_and_type: NameAndTypeIndex,
    },
    Module(Utf8Index),
    Package(Utf8Index),
}

impl Constant {
    pub fn tag(&self) -> u8 {
        match self {
            Constant::Utf8(_) => CONSTANT_UTF8,
            Constant::Integer(_) => CONSTANT_INTEGER,
            Constant::Float(_) => CONSTANT_FLOAT,
            Constant::Long(_) => CONSTANT_LONG,
            Constant::Double(_) => CONSTANT_DOUBLE,
            Constant::Class(_) => CONSTANT_CLASS,
            Constant::String(_) => CONSTANT_STRING,
            Constant::FieldRef { .. } => CONSTANT_FIELDREF,
            Constant::MethodRef { .. } => CONSTANT_METHODREF,
            Constant::InterfaceMethodRef { .. } => CONSTANT_INTERFACEMETHODREF,
            Constant::NameAndType { .. } => CONSTANT_NAMEANDTYPE,
            Constant::MethodHandle { .. } => CONSTANT_METHODHANDLE,
            Constant::MethodType(_) => CONSTANT_METHODTYPE,
            Constant::Dynamic { .. } => CONSTANT_DYNAMIC,
            Constant::InvokeDynamic { .. } => CONSTANT_INVOKEDYNAMIC,
            Constant::Module(_) => CONSTANT_MODULE,
            Constant::Package(_) => CONSTANT_PACKAGE,
        }
    }

    /// JVMS name of this entry's kind, e.g. `CONSTANT_Methodref`
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constant::Utf8(_) => ConstUtf8Info::NAME,
            Constant::Integer(_) => "CONSTANT_Integer",
            Constant::Float(_) => "CONSTANT_Float",
            Constant::Long(_) => "CONSTANT_Long",
            Constant::Double(_) => "CONSTANT_Double",
            Constant::Class(_) => ConstClassInfo::NAME,
            Constant::String(_) => ConstStringInfo::NAME,
            Constant::FieldRef { .. } => ConstFieldRefInfo::NAME,
            Constant::MethodRef { .. } => ConstMethodRefInfo::NAME,
            Constant::InterfaceMethodRef { .. } => ConstInterfaceMethodRefInfo::NAME,
            Constant::NameAndType { .. } => ConstNameAndTypeInfo::NAME,
            Constant::MethodHandle { .. } => ConstMethodHandleInfo::NAME,
            Constant::MethodType(_) => ConstMethodTypeInfo::NAME,
            Constant::Dynamic { .. } => ConstDynamicInfo::NAME,
            Constant::InvokeDynamic { .. } => ConstInvokeDynamicInfo::NAME,
            Constant::Module(_) => ConstModuleInfo::NAME,
            Constant::Package(_) => ConstPackageInfo::NAME,
        }
    }

    /// Slots taken in the pool: Long and Double occupy two
    pub fn slot_width(&self) -> usize {
        match self {
            Constant::Long(_) | Constant::Double(_) => 2,
            _ => 1,
        }
    }

    pub fn as_utf8(&self) -> Option<&str> {
        match self {
            Constant::Utf8(value) => Some(value),
            _ => None,
        }
    }

    /// Read one tagged entry
    pub fn read_from<R: Read>(reader: &mut R) -> CpInfoResult<Self> {
        let tag = reader.read_u8()?;
        let constant = match tag {
            CONSTANT_UTF8 => {
                let len = reader.read_u16::<BigEndian>()? as usize;
                let mut bytes = vec![0u8; len];
                reader.read_exact(&mut bytes)?;
                Constant::Utf8(mutf8::decode(&bytes)?)
            }
            CONSTANT_INTEGER => Constant::Integer(reader.read_i32::<BigEndian>()?),
            CONSTANT_FLOAT => Constant::Float(f32::from_bits(reader.read_u32::<BigEndian>()?)),
            CONSTANT_LONG => Constant::Long(reader.read_i64::<BigEndian>()?),
            CONSTANT_DOUBLE => Constant::Double(f64::from_bits(reader.read_u64::<BigEndian>()?)),
            CONSTANT_CLASS => Constant::Class(read_index(reader)?),
            CONSTANT_STRING => Constant::String(read_index(reader)?),
            CONSTANT_FIELDREF => Constant::FieldRef {
                class: read_index(reader)?,
                name_and_type: read_index(reader)?,
            },
            CONSTANT_METHODREF => Constant::MethodRef {
                class: read_index(reader)?,
                name_and_type: read_index(reader)?,
            },
            CONSTANT_INTERFACEMETHODREF => Constant::InterfaceMethodRef {
                class: read_index(reader)?,
                name_and_type: read_index(reader)?,
            },
            CONSTANT_NAMEANDTYPE => Constant::NameAndType {
                name: read_index(reader)?,
                descriptor: read_index(reader)?,
            },
            CONSTANT_METHODHANDLE => Constant::MethodHandle {
                kind: ReferenceKind::from_u8(reader.read_u8()?)?,
                reference: RawConstPoolIndex::new(reader.read_u16::<BigEndian>()?)?,
            },
            CONSTANT_METHODTYPE => Constant::MethodType(read_index(reader)?),
            CONSTANT_DYNAMIC => Constant::Dynamic {
                bootstrap_method_attr: reader.read_u16::<BigEndian>()?,
                name_and_type: read_index(reader)?,
            },
            CONSTANT_INVOKEDYNAMIC => Constant::InvokeDynamic {
                bootstrap_method_attr: reader.read_u16::<BigEndian>()?,
                name_and_type: read_index(reader)?,
            },
            CONSTANT_MODULE => Constant::Module(read_index(reader)?),
            CONSTANT_PACKAGE => Constant::Package(read_index(reader)?),
            other => return Err(CpInfoError::UnknownTag(other)),
        };
        Ok(constant)
    }
}

fn read_index<R: Read, T: ConstPoolEntryInfo>(reader: &mut R) -> CpInfoResult<ConstPoolIndex<T>> {
    ConstPoolIndex::new(reader.read_u16::<BigEndian>()?)
}

impl ClassfileWritable for Constant {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) -> CpInfoResult<()> {
        // encode before writing the tag so a failure leaves nothing behind
        let utf8 = match self {
            Constant::Utf8(value) => Some(mutf8::encode_bounded(value)?),
            _ => None,
        };
        buffer.write_u8(self.tag())?;
        match self {
            Constant::Utf8(_) => {
                let bytes = utf8.unwrap_or_default();
                buffer.write_u16::<BigEndian>(bytes.len() as u16)?;
                buffer.write_all(&bytes)?;
            }
            Constant::Integer(value) => buffer.write_i32::<BigEndian>(*value)?,
            Constant::Float(value) => buffer.write_u32::<BigEndian>(value.to_bits())?,
            Constant::Long(value) => buffer.write_i64::<BigEndian>(*value)?,
            Constant::Double(value) => buffer.write_u64::<BigEndian>(value.to_bits())?,
            Constant::Class(index)
            | Constant::String(index)
            | Constant::MethodType(index)
            | Constant::Module(index)
            | Constant::Package(index) => buffer.write_all(&index.to_bytes())?,
            Constant::FieldRef { class, name_and_type }
            | Constant::MethodRef { class, name_and_type }
            | Constant::InterfaceMethodRef { class, name_and_type } => {
                buffer.write_all(&class.to_bytes())?;
                buffer.write_all(&name_and_type.to_bytes())?;
            }
            Constant::NameAndType { name, descriptor } => {
                buffer.write_all(&name.to_bytes())?;
                buffer.write_all(&descriptor.to_bytes())?;
            }
            Constant::MethodHandle { kind, reference } => {
                buffer.write_u8(kind.as_u8())?;
                buffer.write_u16::<BigEndian>(reference.as_u16())?;
            }
            Constant::Dynamic { bootstrap_method_attr, name_and_type }
            | Constant::InvokeDynamic { bootstrap_method_attr, name_and_type } => {
                buffer.write_u16::<BigEndian>(*bootstrap_method_attr)?;
                buffer.write_all(&name_and_type.to_bytes())?;
            }
        }
        Ok(())
    }
}

// Floats compare by bit pattern so NaN payloads survive a read/write round trip
impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        use Constant::*;
        match (self, other) {
            (Utf8(a), Utf8(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Long(a), Long(b)) => a == b,
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (Class(a), Class(b))
            | (String(a), String(b))
            | (MethodType(a), MethodType(b))
            | (Module(a), Module(b))
            | (Package(a), Package(b)) => a == b,
            (FieldRef { class: c1, name_and_type: n1 }, FieldRef { class: c2, name_and_type: n2 })
            | (MethodRef { class: c1, name_and_type: n1 }, MethodRef { class: c2, name_and_type: n2 })
            | (
                InterfaceMethodRef { class: c1, name_and_type: n1 },
                InterfaceMethodRef { class: c2, name_and_type: n2 },
            ) => c1 == c2 && n1 == n2,
            (NameAndType { name: n1, descriptor: d1 }, NameAndType { name: n2, descriptor: d2 }) => {
                n1 == n2 && d1 == d2
            }
            (MethodHandle { kind: k1, reference: r1 }, MethodHandle { kind: k2, reference: r2 }) => {
                k1 == k2 && r1 == r2
            }
            (
                Dynamic { bootstrap_method_attr: b1, name_and_type: n1 },
                Dynamic { bootstrap_method_attr: b2, name_and_type: n2 },
            )
            | (
                InvokeDynamic { bootstrap_method_attr: b1, name_and_type: n1 },
                InvokeDynamic { bootstrap_method_attr: b2, name_and_type: n2 },
            ) => b1 == b2 && n1 == n2,
            _ => false,
        }
    }
}

impl Eq for Constant {}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Utf8(value) => write!(f, "Utf8 {}", value),
            Constant::Integer(value) => write!(f, "Integer {}", value),
            Constant::Float(value) => write!(f, "Float {}f", value),
            Constant::Long(value) => write!(f, "Long {}l", value),
            Constant::Double(value) => write!(f, "Double {}d", value),
            Constant::Class(name) => write!(f, "Class #{}", name.as_u16()),
            Constant::String(value) => write!(f, "String #{}", value.as_u16()),
            Constant::FieldRef { class, name_and_type } => {
                write!(f, "Fieldref #{}.#{}", class.as_u16(), name_and_type.as_u16())
            }
            Constant::MethodRef { class, name_and_type } => {
                write!(f, "Methodref #{}.#{}", class.as_u16(), name_and_type.as_u16())
            }
            Constant::InterfaceMethodRef { class, name_and_type } => {
                write!(f, "InterfaceMethodref #{}.#{}", class.as_u16(), name_and_type.as_u16())
            }
            Constant::NameAndType { name, descriptor } => {
                write!(f, "NameAndType #{}:#{}", name.as_u16(), descriptor.as_u16())
            }
            Constant::MethodHandle { kind, reference } => write!(f, "MethodHandle {}:{}", kind, reference),
            Constant::MethodType(descriptor) => write!(f, "MethodType #{}", descriptor.as_u16()),
            Constant::Dynamic { bootstrap_method_attr, name_and_type } => {
                write!(f, "Dynamic #{}:#{}", bootstrap_method_attr, name_and_type.as_u16())
            }
            Constant::InvokeDynamic { bootstrap_method_attr, name_and_type } => {
                write!(f, "InvokeDynamic #{}:#{}", bootstrap_method_attr, name_and_type.as_u16())
            }
            Constant::Module(name) => write!(f, "Module #{}", name.as_u16()),
            Constant::Package(name) => write!(f, "Package #{}", name.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn utf8(index: u16) -> Utf8Index {
        Utf8Index::new(index).unwrap()
    }

    #[test]
    fn test_class_entry_layout() {
        let bytes = Constant::Class(utf8(2)).to_classfile_bytes().unwrap();
        assert_eq!(bytes, vec![CONSTANT_CLASS, 0x00, 0x02]);
    }

    #[test]
    fn test_method_handle_layout() {
        let handle = Constant::MethodHandle {
            kind: ReferenceKind::InvokeStatic,
            reference: RawConstPoolIndex::new(0x0102).unwrap(),
        };
        assert_eq!(handle.to_classfile_bytes().unwrap(), vec![CONSTANT_METHODHANDLE, 6, 0x01, 0x02]);
    }

    #[test]
    fn test_nan_survives_round_trip() {
        let nan = Constant::Float(f32::from_bits(0x7FC0_0001));
        let bytes = nan.to_classfile_bytes().unwrap();
        let back = Constant::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(back, nan);
        assert_ne!(Constant::Double(0.0), Constant::Double(-0.0));
    }

    #[test]
    fn test_zero_index_is_constraint_violation() {
        let bytes = [CONSTANT_STRING, 0x00, 0x00];
        assert!(matches!(
            Constant::read_from(&mut Cursor::new(&bytes[..])),
            Err(CpInfoError::ConstraintViolation { value: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_tag_and_kind() {
        assert!(matches!(Constant::read_from(&mut Cursor::new(&[2u8][..])), Err(CpInfoError::UnknownTag(2))));
        let bad_kind = [CONSTANT_METHODHANDLE, 12, 0x00, 0x01];
        assert!(matches!(
            Constant::read_from(&mut Cursor::new(&bad_kind[..])),
            Err(CpInfoError::UnknownReferenceKind(12))
        ));
    }

    #[test]
    fn test_truncated_input_is_io_error() {
        let bytes = [CONSTANT_LONG, 0x00, 0x01];
        assert!(matches!(Constant::read_from(&mut Cursor::new(&bytes[..])), Err(CpInfoError::Io(_))));
    }

    #[test]
    fn test_slot_width() {
        assert_eq!(Constant::Long(1).slot_width(), 2);
        assert_eq!(Constant::Double(1.0).slot_width(), 2);
        assert_eq!(Constant::Integer(1).slot_width(), 1);
    }
}
