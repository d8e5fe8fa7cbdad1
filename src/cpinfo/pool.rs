//! The constant pool table

use std::collections::HashMap;
use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::constant::Constant;
use super::error::{CpInfoError, CpInfoResult};
use super::mutf8;
use super::reference_kind::ReferenceKind;
use super::typed_index::*;
use super::writer::ClassfileWritable;

/// Highest usable index; `constant_pool_count` itself must fit in a u16
const MAX_SLOTS: usize = u16::MAX as usize - 1;

/// 1-based table of entries. Long and Double take two indices; the second
/// one is a dead slot that nothing may reference.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    slots: Vec<Option<Constant>>,
    /// Encoded entry to the first slot holding it
    lookup: HashMap<Vec<u8>, RawConstPoolIndex>,
}

impl PartialEq for ConstantPool {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for ConstantPool {}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots, dead ones included; `constant_pool_count - 1`
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Value of the class file's `constant_pool_count` field
    pub fn count(&self) -> u16 {
        (self.slots.len() + 1) as u16
    }

    /// Entry at `index`, or `None` for 0, out-of-range and dead slots
    pub fn get(&self, index: u16) -> Option<&Constant> {
        let raw = RawConstPoolIndex::new(index).ok()?;
        self.slots.get(raw.slot())?.as_ref()
    }

    /// Entry at a typed index, checked to be of the expected kind
    pub fn get_typed<T: ConstPoolEntryInfo>(&self, index: ConstPoolIndex<T>) -> CpInfoResult<&Constant> {
        let entry = self
            .get(index.as_u16())
            .ok_or(CpInfoError::InvalidIndex(index.as_u16()))?;
        if T::is_valid_entry(entry) {
            Ok(entry)
        } else {
            Err(CpInfoError::WrongEntryType {
                index: index.as_u16(),
                expected: T::NAME,
                found: entry.kind_name(),
            })
        }
    }

    pub fn utf8(&self, index: Utf8Index) -> CpInfoResult<&str> {
        match self.get_typed(index)? {
            Constant::Utf8(value) => Ok(value.as_str()),
            other => Err(CpInfoError::WrongEntryType {
                index: index.as_u16(),
                expected: ConstUtf8Info::NAME,
                found: other.kind_name(),
            }),
        }
    }

    /// Internal-form name of a CONSTANT_Class entry, e.g. `java/lang/Object`
    pub fn class_name(&self, index: ClassIndex) -> CpInfoResult<&str> {
        match self.get_typed(index)? {
            Constant::Class(name) => self.utf8(*name),
            other => Err(CpInfoError::WrongEntryType {
                index: index.as_u16(),
                expected: ConstClassInfo::NAME,
                found: other.kind_name(),
            }),
        }
    }

    /// `(name, descriptor)` of a CONSTANT_NameAndType entry
    pub fn name_and_type(&self, index: NameAndTypeIndex) -> CpInfoResult<(&str, &str)> {
        match self.get_typed(index)? {
            Constant::NameAndType { name, descriptor } => Ok((self.utf8(*name)?, self.utf8(*descriptor)?)),
            other => Err(CpInfoError::WrongEntryType {
                index: index.as_u16(),
                expected: ConstNameAndTypeInfo::NAME,
                found: other.kind_name(),
            }),
        }
    }

    /// Live entries with their indices, dead slots skipped
    pub fn iter(&self) -> impl Iterator<Item = (RawConstPoolIndex, &Constant)> + '_ {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            let constant = entry.as_ref()?;
            let index = RawConstPoolIndex::new((slot + 1) as u16).ok()?;
            Some((index, constant))
        })
    }

    /// Index of an entry equal to `constant`, if present
    pub fn find(&self, constant: &Constant) -> Option<RawConstPoolIndex> {
        let key = constant.to_classfile_bytes().ok()?;
        self.lookup.get(&key).copied()
    }

    /// Add `constant`, reusing an equal entry when one exists
    pub fn add(&mut self, constant: Constant) -> CpInfoResult<RawConstPoolIndex> {
        if let Some(existing) = self.find(&constant) {
            return Ok(existing);
        }
        if let Constant::Utf8(value) = &constant {
            let len = mutf8::encoded_len(value);
            if len > mutf8::MAX_ENCODED_LEN {
                return Err(CpInfoError::StringTooLong(len));
            }
        }
        self.push(constant)
    }

    fn push(&mut self, constant: Constant) -> CpInfoResult<RawConstPoolIndex> {
        let width = constant.slot_width();
        if self.slots.len() + width > MAX_SLOTS {
            return Err(CpInfoError::OutOfSpace);
        }
        let index = RawConstPoolIndex::new((self.slots.len() + 1) as u16)?;
        self.lookup.entry(constant.to_classfile_bytes()?).or_insert(index);
        self.slots.push(Some(constant));
        if width == 2 {
            self.slots.push(None);
        }
        Ok(index)
    }

    fn add_typed<T: ConstPoolEntryInfo>(&mut self, constant: Constant) -> CpInfoResult<ConstPoolIndex<T>> {
        self.add(constant).map(ConstPoolIndex::from)
    }

    pub fn add_utf8(&mut self, value: &str) -> CpInfoResult<Utf8Index> {
        self.add_typed(Constant::Utf8(value.to_string()))
    }

    pub fn add_class(&mut self, name: &str) -> CpInfoResult<ClassIndex> {
        let name_index = self.add_utf8(name)?;
        self.add_typed(Constant::Class(name_index))
    }

    pub fn add_string(&mut self, value: &str) -> CpInfoResult<StringIndex> {
        let utf8_index = self.add_utf8(value)?;
        self.add_typed(Constant::String(utf8_index))
    }

    pub fn add_name_and_type(&mut self, name: &str, descriptor: &str) -> CpInfoResult<NameAndTypeIndex> {
        let name = self.add_utf8(name)?;
        let descriptor = self.add_utf8(descriptor)?;
        self.add_typed(Constant::NameAndType { name, descriptor })
    }

    pub fn add_field_ref(&mut self, class: &str, name: &str, descriptor: &str) -> CpInfoResult<FieldRefIndex> {
        let class = self.add_class(class)?;
        let name_and_type = self.add_name_and_type(name, descriptor)?;
        self.add_typed(Constant::FieldRef { class, name_and_type })
    }

    pub fn add_method_ref(&mut self, class: &str, name: &str, descriptor: &str) -> CpInfoResult<MethodRefIndex> {
        let class = self.add_class(class)?;
        let name_and_type = self.add_name_and_type(name, descriptor)?;
        self.add_typed(Constant::MethodRef { class, name_and_type })
    }

    pub fn add_interface_method_ref(
        &mut self,
        class: &str,
        name: &str,
        descriptor: &str,
    ) -> CpInfoResult<InterfaceMethodRefIndex> {
        let class = self.add_class(class)?;
        let name_and_type = self.add_name_and_type(name, descriptor)?;
        self.add_typed(Constant::InterfaceMethodRef { class, name_and_type })
    }

    pub fn add_integer(&mut self, value: i32) -> CpInfoResult<RawConstPoolIndex> {
        self.add(Constant::Integer(value))
    }

    pub fn add_float(&mut self, value: f32) -> CpInfoResult<RawConstPoolIndex> {
        self.add(Constant::Float(value))
    }

    pub fn add_long(&mut self, value: i64) -> CpInfoResult<RawConstPoolIndex> {
        self.add(Constant::Long(value))
    }

    pub fn add_double(&mut self, value: f64) -> CpInfoResult<RawConstPoolIndex> {
        self.add(Constant::Double(value))
    }

    pub fn add_method_handle(
        &mut self,
        kind: ReferenceKind,
        reference: RawConstPoolIndex,
    ) -> CpInfoResult<MethodHandleIndex> {
        self.add_typed(Constant::MethodHandle { kind, reference })
    }

    pub fn add_method_type(&mut self, descriptor: &str) -> CpInfoResult<MethodTypeIndex> {
        let descriptor_index = self.add_utf8(descriptor)?;
        self.add_typed(Constant::MethodType(descriptor_index))
    }

    pub fn add_dynamic(
        &mut self,
        bootstrap_method_attr: u16,
        name: &str,
        descriptor: &str,
    ) -> CpInfoResult<DynamicIndex> {
        let name_and_type = self.add_name_and_type(name, descriptor)?;
        self.add_typed(Constant::Dynamic { bootstrap_method_attr, name_and_type })
    }

    pub fn add_invoke_dynamic(
        &mut self,
        bootstrap_method_attr: u16,
        name: &str,
        descriptor: &str,
    ) -> CpInfoResult<InvokeDynamicIndex> {
        let name_and_type = self.add_name_and_type(name, descriptor)?;
        self.add_typed(Constant::InvokeDynamic { bootstrap_method_attr, name_and_type })
    }

    pub fn add_module(&mut self, name: &str) -> CpInfoResult<ModuleIndex> {
        let name_index = self.add_utf8(name)?;
        self.add_typed(Constant::Module(name_index))
    }

    pub fn add_package(&mut self, name: &str) -> CpInfoResult<PackageIndex> {
        let name_index = self.add_utf8(name)?;
        self.add_typed(Constant::Package(name_index))
    }

    /// Read `constant_pool_count` followed by the entries
    pub fn read_from<R: Read>(reader: &mut R) -> CpInfoResult<Self> {
        let count = reader.read_u16::<BigEndian>()?;
        if count == 0 {
            return Err(CpInfoError::constraint("constant_pool_count", count));
        }
        let slots = count as usize - 1;
        log::debug!("reading constant pool with {} slots", slots);

        let mut pool = ConstantPool { slots: Vec::with_capacity(slots), lookup: HashMap::with_capacity(slots) };
        while pool.slots.len() < slots {
            let constant = Constant::read_from(reader)?;
            if pool.slots.len() + constant.slot_width() > slots {
                // a Long or Double in the last slot would overrun the count
                return Err(CpInfoError::constraint("constant_pool_count", count));
            }
            log::trace!("#{} = {}", pool.slots.len() + 1, constant);
            pool.push(constant)?;
        }
        Ok(pool)
    }
}

impl ClassfileWritable for ConstantPool {
    fn write_to_classfile<W: Write>(&self, buffer: &mut W) -> CpInfoResult<()> {
        buffer.write_u16::<BigEndian>(self.count())?;
        for (_, constant) in self.iter() {
            constant.write_to_classfile(buffer)?;
        }
        Ok(())
    }
}
