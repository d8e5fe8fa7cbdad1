//! Constant pool indices tagged with the entry kind they point at

use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroU16;

use super::constant::Constant;
use super::error::{CpInfoError, CpInfoResult};

/// Raw, untyped constant pool index. Slot 0 does not exist, so neither does
/// index 0.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Debug)]
pub struct RawConstPoolIndex(NonZeroU16);

impl RawConstPoolIndex {
    pub fn new(value: u16) -> CpInfoResult<Self> {
        NonZeroU16::new(value)
            .map(Self)
            .ok_or_else(|| CpInfoError::constraint("constant pool index", value))
    }

    /// Index as written in the class file
    pub fn as_u16(&self) -> u16 {
        self.0.get()
    }

    /// Zero-based position in the pool's slot table
    pub fn slot(&self) -> usize {
        self.0.get() as usize - 1
    }
}

impl TryFrom<u16> for RawConstPoolIndex {
    type Error = CpInfoError;

    fn try_from(value: u16) -> CpInfoResult<Self> {
        Self::new(value)
    }
}

impl From<RawConstPoolIndex> for u16 {
    fn from(index: RawConstPoolIndex) -> u16 {
        index.as_u16()
    }
}

impl fmt::Display for RawConstPoolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index expected to name an entry of kind `T`
pub struct ConstPoolIndex<T: ConstPoolEntryInfo>(RawConstPoolIndex, PhantomData<T>);

impl<T: ConstPoolEntryInfo> ConstPoolIndex<T> {
    pub fn new(value: u16) -> CpInfoResult<Self> {
        RawConstPoolIndex::new(value).map(Self::from)
    }

    /// Drop the entry-kind tag
    pub fn as_raw(&self) -> RawConstPoolIndex {
        self.0
    }

    /// Index as written in the class file
    pub fn as_u16(&self) -> u16 {
        self.0.as_u16()
    }

    /// Big-endian bytes as written in the class file
    pub fn to_bytes(&self) -> [u8; 2] {
        self.0.as_u16().to_be_bytes()
    }
}

// Derives would bound `T`
impl<T: ConstPoolEntryInfo> Clone for ConstPoolIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ConstPoolEntryInfo> Copy for ConstPoolIndex<T> {}

impl<T: ConstPoolEntryInfo> PartialEq for ConstPoolIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: ConstPoolEntryInfo> Eq for ConstPoolIndex<T> {}

impl<T: ConstPoolEntryInfo> std::hash::Hash for ConstPoolIndex<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: ConstPoolEntryInfo> fmt::Debug for ConstPoolIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Index({})", T::NAME, self.0.as_u16())
    }
}

impl<T: ConstPoolEntryInfo> From<RawConstPoolIndex> for ConstPoolIndex<T> {
    fn from(raw: RawConstPoolIndex) -> Self {
        Self(raw, PhantomData)
    }
}

impl<T: ConstPoolEntryInfo> TryFrom<u16> for ConstPoolIndex<T> {
    type Error = CpInfoError;

    fn try_from(value: u16) -> CpInfoResult<Self> {
        Self::new(value)
    }
}

impl<T: ConstPoolEntryInfo> From<ConstPoolIndex<T>> for RawConstPoolIndex {
    fn from(index: ConstPoolIndex<T>) -> Self {
        index.0
    }
}

impl<T: ConstPoolEntryInfo> From<ConstPoolIndex<T>> for u16 {
    fn from(index: ConstPoolIndex<T>) -> u16 {
        index.as_u16()
    }
}

/// Entry kind an index can be tagged with
pub trait ConstPoolEntryInfo {
    /// JVMS name of the entry kind, used in diagnostics
    const NAME: &'static str;

    /// Whether `entry` is of this kind
    fn is_valid_entry(entry: &Constant) -> bool;
}

/// Indices for each entry kind that other entries reference
pub type Utf8Index = ConstPoolIndex<ConstUtf8Info>;
pub type ClassIndex = ConstPoolIndex<ConstClassInfo>;
pub type StringIndex = ConstPoolIndex<ConstStringInfo>;
pub type NameAndTypeIndex = ConstPoolIndex<ConstNameAndTypeInfo>;
pub type FieldRefIndex = ConstPoolIndex<ConstFieldRefInfo>;
pub type MethodRefIndex = ConstPoolIndex<ConstMethodRefInfo>;
pub type InterfaceMethodRefIndex = ConstPoolIndex<ConstInterfaceMethodRefInfo>;
pub type MethodHandleIndex = ConstPoolIndex<ConstMethodHandleInfo>;
pub type MethodTypeIndex = ConstPoolIndex<ConstMethodTypeInfo>;
pub type DynamicIndex = ConstPoolIndex<ConstDynamicInfo>;
pub type InvokeDynamicIndex = ConstPoolIndex<ConstInvokeDynamicInfo>;
pub type ModuleIndex = ConstPoolIndex<ConstModuleInfo>;
pub type PackageIndex = ConstPoolIndex<ConstPackageInfo>;

macro_rules! entry_markers {
    ($($marker:ident => $name:literal, $pattern:pat),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $marker;

            impl ConstPoolEntryInfo for $marker {
                const NAME: &'static str = $name;

                fn is_valid_entry(entry: &Constant) -> bool {
                    matches!(entry, $pattern)
                }
            }
        )*
    };
}

entry_markers! {
    ConstUtf8Info => "CONSTANT_Utf8", Constant::Utf8(_),
    ConstClassInfo => "CONSTANT_Class", Constant::Class(_),
    ConstStringInfo => "CONSTANT_String", Constant::String(_),
    ConstNameAndTypeInfo => "CONSTANT_NameAndType", Constant::NameAndType { .. },
    ConstFieldRefInfo => "CONSTANT_Fieldref", Constant::FieldRef { .. },
    ConstMethodRefInfo => "CONSTANT_Methodref", Constant::MethodRef { .. },
    ConstInterfaceMethodRefInfo => "CONSTANT_InterfaceMethodref", Constant::InterfaceMethodRef { .. },
    ConstMethodHandleInfo => "CONSTANT_MethodHandle", Constant::MethodHandle { .. },
    ConstMethodTypeInfo => "CONSTANT_MethodType", Constant::MethodType(_),
    ConstDynamicInfo => "CONSTANT_Dynamic", Constant::Dynamic { .. },
    ConstInvokeDynamicInfo => "CONSTANT_InvokeDynamic", Constant::InvokeDynamic { .. },
    ConstModuleInfo => "CONSTANT_Module", Constant::Module(_),
    ConstPackageInfo => "CONSTANT_Package", Constant::Package(_),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_index_rejected() {
        assert!(matches!(
            RawConstPoolIndex::new(0),
            Err(CpInfoError::ConstraintViolation { value: 0, .. })
        ));
        assert!(ClassIndex::try_from(0u16).is_err());
    }

    #[test]
    fn test_typed_index_conversion() {
        let class_index = ClassIndex::new(100).unwrap();
        let raw_index: RawConstPoolIndex = class_index.into();
        let u16_value: u16 = class_index.into();

        assert_eq!(raw_index.as_u16(), 100);
        assert_eq!(raw_index.slot(), 99);
        assert_eq!(u16_value, 100);
        assert_eq!(class_index.to_bytes(), [0, 100]);
        assert_eq!(format!("{:?}", class_index), "CONSTANT_ClassIndex(100)");
    }

    #[test]
    fn test_every_marker_names_its_entry_kind() {
        let name = Utf8Index::new(1).unwrap();
        let name_and_type = NameAndTypeIndex::new(2).unwrap();
        let entries = [
            Constant::Utf8("x".to_string()),
            Constant::Class(name),
            Constant::NameAndType { name, descriptor: name },
            Constant::InvokeDynamic { bootstrap_method_attr: 0, name_and_type },
            Constant::Package(name),
        ];
        for entry in &entries {
            let accepted = [
                ConstUtf8Info::is_valid_entry(entry),
                ConstClassInfo::is_valid_entry(entry),
                ConstNameAndTypeInfo::is_valid_entry(entry),
                ConstInvokeDynamicInfo::is_valid_entry(entry),
                ConstPackageInfo::is_valid_entry(entry),
            ];
            assert_eq!(accepted.iter().filter(|ok| **ok).count(), 1, "{:?}", entry);
        }
        assert_eq!(ConstInvokeDynamicInfo::NAME, "CONSTANT_InvokeDynamic");
        assert_eq!(ConstPackageInfo::NAME, "CONSTANT_Package");
    }

    #[test]
    fn test_const_pool_entry_info() {
        let name = Utf8Index::new(1).unwrap();
        let class_constant = Constant::Class(name);
        let string_constant = Constant::String(name);

        assert!(ConstClassInfo::is_valid_entry(&class_constant));
        assert!(!ConstClassInfo::is_valid_entry(&string_constant));

        assert!(ConstStringInfo::is_valid_entry(&string_constant));
        assert!(!ConstStringInfo::is_valid_entry(&class_constant));
    }
}
