use std::fmt;

use super::constant::Constant;
use super::error::{CpInfoError, CpInfoResult};

/// `reference_kind` of a CONSTANT_MethodHandle entry (JVMS §5.4.3.5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    GetField = 1,
    GetStatic = 2,
    PutField = 3,
    PutStatic = 4,
    InvokeVirtual = 5,
    InvokeStatic = 6,
    InvokeSpecial = 7,
    NewInvokeSpecial = 8,
    InvokeInterface = 9,
}

impl ReferenceKind {
    pub fn from_u8(value: u8) -> CpInfoResult<Self> {
        Ok(match value {
            1 => ReferenceKind::GetField,
            2 => ReferenceKind::GetStatic,
            3 => ReferenceKind::PutField,
            4 => ReferenceKind::PutStatic,
            5 => ReferenceKind::InvokeVirtual,
            6 => ReferenceKind::InvokeStatic,
            7 => ReferenceKind::InvokeSpecial,
            8 => ReferenceKind::NewInvokeSpecial,
            9 => ReferenceKind::InvokeInterface,
            other => return Err(CpInfoError::UnknownReferenceKind(other)),
        })
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Mnemonic as printed by `javap`, e.g. `REF_invokeStatic`
    pub fn mnemonic(self) -> &'static str {
        match self {
            ReferenceKind::GetField => "REF_getField",
            ReferenceKind::GetStatic => "REF_getStatic",
            ReferenceKind::PutField => "REF_putField",
            ReferenceKind::PutStatic => "REF_putStatic",
            ReferenceKind::InvokeVirtual => "REF_invokeVirtual",
            ReferenceKind::InvokeStatic => "REF_invokeStatic",
            ReferenceKind::InvokeSpecial => "REF_invokeSpecial",
            ReferenceKind::NewInvokeSpecial => "REF_newInvokeSpecial",
            ReferenceKind::InvokeInterface => "REF_invokeInterface",
        }
    }

    /// Whether a method handle of this kind may point at `target`
    pub fn accepts(self, target: &Constant) -> bool {
        match self {
            ReferenceKind::GetField
            | ReferenceKind::GetStatic
            | ReferenceKind::PutField
            | ReferenceKind::PutStatic => matches!(target, Constant::FieldRef { .. }),
            ReferenceKind::InvokeVirtual | ReferenceKind::NewInvokeSpecial => {
                matches!(target, Constant::MethodRef { .. })
            }
            ReferenceKind::InvokeStatic | ReferenceKind::InvokeSpecial => {
                matches!(target, Constant::MethodRef { .. } | Constant::InterfaceMethodRef { .. })
            }
            ReferenceKind::InvokeInterface => matches!(target, Constant::InterfaceMethodRef { .. }),
        }
    }

    /// Description of the acceptable targets, for diagnostics
    pub fn expected_target(self) -> &'static str {
        match self {
            ReferenceKind::GetField
            | ReferenceKind::GetStatic
            | ReferenceKind::PutField
            | ReferenceKind::PutStatic => "CONSTANT_Fieldref",
            ReferenceKind::InvokeVirtual | ReferenceKind::NewInvokeSpecial => "CONSTANT_Methodref",
            ReferenceKind::InvokeStatic | ReferenceKind::InvokeSpecial => {
                "CONSTANT_Methodref or CONSTANT_InterfaceMethodref"
            }
            ReferenceKind::InvokeInterface => "CONSTANT_InterfaceMethodref",
        }
    }
}

impl TryFrom<u8> for ReferenceKind {
    type Error = CpInfoError;

    fn try_from(value: u8) -> CpInfoResult<Self> {
        Self::from_u8(value)
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_kinds() {
        for value in 1..=9u8 {
            assert_eq!(ReferenceKind::from_u8(value).unwrap().as_u8(), value);
        }
    }

    #[test]
    fn test_out_of_range_kinds() {
        assert!(matches!(ReferenceKind::from_u8(0), Err(CpInfoError::UnknownReferenceKind(0))));
        assert!(matches!(ReferenceKind::try_from(10), Err(CpInfoError::UnknownReferenceKind(10))));
    }
}
