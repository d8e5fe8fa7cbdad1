//! Cross-reference checks over a whole constant pool

use super::constant::Constant;
use super::error::{CpInfoError, CpInfoResult};
use super::pool::ConstantPool;
use super::typed_index::*;

/// Verify that every index in `pool` names a live entry of the right kind
pub fn verify(pool: &ConstantPool) -> CpInfoResult<()> {
    let problems = verify_all(pool);
    match problems.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(()),
    }
}

/// Every problem found, in pool order
pub fn verify_all(pool: &ConstantPool) -> Vec<CpInfoError> {
    let mut problems = Vec::new();
    for (index, constant) in pool.iter() {
        if let Err(problem) = verify_entry(pool, constant) {
            log::debug!("constant pool entry {} ({}): {}", index, constant.kind_name(), problem);
            problems.push(problem);
        }
    }
    problems
}

fn expect<T: ConstPoolEntryInfo>(pool: &ConstantPool, index: ConstPoolIndex<T>) -> CpInfoResult<()> {
    pool.get_typed(index).map(|_| ())
}

fn verify_entry(pool: &ConstantPool, constant: &Constant) -> CpInfoResult<()> {
    match constant {
        Constant::Class(name)
        | Constant::String(name)
        | Constant::MethodType(name)
        | Constant::Module(name)
        | Constant::Package(name) => expect(pool, *name),
        Constant::FieldRef { class, name_and_type }
        | Constant::MethodRef { class, name_and_type }
        | Constant::InterfaceMethodRef { class, name_and_type } => {
            expect(pool, *class)?;
            expect(pool, *name_and_type)
        }
        Constant::NameAndType { name, descriptor } => {
            expect(pool, *name)?;
            expect(pool, *descriptor)
        }
        Constant::MethodHandle { kind, reference } => {
            let target = pool
                .get(reference.as_u16())
                .ok_or(CpInfoError::InvalidIndex(reference.as_u16()))?;
            if kind.accepts(target) {
                Ok(())
            } else {
                Err(CpInfoError::WrongEntryType {
                    index: reference.as_u16(),
                    expected: kind.expected_target(),
                    found: target.kind_name(),
                })
            }
        }
        // the bootstrap index points into an attribute outside the pool
        Constant::Dynamic { name_and_type, .. } | Constant::InvokeDynamic { name_and_type, .. } => {
            expect(pool, *name_and_type)
        }
        Constant::Utf8(_)
        | Constant::Integer(_)
        | Constant::Float(_)
        | Constant::Long(_)
        | Constant::Double(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpinfo::reference_kind::ReferenceKind;

    #[test]
    fn test_pool_built_with_add_is_valid() {
        let mut pool = ConstantPool::new();
        let method = pool.add_method_ref("java/lang/Math", "abs", "(I)I").unwrap();
        pool.add_method_handle(ReferenceKind::InvokeStatic, method.as_raw()).unwrap();
        pool.add_invoke_dynamic(0, "run", "()Ljava/lang/Runnable;").unwrap();
        assert!(verify(&pool).is_ok());
    }

    #[test]
    fn test_dangling_index() {
        let mut pool = ConstantPool::new();
        pool.add(Constant::Class(Utf8Index::new(9).unwrap())).unwrap();
        assert!(matches!(verify(&pool), Err(CpInfoError::InvalidIndex(9))));
    }

    #[test]
    fn test_method_handle_kind_mismatch() {
        let mut pool = ConstantPool::new();
        let field = pool.add_field_ref("Point", "x", "I").unwrap();
        pool.add_method_handle(ReferenceKind::InvokeVirtual, field.as_raw()).unwrap();
        let problems = verify_all(&pool);
        assert_eq!(problems.len(), 1);
        assert!(matches!(
            problems[0],
            CpInfoError::WrongEntryType { expected: "CONSTANT_Methodref", found: "CONSTANT_Fieldref", .. }
        ));
    }

    #[test]
    fn test_reference_to_dead_slot() {
        let mut pool = ConstantPool::new();
        pool.add_long(5).unwrap();
        pool.add(Constant::String(Utf8Index::new(2).unwrap())).unwrap();
        assert!(matches!(verify(&pool), Err(CpInfoError::InvalidIndex(2))));
    }
}
