//! Package-exclusion rewrite
//!
//! Removes one package qualifier from every class type in a tree. Nodes are
//! rebuilt only along paths where something changed; every other subtree is
//! the original `Arc`, so an unaffected tree comes back pointer-identical.

use std::sync::Arc;

use super::nodes::*;

/// Structural rewrite dropping an exact package qualifier
pub trait PackageExclusion: Clone {
    /// The rewritten node, or `None` when nothing under it names `package`
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self>;

    fn exclude_package(&self, package: &PackageSpecifier) -> Self {
        self.without_package(package).unwrap_or_else(|| self.clone())
    }
}

/// Drop the package `package_name` (dotted or slashed) from every class type
/// in `tree`. A name that is not a valid package leaves the tree untouched.
pub fn exclude_package_name<T: PackageExclusion>(tree: &T, package_name: &str) -> T {
    match PackageSpecifier::from_package_name(package_name) {
        Ok(package) => tree.exclude_package(&package),
        Err(err) => {
            log::debug!("ignoring package exclusion '{}': {}", package_name, err);
            tree.clone()
        }
    }
}

fn rewrite_all<T: PackageExclusion>(items: &[T], package: &PackageSpecifier) -> Option<Vec<T>> {
    let rewritten: Vec<Option<T>> = items.iter().map(|item| item.without_package(package)).collect();
    if rewritten.iter().all(Option::is_none) {
        return None;
    }
    Some(
        rewritten
            .into_iter()
            .zip(items)
            .map(|(new, old)| new.unwrap_or_else(|| old.clone()))
            .collect(),
    )
}

fn rewrite_optional<T: PackageExclusion>(item: &Option<T>, package: &PackageSpecifier) -> Option<Option<T>> {
    item.as_ref().and_then(|inner| inner.without_package(package)).map(Some)
}

impl<T: PackageExclusion> PackageExclusion for Arc<T> {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        (**self).without_package(package).map(Arc::new)
    }
}

impl PackageExclusion for ClassTypeSignature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        let matches = self.package_specifier.as_ref() == Some(package);
        let simple = self.simple_class_type_signature.without_package(package);
        let suffixes = rewrite_all(&self.suffixes, package);
        if !matches && simple.is_none() && suffixes.is_none() {
            return None;
        }
        Some(ClassTypeSignature {
            package_specifier: if matches { None } else { self.package_specifier.clone() },
            simple_class_type_signature: simple.unwrap_or_else(|| self.simple_class_type_signature.clone()),
            suffixes: suffixes.unwrap_or_else(|| self.suffixes.clone()),
        })
    }
}

impl PackageExclusion for SimpleClassTypeSignature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        let type_arguments = rewrite_optional(&self.type_arguments, package)?;
        Some(SimpleClassTypeSignature { identifier: self.identifier.clone(), type_arguments })
    }
}

impl PackageExclusion for ClassTypeSignatureSuffix {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        self.simple_class_type_signature
            .without_package(package)
            .map(ClassTypeSignatureSuffix::new)
    }
}

impl PackageExclusion for TypeArgument {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        match self {
            TypeArgument::Unknown => None,
            TypeArgument::Bounded { wildcard, signature } => {
                signature.without_package(package).map(|signature| TypeArgument::Bounded {
                    wildcard: *wildcard,
                    signature,
                })
            }
        }
    }
}

impl PackageExclusion for TypeArguments {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        // rewriting never changes the element count, so the list stays non-empty
        rewrite_all(self.arguments(), package).and_then(|arguments| TypeArguments::new(arguments).ok())
    }
}

impl PackageExclusion for ArrayTypeSignature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        self.component
            .without_package(package)
            .map(|component| ArrayTypeSignature { component })
    }
}

impl PackageExclusion for ReferenceTypeSignature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        match self {
            ReferenceTypeSignature::Class(class) => class.without_package(package).map(ReferenceTypeSignature::Class),
            ReferenceTypeSignature::TypeVariable(_) => None,
            ReferenceTypeSignature::Array(array) => array.without_package(package).map(ReferenceTypeSignature::Array),
        }
    }
}

impl PackageExclusion for JavaTypeSignature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        match self {
            JavaTypeSignature::Base(_) => None,
            JavaTypeSignature::Reference(reference) => {
                reference.without_package(package).map(JavaTypeSignature::Reference)
            }
        }
    }
}

impl PackageExclusion for ResultType {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        match self {
            ResultType::Type(ty) => ty.without_package(package).map(ResultType::Type),
            ResultType::Void(_) => None,
        }
    }
}

impl PackageExclusion for ThrowsSignature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        match self {
            ThrowsSignature::Class(class) => class.without_package(package).map(ThrowsSignature::Class),
            ThrowsSignature::TypeVariable(_) => None,
        }
    }
}

impl PackageExclusion for ClassBound {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        rewrite_optional(&self.signature, package).map(|signature| ClassBound { signature })
    }
}

impl PackageExclusion for InterfaceBound {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        self.signature.without_package(package).map(|signature| InterfaceBound { signature })
    }
}

impl PackageExclusion for TypeParameter {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        let class_bound = self.class_bound.without_package(package);
        let interface_bounds = rewrite_all(&self.interface_bounds, package);
        if class_bound.is_none() && interface_bounds.is_none() {
            return None;
        }
        Some(TypeParameter {
            identifier: self.identifier.clone(),
            class_bound: class_bound.unwrap_or_else(|| self.class_bound.clone()),
            interface_bounds: interface_bounds.unwrap_or_else(|| self.interface_bounds.clone()),
        })
    }
}

impl PackageExclusion for TypeParameters {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        rewrite_all(self.parameters(), package).and_then(|parameters| TypeParameters::new(parameters).ok())
    }
}

impl PackageExclusion for ClassSignature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        let type_parameters = rewrite_optional(&self.type_parameters, package);
        let super_class = self.super_class.without_package(package);
        let super_interfaces = rewrite_all(&self.super_interfaces, package);
        if type_parameters.is_none() && super_class.is_none() && super_interfaces.is_none() {
            return None;
        }
        Some(ClassSignature {
            type_parameters: type_parameters.unwrap_or_else(|| self.type_parameters.clone()),
            super_class: super_class.unwrap_or_else(|| Arc::clone(&self.super_class)),
            super_interfaces: super_interfaces.unwrap_or_else(|| self.super_interfaces.clone()),
        })
    }
}

impl PackageExclusion for MethodSignature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        let type_parameters = rewrite_optional(&self.type_parameters, package);
        let parameters = rewrite_all(&self.parameters, package);
        let result = self.result.without_package(package);
        let throws = rewrite_all(&self.throws, package);
        if type_parameters.is_none() && parameters.is_none() && result.is_none() && throws.is_none() {
            return None;
        }
        Some(MethodSignature {
            type_parameters: type_parameters.unwrap_or_else(|| self.type_parameters.clone()),
            parameters: parameters.unwrap_or_else(|| self.parameters.clone()),
            result: result.unwrap_or_else(|| self.result.clone()),
            throws: throws.unwrap_or_else(|| self.throws.clone()),
        })
    }
}

impl PackageExclusion for Signature {
    fn without_package(&self, package: &PackageSpecifier) -> Option<Self> {
        match self {
            Signature::Class(class) => class.without_package(package).map(Signature::Class),
            Signature::Method(method) => method.without_package(package).map(Signature::Method),
            Signature::Field(field) => field.without_package(package).map(Signature::Field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::parser::{parse_class_signature, parse_field_signature, parse_method_signature};
    use crate::signature::printer::SignatureForm;

    #[test]
    fn test_drops_matching_package_everywhere() {
        let method = parse_method_signature(
            "<T:Ljava/lang/Object;>(Ljava/util/List<Ljava/lang/String;>;[Ljava/lang/Integer;)TT;^Ljava/lang/Exception;",
        )
        .unwrap();
        let filtered = exclude_package_name(&method, "java.lang");
        assert_eq!(
            filtered.to_internal_form(),
            "<T:LObject;>(Ljava/util/List<LString;>;[LInteger;)TT;^LException;"
        );
    }

    #[test]
    fn test_partial_prefix_is_not_excluded() {
        let field = parse_field_signature("Ljava/lang/String;").unwrap();
        let filtered = exclude_package_name(&field, "java");
        assert_eq!(filtered, field);
    }

    #[test]
    fn test_unaffected_subtrees_are_shared() {
        let class = parse_class_signature("Ljava/lang/Object;Ljava/util/List<Ljava/lang/String;>;").unwrap();
        let filtered = exclude_package_name(&class, "java.lang");
        assert!(!Arc::ptr_eq(&class.super_class, &filtered.super_class));
        assert!(!Arc::ptr_eq(&class.super_interfaces[0], &filtered.super_interfaces[0]));

        let untouched = exclude_package_name(&class, "javax.swing");
        assert!(Arc::ptr_eq(&class.super_class, &untouched.super_class));
        assert!(Arc::ptr_eq(&class.super_interfaces[0], &untouched.super_interfaces[0]));
    }

    #[test]
    fn test_invalid_package_is_no_op() {
        let field = parse_field_signature("Ljava/lang/String;").unwrap();
        assert_eq!(exclude_package_name(&field, ""), field);
        assert_eq!(exclude_package_name(&field, "java;lang"), field);
    }

    #[test]
    fn test_slashed_name_accepted() {
        let field = parse_field_signature("Ljava/lang/String;").unwrap();
        assert_eq!(exclude_package_name(&field, "java/lang/").to_internal_form(), "LString;");
    }
}
