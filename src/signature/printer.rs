//! Internal (descriptor) and external (Java source-like) renderings
//!
//! The internal form reproduces the JVM syntax exactly and re-parses to an
//! equal tree. The external form is display-only.

use std::fmt;

use super::nodes::*;

/// Two independent unparse functions shared by every node
pub trait SignatureForm {
    fn write_internal(&self, out: &mut String);

    fn write_external(&self, out: &mut String);

    fn to_internal_form(&self) -> String {
        let mut out = String::new();
        self.write_internal(&mut out);
        out
    }

    fn to_external_form(&self) -> String {
        let mut out = String::new();
        self.write_external(&mut out);
        out
    }
}

impl<T: SignatureForm + ?Sized> SignatureForm for std::sync::Arc<T> {
    fn write_internal(&self, out: &mut String) {
        (**self).write_internal(out)
    }

    fn write_external(&self, out: &mut String) {
        (**self).write_external(out)
    }
}

fn write_joined<T: SignatureForm>(out: &mut String, items: &[T], separator: &str) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        item.write_external(out);
    }
}

impl SignatureForm for Identifier {
    fn write_internal(&self, out: &mut String) {
        out.push_str(self.as_str());
    }

    fn write_external(&self, out: &mut String) {
        out.extend(self.as_str().chars().map(|c| if c == '/' { '.' } else { c }));
    }
}

impl SignatureForm for BaseType {
    fn write_internal(&self, out: &mut String) {
        out.push(self.descriptor());
    }

    fn write_external(&self, out: &mut String) {
        out.push_str(self.keyword());
    }
}

impl SignatureForm for VoidDescriptor {
    fn write_internal(&self, out: &mut String) {
        out.push('V');
    }

    fn write_external(&self, out: &mut String) {
        out.push_str("void");
    }
}

impl SignatureForm for TypeVariableSignature {
    fn write_internal(&self, out: &mut String) {
        out.push('T');
        self.identifier.write_internal(out);
        out.push(';');
    }

    fn write_external(&self, out: &mut String) {
        self.identifier.write_external(out);
    }
}

impl SignatureForm for ArrayTypeSignature {
    fn write_internal(&self, out: &mut String) {
        out.push('[');
        self.component.write_internal(out);
    }

    fn write_external(&self, out: &mut String) {
        self.component.write_external(out);
        out.push_str("[]");
    }
}

impl SignatureForm for PackageSpecifier {
    fn write_internal(&self, out: &mut String) {
        for identifier in self.identifiers() {
            identifier.write_internal(out);
            out.push('/');
        }
    }

    fn write_external(&self, out: &mut String) {
        for identifier in self.identifiers() {
            identifier.write_external(out);
            out.push('.');
        }
    }
}

impl SignatureForm for SimpleClassTypeSignature {
    fn write_internal(&self, out: &mut String) {
        self.identifier.write_internal(out);
        if let Some(args) = &self.type_arguments {
            args.write_internal(out);
        }
    }

    fn write_external(&self, out: &mut String) {
        self.identifier.write_external(out);
        if let Some(args) = &self.type_arguments {
            args.write_external(out);
        }
    }
}

impl SignatureForm for ClassTypeSignatureSuffix {
    fn write_internal(&self, out: &mut String) {
        out.push('.');
        self.simple_class_type_signature.write_internal(out);
    }

    fn write_external(&self, out: &mut String) {
        out.push('.');
        self.simple_class_type_signature.write_external(out);
    }
}

impl SignatureForm for ClassTypeSignature {
    fn write_internal(&self, out: &mut String) {
        out.push('L');
        if let Some(package) = &self.package_specifier {
            package.write_internal(out);
        }
        self.simple_class_type_signature.write_internal(out);
        for suffix in &self.suffixes {
            suffix.write_internal(out);
        }
        out.push(';');
    }

    fn write_external(&self, out: &mut String) {
        if let Some(package) = &self.package_specifier {
            package.write_external(out);
        }
        self.simple_class_type_signature.write_external(out);
        for suffix in &self.suffixes {
            suffix.write_external(out);
        }
    }
}

impl SignatureForm for WildcardIndicator {
    fn write_internal(&self, out: &mut String) {
        out.push(self.symbol());
    }

    fn write_external(&self, out: &mut String) {
        out.push_str(match self {
            WildcardIndicator::UpperBound => "? extends",
            WildcardIndicator::LowerBound => "? super",
        });
    }
}

impl SignatureForm for TypeArgument {
    fn write_internal(&self, out: &mut String) {
        match self {
            TypeArgument::Unknown => out.push('*'),
            TypeArgument::Bounded { wildcard, signature } => {
                if let Some(wildcard) = wildcard {
                    wildcard.write_internal(out);
                }
                signature.write_internal(out);
            }
        }
    }

    fn write_external(&self, out: &mut String) {
        match self {
            TypeArgument::Unknown => out.push('?'),
            TypeArgument::Bounded { wildcard, signature } => {
                if let Some(wildcard) = wildcard {
                    wildcard.write_external(out);
                    out.push(' ');
                }
                signature.write_external(out);
            }
        }
    }
}

impl SignatureForm for TypeArguments {
    fn write_internal(&self, out: &mut String) {
        out.push('<');
        for argument in self.arguments() {
            argument.write_internal(out);
        }
        out.push('>');
    }

    fn write_external(&self, out: &mut String) {
        out.push('<');
        write_joined(out, self.arguments(), ", ");
        out.push('>');
    }
}

impl SignatureForm for ClassBound {
    fn write_internal(&self, out: &mut String) {
        out.push(':');
        if let Some(signature) = &self.signature {
            signature.write_internal(out);
        }
    }

    fn write_external(&self, out: &mut String) {
        if let Some(signature) = &self.signature {
            signature.write_external(out);
        }
    }
}

impl SignatureForm for InterfaceBound {
    fn write_internal(&self, out: &mut String) {
        out.push(':');
        self.signature.write_internal(out);
    }

    fn write_external(&self, out: &mut String) {
        self.signature.write_external(out);
    }
}

fn is_java_lang_object(signature: &ReferenceTypeSignature) -> bool {
    match signature.as_class() {
        Some(class) => class.suffixes.is_empty()
            && class.simple_class_type_signature.type_arguments.is_none()
            && class.class_name() == "java.lang.Object",
        None => false,
    }
}

impl SignatureForm for TypeParameter {
    fn write_internal(&self, out: &mut String) {
        self.identifier.write_internal(out);
        self.class_bound.write_internal(out);
        for bound in &self.interface_bounds {
            bound.write_internal(out);
        }
    }

    // A lone `java.lang.Object` class bound is implicit in source.
    fn write_external(&self, out: &mut String) {
        self.identifier.write_external(out);
        let mut bounds: Vec<String> = Vec::new();
        if let Some(class) = &self.class_bound.signature {
            if !(is_java_lang_object(class) && self.interface_bounds.is_empty()) {
                bounds.push(class.to_external_form());
            }
        }
        bounds.extend(self.interface_bounds.iter().map(|b| b.to_external_form()));
        if !bounds.is_empty() {
            out.push_str(" extends ");
            out.push_str(&bounds.join(" & "));
        }
    }
}

impl SignatureForm for TypeParameters {
    fn write_internal(&self, out: &mut String) {
        out.push('<');
        for parameter in self.parameters() {
            parameter.write_internal(out);
        }
        out.push('>');
    }

    fn write_external(&self, out: &mut String) {
        out.push('<');
        write_joined(out, self.parameters(), ", ");
        out.push('>');
    }
}

impl SignatureForm for ThrowsSignature {
    fn write_internal(&self, out: &mut String) {
        out.push('^');
        match self {
            ThrowsSignature::Class(class) => class.write_internal(out),
            ThrowsSignature::TypeVariable(var) => var.write_internal(out),
        }
    }

    fn write_external(&self, out: &mut String) {
        match self {
            ThrowsSignature::Class(class) => class.write_external(out),
            ThrowsSignature::TypeVariable(var) => var.write_external(out),
        }
    }
}

impl SignatureForm for ReferenceTypeSignature {
    fn write_internal(&self, out: &mut String) {
        match self {
            ReferenceTypeSignature::Class(class) => class.write_internal(out),
            ReferenceTypeSignature::TypeVariable(var) => var.write_internal(out),
            ReferenceTypeSignature::Array(array) => array.write_internal(out),
        }
    }

    fn write_external(&self, out: &mut String) {
        match self {
            ReferenceTypeSignature::Class(class) => class.write_external(out),
            ReferenceTypeSignature::TypeVariable(var) => var.write_external(out),
            ReferenceTypeSignature::Array(array) => array.write_external(out),
        }
    }
}

impl SignatureForm for JavaTypeSignature {
    fn write_internal(&self, out: &mut String) {
        match self {
            JavaTypeSignature::Base(base) => base.write_internal(out),
            JavaTypeSignature::Reference(reference) => reference.write_internal(out),
        }
    }

    fn write_external(&self, out: &mut String) {
        match self {
            JavaTypeSignature::Base(base) => base.write_external(out),
            JavaTypeSignature::Reference(reference) => reference.write_external(out),
        }
    }
}

impl SignatureForm for ResultType {
    fn write_internal(&self, out: &mut String) {
        match self {
            ResultType::Type(ty) => ty.write_internal(out),
            ResultType::Void(void) => void.write_internal(out),
        }
    }

    fn write_external(&self, out: &mut String) {
        match self {
            ResultType::Type(ty) => ty.write_external(out),
            ResultType::Void(void) => void.write_external(out),
        }
    }
}

impl SignatureForm for ClassSignature {
    fn write_internal(&self, out: &mut String) {
        if let Some(params) = &self.type_parameters {
            params.write_internal(out);
        }
        self.super_class.write_internal(out);
        for iface in &self.super_interfaces {
            iface.write_internal(out);
        }
    }

    fn write_external(&self, out: &mut String) {
        if let Some(params) = &self.type_parameters {
            params.write_external(out);
            out.push(' ');
        }
        out.push_str("extends ");
        self.super_class.write_external(out);
        if !self.super_interfaces.is_empty() {
            out.push_str(" implements ");
            write_joined(out, &self.super_interfaces, ", ");
        }
    }
}

impl SignatureForm for MethodSignature {
    fn write_internal(&self, out: &mut String) {
        if let Some(params) = &self.type_parameters {
            params.write_internal(out);
        }
        out.push('(');
        for param in &self.parameters {
            param.write_internal(out);
        }
        out.push(')');
        self.result.write_internal(out);
        for throws in &self.throws {
            throws.write_internal(out);
        }
    }

    fn write_external(&self, out: &mut String) {
        if let Some(params) = &self.type_parameters {
            params.write_external(out);
            out.push(' ');
        }
        self.result.write_external(out);
        out.push('(');
        write_joined(out, &self.parameters, ", ");
        out.push(')');
        if !self.throws.is_empty() {
            out.push_str(" throws ");
            write_joined(out, &self.throws, ", ");
        }
    }
}

impl SignatureForm for Signature {
    fn write_internal(&self, out: &mut String) {
        match self {
            Signature::Class(sig) => sig.write_internal(out),
            Signature::Method(sig) => sig.write_internal(out),
            Signature::Field(sig) => sig.write_internal(out),
        }
    }

    fn write_external(&self, out: &mut String) {
        match self {
            Signature::Class(sig) => sig.write_external(out),
            Signature::Method(sig) => sig.write_external(out),
            Signature::Field(sig) => sig.write_external(out),
        }
    }
}

macro_rules! display_internal_form {
    ($($node:ty),* $(,)?) => {
        $(
            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.to_internal_form())
                }
            }
        )*
    };
}

display_internal_form!(
    Identifier,
    BaseType,
    VoidDescriptor,
    TypeVariableSignature,
    ArrayTypeSignature,
    PackageSpecifier,
    SimpleClassTypeSignature,
    ClassTypeSignatureSuffix,
    ClassTypeSignature,
    WildcardIndicator,
    TypeArgument,
    TypeArguments,
    ClassBound,
    InterfaceBound,
    TypeParameter,
    TypeParameters,
    ThrowsSignature,
    ReferenceTypeSignature,
    JavaTypeSignature,
    ResultType,
    ClassSignature,
    MethodSignature,
    Signature,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(arg: TypeArgument) -> ClassTypeSignature {
        let package = PackageSpecifier::from_package_name("java.util").unwrap();
        let args = TypeArguments::new(vec![arg]).unwrap();
        ClassTypeSignature::new(Some(package), SimpleClassTypeSignature::new("List", Some(args)), vec![])
    }

    #[test]
    fn test_class_type_forms() {
        let string = ClassTypeSignature::of("java.lang.String").unwrap();
        let list = list_of(TypeArgument::exact(string));
        assert_eq!(list.to_internal_form(), "Ljava/util/List<Ljava/lang/String;>;");
        assert_eq!(list.to_external_form(), "java.util.List<java.lang.String>");
        assert_eq!(list.to_string(), list.to_internal_form());
    }

    #[test]
    fn test_wildcard_forms() {
        let number = ClassTypeSignature::of("java.lang.Number").unwrap();
        let upper = list_of(TypeArgument::extends(number.clone()));
        let lower = list_of(TypeArgument::super_of(number));
        let any = list_of(TypeArgument::UNKNOWN);
        assert_eq!(upper.to_internal_form(), "Ljava/util/List<+Ljava/lang/Number;>;");
        assert_eq!(upper.to_external_form(), "java.util.List<? extends java.lang.Number>");
        assert_eq!(lower.to_external_form(), "java.util.List<? super java.lang.Number>");
        assert_eq!(any.to_internal_form(), "Ljava/util/List<*>;");
        assert_eq!(any.to_external_form(), "java.util.List<?>");
    }

    #[test]
    fn test_array_and_base_forms() {
        let array = ArrayTypeSignature::new(ArrayTypeSignature::new(BaseType::Int));
        assert_eq!(array.to_internal_form(), "[[I");
        assert_eq!(array.to_external_form(), "int[][]");
        assert_eq!(VoidDescriptor.to_external_form(), "void");
    }

    #[test]
    fn test_type_parameter_external_bounds() {
        let object = ClassTypeSignature::of("java.lang.Object").unwrap();
        let plain = TypeParameter::new("T", ClassBound::new(object), vec![]);
        assert_eq!(plain.to_internal_form(), "T:Ljava/lang/Object;");
        assert_eq!(plain.to_external_form(), "T");

        let comparable = ClassTypeSignature::of("java.lang.Comparable").unwrap();
        let iface_only = TypeParameter::new("T", ClassBound::EMPTY, vec![InterfaceBound::new(comparable)]);
        assert_eq!(iface_only.to_internal_form(), "T::Ljava/lang/Comparable;");
        assert_eq!(iface_only.to_external_form(), "T extends java.lang.Comparable");
    }

    #[test]
    fn test_method_forms() {
        let io = ClassTypeSignature::of("java.io.IOException").unwrap();
        let method = MethodSignature::new(
            None,
            vec![BaseType::Int.into(), ClassTypeSignature::of("java.lang.String").unwrap().into()],
            VoidDescriptor,
            vec![io.into()],
        );
        assert_eq!(method.to_internal_form(), "(ILjava/lang/String;)V^Ljava/io/IOException;");
        assert_eq!(method.to_external_form(), "void(int, java.lang.String) throws java.io.IOException");
    }
}
