//! Immutable nodes of the generic signature grammar (JVMS §4.7.9.1)
//!
//! Role interfaces of the grammar are closed enums; a `ClassTypeSignature`
//! is the single concrete type behind the reference, super-class and
//! super-interface roles. Recursive children sit behind `Arc` so rewrites can
//! share every subtree they leave untouched.

use std::sync::Arc;

use super::error::{SignatureError, SignatureResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::new(name)
    }
}

/// The eight primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
}

impl BaseType {
    pub const ALL: [BaseType; 8] = [
        BaseType::Boolean,
        BaseType::Byte,
        BaseType::Char,
        BaseType::Double,
        BaseType::Float,
        BaseType::Int,
        BaseType::Long,
        BaseType::Short,
    ];

    /// JVM descriptor character
    pub fn descriptor(self) -> char {
        match self {
            BaseType::Boolean => 'Z',
            BaseType::Byte => 'B',
            BaseType::Char => 'C',
            BaseType::Double => 'D',
            BaseType::Float => 'F',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Short => 'S',
        }
    }

    /// Java keyword
    pub fn keyword(self) -> &'static str {
        match self {
            BaseType::Boolean => "boolean",
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
        }
    }

    pub fn from_descriptor(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.descriptor() == c)
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.keyword() == keyword)
    }
}

/// `void` in result position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VoidDescriptor;

/// `T<identifier>;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariableSignature {
    pub identifier: Identifier,
}

impl TypeVariableSignature {
    pub fn new(identifier: impl Into<Identifier>) -> Self {
        Self { identifier: identifier.into() }
    }
}

/// `[<component>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayTypeSignature {
    pub component: Arc<JavaTypeSignature>,
}

impl ArrayTypeSignature {
    pub fn new(component: impl Into<JavaTypeSignature>) -> Self {
        Self { component: Arc::new(component.into()) }
    }

    /// Number of `[` in front of the innermost element type
    pub fn dimensions(&self) -> usize {
        let mut dims = 1;
        let mut current = self.component.as_ref();
        while let JavaTypeSignature::Reference(ReferenceTypeSignature::Array(inner)) = current {
            dims += 1;
            current = inner.component.as_ref();
        }
        dims
    }

    /// The innermost non-array type
    pub fn element_type(&self) -> &JavaTypeSignature {
        let mut current = self.component.as_ref();
        while let JavaTypeSignature::Reference(ReferenceTypeSignature::Array(inner)) = current {
            current = inner.component.as_ref();
        }
        current
    }
}

/// Package qualifier of a class type, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSpecifier {
    identifiers: Vec<Identifier>,
}

impl PackageSpecifier {
    pub fn new(identifiers: Vec<Identifier>) -> SignatureResult<Self> {
        if identifiers.is_empty() {
            return Err(SignatureError::EmptyList { production: "PackageSpecifier" });
        }
        Ok(Self { identifiers })
    }

    /// Build from `java.lang`, `java/lang` or `java/lang/`.
    /// Each segment must be a valid signature identifier.
    pub fn from_package_name(name: &str) -> SignatureResult<Self> {
        let trimmed = name.trim_end_matches(|c: char| c == '.' || c == '/');
        let mut identifiers = Vec::new();
        for segment in trimmed.split(|c: char| c == '.' || c == '/') {
            if segment.is_empty() || segment.contains(crate::consts::IDENTIFIER_EXCLUDED) {
                return Err(SignatureError::MalformedInput {
                    production: "PackageSpecifier",
                    offset: 0,
                    remainder: name.to_string(),
                });
            }
            identifiers.push(Identifier::new(segment));
        }
        Self::new(identifiers)
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// Dotted package name, e.g. `java.util`
    pub fn package_name(&self) -> String {
        self.identifiers
            .iter()
            .map(Identifier::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// One segment of a (possibly nested) class name with its type arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleClassTypeSignature {
    pub identifier: Identifier,
    pub type_arguments: Option<TypeArguments>,
}

impl SimpleClassTypeSignature {
    pub fn new(identifier: impl Into<Identifier>, type_arguments: Option<TypeArguments>) -> Self {
        Self { identifier: identifier.into(), type_arguments }
    }
}

/// `.<SimpleClassTypeSignature>` naming an inner class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassTypeSignatureSuffix {
    pub simple_class_type_signature: SimpleClassTypeSignature,
}

impl ClassTypeSignatureSuffix {
    pub fn new(simple_class_type_signature: SimpleClassTypeSignature) -> Self {
        Self { simple_class_type_signature }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassTypeSignature {
    pub package_specifier: Option<PackageSpecifier>,
    pub simple_class_type_signature: SimpleClassTypeSignature,
    pub suffixes: Vec<ClassTypeSignatureSuffix>,
}

impl ClassTypeSignature {
    pub fn new(
        package_specifier: Option<PackageSpecifier>,
        simple_class_type_signature: SimpleClassTypeSignature,
        suffixes: Vec<ClassTypeSignatureSuffix>,
    ) -> Self {
        Self { package_specifier, simple_class_type_signature, suffixes }
    }

    /// Non-generic class type from a dotted or slashed name, e.g. `java.lang.String`
    pub fn of(class_name: &str) -> SignatureResult<Self> {
        let normalized = class_name.replace('.', "/");
        let (package, simple) = match normalized.rfind('/') {
            Some(i) => (Some(PackageSpecifier::from_package_name(&normalized[..i])?), &normalized[i + 1..]),
            None => (None, normalized.as_str()),
        };
        if simple.is_empty() || simple.contains(crate::consts::IDENTIFIER_EXCLUDED) {
            return Err(SignatureError::MalformedInput {
                production: "ClassTypeSignature",
                offset: 0,
                remainder: class_name.to_string(),
            });
        }
        Ok(Self::new(package, SimpleClassTypeSignature::new(simple, None), Vec::new()))
    }

    /// Dotted name without type arguments, e.g. `java.util.Map.Entry`
    pub fn class_name(&self) -> String {
        let mut name = String::new();
        if let Some(package) = &self.package_specifier {
            name.push_str(&package.package_name());
            name.push('.');
        }
        name.push_str(self.simple_class_type_signature.identifier.as_str());
        for suffix in &self.suffixes {
            name.push('.');
            name.push_str(suffix.simple_class_type_signature.identifier.as_str());
        }
        name
    }
}

pub type SuperClassSignature = ClassTypeSignature;
pub type SuperInterfaceSignature = ClassTypeSignature;

/// `+` is `? extends`, `-` is `? super`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardIndicator {
    UpperBound,
    LowerBound,
}

impl WildcardIndicator {
    pub fn symbol(self) -> char {
        match self {
            WildcardIndicator::UpperBound => '+',
            WildcardIndicator::LowerBound => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    /// The unbounded wildcard `*`
    Unknown,
    Bounded {
        wildcard: Option<WildcardIndicator>,
        signature: ReferenceTypeSignature,
    },
}

impl TypeArgument {
    pub const UNKNOWN: TypeArgument = TypeArgument::Unknown;

    pub fn exact(signature: impl Into<ReferenceTypeSignature>) -> Self {
        TypeArgument::Bounded { wildcard: None, signature: signature.into() }
    }

    pub fn extends(signature: impl Into<ReferenceTypeSignature>) -> Self {
        TypeArgument::Bounded { wildcard: Some(WildcardIndicator::UpperBound), signature: signature.into() }
    }

    pub fn super_of(signature: impl Into<ReferenceTypeSignature>) -> Self {
        TypeArgument::Bounded { wildcard: Some(WildcardIndicator::LowerBound), signature: signature.into() }
    }

    pub fn wildcard(&self) -> Option<WildcardIndicator> {
        match self {
            TypeArgument::Unknown => None,
            TypeArgument::Bounded { wildcard, .. } => *wildcard,
        }
    }

    pub fn signature(&self) -> Option<&ReferenceTypeSignature> {
        match self {
            TypeArgument::Unknown => None,
            TypeArgument::Bounded { signature, .. } => Some(signature),
        }
    }
}

/// `<arg...>`, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeArguments {
    arguments: Vec<TypeArgument>,
}

impl TypeArguments {
    pub fn new(arguments: Vec<TypeArgument>) -> SignatureResult<Self> {
        if arguments.is_empty() {
            return Err(SignatureError::EmptyList { production: "TypeArguments" });
        }
        Ok(Self { arguments })
    }

    pub fn arguments(&self) -> &[TypeArgument] {
        &self.arguments
    }
}

/// Class bound of a type parameter; `EMPTY` when only interface bounds follow
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassBound {
    pub signature: Option<ReferenceTypeSignature>,
}

impl ClassBound {
    pub const EMPTY: ClassBound = ClassBound { signature: None };

    pub fn new(signature: impl Into<ReferenceTypeSignature>) -> Self {
        Self { signature: Some(signature.into()) }
    }

    pub fn is_empty(&self) -> bool {
        self.signature.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceBound {
    pub signature: ReferenceTypeSignature,
}

impl InterfaceBound {
    pub fn new(signature: impl Into<ReferenceTypeSignature>) -> Self {
        Self { signature: signature.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameter {
    pub identifier: Identifier,
    pub class_bound: ClassBound,
    pub interface_bounds: Vec<InterfaceBound>,
}

impl TypeParameter {
    pub fn new(identifier: impl Into<Identifier>, class_bound: ClassBound, interface_bounds: Vec<InterfaceBound>) -> Self {
        Self { identifier: identifier.into(), class_bound, interface_bounds }
    }
}

/// `<param...>`, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameters {
    parameters: Vec<TypeParameter>,
}

impl TypeParameters {
    pub fn new(parameters: Vec<TypeParameter>) -> SignatureResult<Self> {
        if parameters.is_empty() {
            return Err(SignatureError::EmptyList { production: "TypeParameters" });
        }
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &[TypeParameter] {
        &self.parameters
    }
}

/// `^<type>`; only class types and type variables may be thrown
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThrowsSignature {
    Class(Arc<ClassTypeSignature>),
    TypeVariable(TypeVariableSignature),
}

impl ThrowsSignature {
    /// The thrown type as a reference type signature
    pub fn to_reference(&self) -> ReferenceTypeSignature {
        match self {
            ThrowsSignature::Class(class) => ReferenceTypeSignature::Class(Arc::clone(class)),
            ThrowsSignature::TypeVariable(var) => ReferenceTypeSignature::TypeVariable(var.clone()),
        }
    }
}

impl From<ClassTypeSignature> for ThrowsSignature {
    fn from(class: ClassTypeSignature) -> Self {
        ThrowsSignature::Class(Arc::new(class))
    }
}

impl From<TypeVariableSignature> for ThrowsSignature {
    fn from(var: TypeVariableSignature) -> Self {
        ThrowsSignature::TypeVariable(var)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceTypeSignature {
    Class(Arc<ClassTypeSignature>),
    TypeVariable(TypeVariableSignature),
    Array(ArrayTypeSignature),
}

impl ReferenceTypeSignature {
    pub fn as_class(&self) -> Option<&ClassTypeSignature> {
        match self {
            ReferenceTypeSignature::Class(class) => Some(class.as_ref()),
            _ => None,
        }
    }
}

impl From<ClassTypeSignature> for ReferenceTypeSignature {
    fn from(class: ClassTypeSignature) -> Self {
        ReferenceTypeSignature::Class(Arc::new(class))
    }
}

impl From<Arc<ClassTypeSignature>> for ReferenceTypeSignature {
    fn from(class: Arc<ClassTypeSignature>) -> Self {
        ReferenceTypeSignature::Class(class)
    }
}

impl From<TypeVariableSignature> for ReferenceTypeSignature {
    fn from(var: TypeVariableSignature) -> Self {
        ReferenceTypeSignature::TypeVariable(var)
    }
}

impl From<ArrayTypeSignature> for ReferenceTypeSignature {
    fn from(array: ArrayTypeSignature) -> Self {
        ReferenceTypeSignature::Array(array)
    }
}

/// A field carries exactly one reference type signature
pub type FieldSignature = ReferenceTypeSignature;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaTypeSignature {
    Base(BaseType),
    Reference(ReferenceTypeSignature),
}

impl From<BaseType> for JavaTypeSignature {
    fn from(base: BaseType) -> Self {
        JavaTypeSignature::Base(base)
    }
}

impl From<ReferenceTypeSignature> for JavaTypeSignature {
    fn from(reference: ReferenceTypeSignature) -> Self {
        JavaTypeSignature::Reference(reference)
    }
}

impl From<ClassTypeSignature> for JavaTypeSignature {
    fn from(class: ClassTypeSignature) -> Self {
        JavaTypeSignature::Reference(class.into())
    }
}

impl From<TypeVariableSignature> for JavaTypeSignature {
    fn from(var: TypeVariableSignature) -> Self {
        JavaTypeSignature::Reference(var.into())
    }
}

impl From<ArrayTypeSignature> for JavaTypeSignature {
    fn from(array: ArrayTypeSignature) -> Self {
        JavaTypeSignature::Reference(array.into())
    }
}

/// Method result: a type or `void`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResultType {
    Type(JavaTypeSignature),
    Void(VoidDescriptor),
}

impl ResultType {
    pub fn is_void(&self) -> bool {
        matches!(self, ResultType::Void(_))
    }
}

impl From<VoidDescriptor> for ResultType {
    fn from(void: VoidDescriptor) -> Self {
        ResultType::Void(void)
    }
}

impl From<JavaTypeSignature> for ResultType {
    fn from(ty: JavaTypeSignature) -> Self {
        ResultType::Type(ty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassSignature {
    pub type_parameters: Option<TypeParameters>,
    pub super_class: Arc<SuperClassSignature>,
    pub super_interfaces: Vec<Arc<SuperInterfaceSignature>>,
}

impl ClassSignature {
    pub fn new(
        type_parameters: Option<TypeParameters>,
        super_class: SuperClassSignature,
        super_interfaces: Vec<SuperInterfaceSignature>,
    ) -> Self {
        Self {
            type_parameters,
            super_class: Arc::new(super_class),
            super_interfaces: super_interfaces.into_iter().map(Arc::new).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub type_parameters: Option<TypeParameters>,
    pub parameters: Vec<JavaTypeSignature>,
    pub result: ResultType,
    pub throws: Vec<ThrowsSignature>,
}

impl MethodSignature {
    pub fn new(
        type_parameters: Option<TypeParameters>,
        parameters: Vec<JavaTypeSignature>,
        result: impl Into<ResultType>,
        throws: Vec<ThrowsSignature>,
    ) -> Self {
        Self { type_parameters, parameters, result: result.into(), throws }
    }
}

/// The three top-level grammars
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Signature {
    Class(ClassSignature),
    Method(MethodSignature),
    Field(FieldSignature),
}

impl Signature {
    pub fn kind(&self) -> &'static str {
        match self {
            Signature::Class(_) => "class",
            Signature::Method(_) => "method",
            Signature::Field(_) => "field",
        }
    }
}

impl From<ClassSignature> for Signature {
    fn from(sig: ClassSignature) -> Self {
        Signature::Class(sig)
    }
}

impl From<MethodSignature> for Signature {
    fn from(sig: MethodSignature) -> Self {
        Signature::Method(sig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists_rejected() {
        assert_eq!(
            TypeArguments::new(vec![]),
            Err(SignatureError::EmptyList { production: "TypeArguments" })
        );
        assert!(TypeParameters::new(vec![]).is_err());
        assert!(PackageSpecifier::new(vec![]).is_err());
    }

    #[test]
    fn test_package_from_name() {
        let dotted = PackageSpecifier::from_package_name("java.lang").unwrap();
        let slashed = PackageSpecifier::from_package_name("java/lang/").unwrap();
        assert_eq!(dotted, slashed);
        assert_eq!(dotted.package_name(), "java.lang");
        assert!(PackageSpecifier::from_package_name("").is_err());
        assert!(PackageSpecifier::from_package_name("java..lang").is_err());
        assert!(PackageSpecifier::from_package_name("java.la<ng").is_err());
    }

    #[test]
    fn test_class_of() {
        let string = ClassTypeSignature::of("java.lang.String").unwrap();
        assert_eq!(string.class_name(), "java.lang.String");
        let local = ClassTypeSignature::of("Foo").unwrap();
        assert!(local.package_specifier.is_none());
        assert!(ClassTypeSignature::of("java.lang.").is_err());
    }

    #[test]
    fn test_array_dimensions() {
        let inner = ArrayTypeSignature::new(BaseType::Int);
        let outer = ArrayTypeSignature::new(inner);
        assert_eq!(outer.dimensions(), 2);
        assert_eq!(outer.element_type(), &JavaTypeSignature::Base(BaseType::Int));
    }

    #[test]
    fn test_base_type_lookup() {
        for base in BaseType::ALL {
            assert_eq!(BaseType::from_descriptor(base.descriptor()), Some(base));
            assert_eq!(BaseType::from_keyword(base.keyword()), Some(base));
        }
        assert_eq!(BaseType::from_descriptor('V'), None);
    }

    #[test]
    fn test_structural_equality() {
        let a = ClassTypeSignature::of("java.util.List").unwrap();
        let b = ClassTypeSignature::of("java/util/List").unwrap();
        assert_eq!(ReferenceTypeSignature::from(a), ReferenceTypeSignature::from(b));
    }
}
