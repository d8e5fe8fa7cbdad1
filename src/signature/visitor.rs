//! Depth-first traversal of signature trees
//!
//! `NodeRef` is a borrowed view of one node; role enums such as
//! `ReferenceTypeSignature` are not nodes and resolve to their variant.

use super::nodes::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Identifier(&'a Identifier),
    BaseType(&'a BaseType),
    VoidDescriptor(&'a VoidDescriptor),
    TypeVariableSignature(&'a TypeVariableSignature),
    ArrayTypeSignature(&'a ArrayTypeSignature),
    PackageSpecifier(&'a PackageSpecifier),
    SimpleClassTypeSignature(&'a SimpleClassTypeSignature),
    ClassTypeSignatureSuffix(&'a ClassTypeSignatureSuffix),
    ClassTypeSignature(&'a ClassTypeSignature),
    WildcardIndicator(&'a WildcardIndicator),
    TypeArgument(&'a TypeArgument),
    TypeArguments(&'a TypeArguments),
    ClassBound(&'a ClassBound),
    InterfaceBound(&'a InterfaceBound),
    TypeParameter(&'a TypeParameter),
    TypeParameters(&'a TypeParameters),
    ThrowsSignature(&'a ThrowsSignature),
    ClassSignature(&'a ClassSignature),
    MethodSignature(&'a MethodSignature),
}

impl<'a> NodeRef<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeRef::Identifier(_) => "Identifier",
            NodeRef::BaseType(_) => "BaseType",
            NodeRef::VoidDescriptor(_) => "VoidDescriptor",
            NodeRef::TypeVariableSignature(_) => "TypeVariableSignature",
            NodeRef::ArrayTypeSignature(_) => "ArrayTypeSignature",
            NodeRef::PackageSpecifier(_) => "PackageSpecifier",
            NodeRef::SimpleClassTypeSignature(_) => "SimpleClassTypeSignature",
            NodeRef::ClassTypeSignatureSuffix(_) => "ClassTypeSignatureSuffix",
            NodeRef::ClassTypeSignature(_) => "ClassTypeSignature",
            NodeRef::WildcardIndicator(_) => "WildcardIndicator",
            NodeRef::TypeArgument(_) => "TypeArgument",
            NodeRef::TypeArguments(_) => "TypeArguments",
            NodeRef::ClassBound(_) => "ClassBound",
            NodeRef::InterfaceBound(_) => "InterfaceBound",
            NodeRef::TypeParameter(_) => "TypeParameter",
            NodeRef::TypeParameters(_) => "TypeParameters",
            NodeRef::ThrowsSignature(_) => "ThrowsSignature",
            NodeRef::ClassSignature(_) => "ClassSignature",
            NodeRef::MethodSignature(_) => "MethodSignature",
        }
    }

    /// Direct children in field declaration order; absent optionals are skipped
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut children = Vec::new();
        match *self {
            NodeRef::Identifier(_)
            | NodeRef::BaseType(_)
            | NodeRef::VoidDescriptor(_)
            | NodeRef::WildcardIndicator(_) => {}
            NodeRef::TypeVariableSignature(var) => children.push(NodeRef::Identifier(&var.identifier)),
            NodeRef::ArrayTypeSignature(array) => children.push(array.component.as_node()),
            NodeRef::PackageSpecifier(package) => {
                children.extend(package.identifiers().iter().map(NodeRef::Identifier));
            }
            NodeRef::SimpleClassTypeSignature(simple) => {
                children.push(NodeRef::Identifier(&simple.identifier));
                if let Some(args) = &simple.type_arguments {
                    children.push(NodeRef::TypeArguments(args));
                }
            }
            NodeRef::ClassTypeSignatureSuffix(suffix) => {
                children.push(NodeRef::SimpleClassTypeSignature(&suffix.simple_class_type_signature));
            }
            NodeRef::ClassTypeSignature(class) => {
                if let Some(package) = &class.package_specifier {
                    children.push(NodeRef::PackageSpecifier(package));
                }
                children.push(NodeRef::SimpleClassTypeSignature(&class.simple_class_type_signature));
                children.extend(class.suffixes.iter().map(NodeRef::ClassTypeSignatureSuffix));
            }
            NodeRef::TypeArgument(argument) => {
                if let TypeArgument::Bounded { wildcard, signature } = argument {
                    children.push(signature.as_node());
                    if let Some(wildcard) = wildcard {
                        children.push(NodeRef::WildcardIndicator(wildcard));
                    }
                }
            }
            NodeRef::TypeArguments(args) => {
                children.extend(args.arguments().iter().map(NodeRef::TypeArgument));
            }
            NodeRef::ClassBound(bound) => {
                if let Some(signature) = &bound.signature {
                    children.push(signature.as_node());
                }
            }
            NodeRef::InterfaceBound(bound) => children.push(bound.signature.as_node()),
            NodeRef::TypeParameter(param) => {
                children.push(NodeRef::Identifier(&param.identifier));
                children.push(NodeRef::ClassBound(&param.class_bound));
                children.extend(param.interface_bounds.iter().map(NodeRef::InterfaceBound));
            }
            NodeRef::TypeParameters(params) => {
                children.extend(params.parameters().iter().map(NodeRef::TypeParameter));
            }
            NodeRef::ThrowsSignature(thrown) => match thrown {
                ThrowsSignature::Class(class) => children.push(NodeRef::ClassTypeSignature(class)),
                ThrowsSignature::TypeVariable(var) => children.push(NodeRef::TypeVariableSignature(var)),
            },
            NodeRef::ClassSignature(class) => {
                if let Some(params) = &class.type_parameters {
                    children.push(NodeRef::TypeParameters(params));
                }
                children.push(NodeRef::ClassTypeSignature(&class.super_class));
                children.extend(class.super_interfaces.iter().map(|iface| NodeRef::ClassTypeSignature(iface)));
            }
            NodeRef::MethodSignature(method) => {
                if let Some(params) = &method.type_parameters {
                    children.push(NodeRef::TypeParameters(params));
                }
                children.extend(method.parameters.iter().map(|param| param.as_node()));
                children.push(method.result.as_node());
                children.extend(method.throws.iter().map(NodeRef::ThrowsSignature));
            }
        }
        children
    }
}

/// Callbacks invoked around each node. Returning `false` from `visit_enter`
/// skips the node's children; `visit_leave` decides what `walk` returns.
pub trait SignatureVisitor {
    fn visit_enter(&mut self, _node: NodeRef<'_>) -> bool {
        true
    }

    fn visit_leave(&mut self, _node: NodeRef<'_>) -> bool {
        true
    }
}

/// Visit `node` and its subtree depth-first.
///
/// Children are walked only when `visit_enter` returns true, and the
/// remaining siblings are abandoned as soon as one child's walk returns
/// false. `visit_leave` always runs and its result is returned.
pub fn walk<V: SignatureVisitor + ?Sized>(node: NodeRef<'_>, visitor: &mut V) -> bool {
    if visitor.visit_enter(node) {
        for child in node.children() {
            if !walk(child, visitor) {
                break;
            }
        }
    }
    visitor.visit_leave(node)
}

/// Anything that can be viewed as a node and walked
pub trait Visitable {
    fn as_node(&self) -> NodeRef<'_>;

    fn accept<V: SignatureVisitor + ?Sized>(&self, visitor: &mut V) -> bool {
        walk(self.as_node(), visitor)
    }
}

macro_rules! visitable_nodes {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Visitable for $ty {
                fn as_node(&self) -> NodeRef<'_> {
                    NodeRef::$ty(self)
                }
            }
        )*
    };
}

visitable_nodes!(
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
    ClassSignature,
    MethodSignature,
);

impl Visitable for ReferenceTypeSignature {
    fn as_node(&self) -> NodeRef<'_> {
        match self {
            ReferenceTypeSignature::Class(class) => NodeRef::ClassTypeSignature(class),
            ReferenceTypeSignature::TypeVariable(var) => NodeRef::TypeVariableSignature(var),
            ReferenceTypeSignature::Array(array) => NodeRef::ArrayTypeSignature(array),
        }
    }
}

impl Visitable for JavaTypeSignature {
    fn as_node(&self) -> NodeRef<'_> {
        match self {
            JavaTypeSignature::Base(base) => NodeRef::BaseType(base),
            JavaTypeSignature::Reference(reference) => reference.as_node(),
        }
    }
}

impl Visitable for ResultType {
    fn as_node(&self) -> NodeRef<'_> {
        match self {
            ResultType::Type(ty) => ty.as_node(),
            ResultType::Void(void) => NodeRef::VoidDescriptor(void),
        }
    }
}

impl Visitable for Signature {
    fn as_node(&self) -> NodeRef<'_> {
        match self {
            Signature::Class(class) => NodeRef::ClassSignature(class),
            Signature::Method(method) => NodeRef::MethodSignature(method),
            Signature::Field(field) => field.as_node(),
        }
    }
}

impl<T: Visitable + ?Sized> Visitable for std::sync::Arc<T> {
    fn as_node(&self) -> NodeRef<'_> {
        (**self).as_node()
    }
}

/// Collects the dotted name of every class type in visiting order
#[derive(Debug, Default)]
pub struct ClassNameCollector {
    pub names: Vec<String>,
}

impl SignatureVisitor for ClassNameCollector {
    fn visit_enter(&mut self, node: NodeRef<'_>) -> bool {
        if let NodeRef::ClassTypeSignature(class) = node {
            self.names.push(class.class_name());
        }
        true
    }
}

/// Dotted names of all class types referenced by `node`, duplicates included
pub fn referenced_class_names<T: Visitable + ?Sized>(node: &T) -> Vec<String> {
    let mut collector = ClassNameCollector::default();
    node.accept(&mut collector);
    collector.names
}

/// Renders one line per node, indented by depth
#[derive(Debug, Default)]
pub struct TreePrinter {
    depth: usize,
    pub output: String,
}

impl SignatureVisitor for TreePrinter {
    fn visit_enter(&mut self, node: NodeRef<'_>) -> bool {
        use super::printer::SignatureForm;

        let text = match node {
            NodeRef::Identifier(id) => id.to_internal_form(),
            NodeRef::BaseType(base) => base.to_external_form(),
            NodeRef::WildcardIndicator(w) => w.to_internal_form(),
            NodeRef::PackageSpecifier(p) => p.to_external_form(),
            NodeRef::ClassTypeSignature(c) => c.to_external_form(),
            NodeRef::TypeVariableSignature(v) => v.to_external_form(),
            _ => String::new(),
        };
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }
        self.output.push_str(node.kind_name());
        if !text.is_empty() {
            self.output.push(' ');
            self.output.push_str(&text);
        }
        self.output.push('\n');
        self.depth += 1;
        true
    }

    fn visit_leave(&mut self, _node: NodeRef<'_>) -> bool {
        self.depth = self.depth.saturating_sub(1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::parser::{parse_field_signature, parse_method_signature};

    #[derive(Default)]
    struct Recorder {
        entered: Vec<&'static str>,
        skip: Option<&'static str>,
        stop_after: Option<&'static str>,
    }

    impl SignatureVisitor for Recorder {
        fn visit_enter(&mut self, node: NodeRef<'_>) -> bool {
            self.entered.push(node.kind_name());
            Some(node.kind_name()) != self.skip
        }

        fn visit_leave(&mut self, node: NodeRef<'_>) -> bool {
            Some(node.kind_name()) != self.stop_after
        }
    }

    #[test]
    fn test_children_in_declaration_order() {
        let method = parse_method_signature("<T:Ljava/lang/Object;>(TT;I)V^Ljava/io/IOException;").unwrap();
        let kinds: Vec<_> = method.as_node().children().iter().map(NodeRef::kind_name).collect();
        assert_eq!(
            kinds,
            vec![
                "TypeParameters",
                "TypeVariableSignature",
                "BaseType",
                "VoidDescriptor",
                "ThrowsSignature"
            ]
        );
    }

    #[test]
    fn test_enter_false_skips_children() {
        let field = parse_field_signature("Ljava/util/List<Ljava/lang/String;>;").unwrap();
        let mut recorder = Recorder { skip: Some("SimpleClassTypeSignature"), ..Default::default() };
        assert!(field.accept(&mut recorder));
        assert_eq!(
            recorder.entered,
            vec![
                "ClassTypeSignature",
                "PackageSpecifier",
                "Identifier",
                "Identifier",
                "SimpleClassTypeSignature"
            ]
        );
    }

    #[test]
    fn test_leave_false_stops_siblings() {
        let method = parse_method_signature("(IJ)V").unwrap();
        let mut recorder = Recorder { stop_after: Some("BaseType"), ..Default::default() };
        assert!(method.accept(&mut recorder));
        // the second parameter and the result are never entered
        assert_eq!(recorder.entered, vec!["MethodSignature", "BaseType"]);
    }

    #[test]
    fn test_collect_class_names() {
        let method =
            parse_method_signature("(Ljava/util/Map<Ljava/lang/String;[Ljava/lang/Integer;>;)Ljava/util/Map$Entry;")
                .unwrap();
        assert_eq!(
            referenced_class_names(&method),
            vec!["java.util.Map", "java.lang.String", "java.lang.Integer", "java.util.Map$Entry"]
        );
    }
}
