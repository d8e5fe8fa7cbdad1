//! Java generic signatures (JVMS §4.7.9.1): parsing, rendering, traversal
//! and package-exclusion rewriting

pub mod error;
pub mod filters;
pub mod nodes;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod visitor;

pub use error::{SignatureError, SignatureResult};
pub use filters::{exclude_package_name, PackageExclusion};
pub use nodes::*;
pub use parser::{
    parse_class_signature, parse_class_signature_with, parse_class_type_signature, parse_field_signature,
    parse_field_signature_with, parse_java_type_signature, parse_method_signature, parse_method_signature_with,
    parse_reference_type_signature, parse_signature, parse_signature_with, parse_type_arguments,
    parse_type_parameter, parse_type_parameters, SignatureParser,
};
pub use printer::SignatureForm;
pub use scanner::TextScanner;
pub use visitor::{referenced_class_names, walk, NodeRef, SignatureVisitor, TreePrinter, Visitable};
