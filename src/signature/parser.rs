//! Backtracking recursive-descent parser for JVM generic signatures
//!
//! Every production `x` has a committed `parse_x` and a non-consuming
//! `can_parse_x`. Alternatives and optional parts are resolved with
//! `attempt`, which parses speculatively and rolls the scanner back on
//! failure, so a production is parsed once whether or not it is present.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{SignatureError, SignatureResult};
use super::nodes::*;
use super::scanner::TextScanner;
use crate::config::Config;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^.;\[/<>:]+").expect("identifier pattern"));
static TYPE_VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^T[^.;\[/<>:]+;").expect("type variable pattern"));
static PACKAGE_SPECIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[^.;\[/<>:]+/)+").expect("package specifier pattern"));

// Descriptor letters first, then keywords; index % 8 selects the BaseType
const BASE_TYPE_LITERALS: [&str; 16] = [
    "Z", "B", "C", "D", "F", "I", "J", "S",
    "boolean", "byte", "char", "double", "float", "int", "long", "short",
];
const VOID_LITERALS: [&str; 2] = ["V", "void"];
const WILDCARD_LITERALS: [&str; 2] = ["+", "-"];

pub struct SignatureParser<'a> {
    scanner: TextScanner<'a>,
    config: Config,
    /// Deepest malformed-input error seen, speculative attempts included
    furthest: Option<SignatureError>,
    /// Limit violations are reported even when raised inside an attempt
    fatal: Option<SignatureError>,
    /// Type argument lists currently open
    nesting: usize,
}

impl<'a> SignatureParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, Config::default())
    }

    pub fn with_config(input: &'a str, config: Config) -> Self {
        Self {
            scanner: TextScanner::new(input),
            config,
            furthest: None,
            fatal: None,
            nesting: 0,
        }
    }

    pub fn scanner(&self) -> &TextScanner<'a> {
        &self.scanner
    }

    pub fn is_at_end(&self) -> bool {
        self.scanner.is_at_end()
    }

    fn fail(&mut self, production: &'static str) -> SignatureError {
        let error = SignatureError::malformed(production, &self.scanner);
        let further = match &self.furthest {
            Some(previous) => previous.offset() < error.offset(),
            None => true,
        };
        if further {
            self.furthest = Some(error.clone());
        }
        error
    }

    /// Prefer the error that got furthest into the input
    fn best_error(&self, error: SignatureError) -> SignatureError {
        if let Some(fatal) = &self.fatal {
            return fatal.clone();
        }
        match (&self.furthest, error.offset()) {
            (Some(furthest), Some(offset)) if furthest.offset() > Some(offset) => furthest.clone(),
            _ => error,
        }
    }

    fn fail_fatal(&mut self, error: SignatureError) -> SignatureError {
        self.fatal = Some(error.clone());
        error
    }

    /// Trailing input, unless a rolled-back attempt failed further into the
    /// input; then that failure.
    fn trailing_error(&self, production: &'static str) -> SignatureError {
        if let Some(fatal) = &self.fatal {
            return fatal.clone();
        }
        match &self.furthest {
            Some(furthest) if furthest.offset() > Some(self.scanner.offset()) => furthest.clone(),
            _ => SignatureError::trailing(production, &self.scanner),
        }
    }

    fn expect_char(&mut self, c: char, production: &'static str) -> SignatureResult<()> {
        if self.scanner.next_char(c) {
            Ok(())
        } else {
            Err(self.fail(production))
        }
    }

    /// Speculative parse: keep the result and the consumed input on success,
    /// rewind on failure.
    fn attempt<T>(&mut self, parse: fn(&mut Self) -> SignatureResult<T>) -> Option<T> {
        self.scanner.save();
        match parse(self) {
            Ok(value) => {
                self.scanner.release();
                Some(value)
            }
            Err(_) => {
                self.scanner.restore();
                None
            }
        }
    }

    /// Lookahead: report whether `parse` would succeed, never consuming input
    fn recognizes<T>(&mut self, parse: fn(&mut Self) -> SignatureResult<T>) -> bool {
        self.scanner.save();
        let recognized = parse(self).is_ok();
        self.scanner.restore();
        recognized
    }

    /// Run a top-level production and require that it consumes all input
    pub fn parse_complete<T>(
        &mut self,
        parse: fn(&mut Self) -> SignatureResult<T>,
        production: &'static str,
    ) -> SignatureResult<T> {
        log::trace!("parsing {} from '{}'", production, self.scanner.input());
        let value = parse(self).map_err(|e| self.best_error(e))?;
        if !self.scanner.is_at_end() {
            return Err(self.trailing_error(production));
        }
        Ok(value)
    }

    // Leaves

    pub fn can_parse_identifier(&mut self) -> bool {
        self.scanner.test_regex(&IDENTIFIER)
    }

    pub fn parse_identifier(&mut self) -> SignatureResult<Identifier> {
        if self.scanner.test_regex(&IDENTIFIER) {
            Ok(Identifier::new(self.scanner.consume()))
        } else {
            Err(self.fail("Identifier"))
        }
    }

    pub fn can_parse_base_type(&mut self) -> bool {
        self.scanner.test_any(&BASE_TYPE_LITERALS).is_some()
    }

    pub fn parse_base_type(&mut self) -> SignatureResult<BaseType> {
        match self.scanner.test_any(&BASE_TYPE_LITERALS) {
            Some(index) => {
                self.scanner.consume();
                Ok(BaseType::ALL[index % BaseType::ALL.len()])
            }
            None => Err(self.fail("BaseType")),
        }
    }

    pub fn can_parse_void_descriptor(&mut self) -> bool {
        self.scanner.test_any(&VOID_LITERALS).is_some()
    }

    pub fn parse_void_descriptor(&mut self) -> SignatureResult<VoidDescriptor> {
        if self.scanner.test_any(&VOID_LITERALS).is_some() {
            self.scanner.consume();
            Ok(VoidDescriptor)
        } else {
            Err(self.fail("VoidDescriptor"))
        }
    }

    pub fn can_parse_wildcard_indicator(&mut self) -> bool {
        self.scanner.test_any(&WILDCARD_LITERALS).is_some()
    }

    pub fn parse_wildcard_indicator(&mut self) -> SignatureResult<WildcardIndicator> {
        match self.scanner.test_any(&WILDCARD_LITERALS) {
            Some(index) => {
                self.scanner.consume();
                Ok(if index == 0 { WildcardIndicator::UpperBound } else { WildcardIndicator::LowerBound })
            }
            None => Err(self.fail("WildcardIndicator")),
        }
    }

    pub fn can_parse_type_variable_signature(&mut self) -> bool {
        self.scanner.test_regex(&TYPE_VARIABLE)
    }

    pub fn parse_type_variable_signature(&mut self) -> SignatureResult<TypeVariableSignature> {
        if !self.scanner.test_regex(&TYPE_VARIABLE) {
            return Err(self.fail("TypeVariableSignature"));
        }
        let text = self.scanner.consume();
        // the pattern guarantees a leading 'T' and a trailing ';'
        Ok(TypeVariableSignature::new(&text[1..text.len() - 1]))
    }

    pub fn can_parse_package_specifier(&mut self) -> bool {
        self.scanner.test_regex(&PACKAGE_SPECIFIER)
    }

    pub fn parse_package_specifier(&mut self) -> SignatureResult<PackageSpecifier> {
        if !self.scanner.test_regex(&PACKAGE_SPECIFIER) {
            return Err(self.fail("PackageSpecifier"));
        }
        let identifiers = self
            .scanner
            .consume()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(Identifier::new)
            .collect();
        PackageSpecifier::new(identifiers)
    }

    // Class types

    pub fn parse_simple_class_type_signature(&mut self) -> SignatureResult<SimpleClassTypeSignature> {
        let identifier = self.parse_identifier()?;
        let type_arguments = self.attempt(Self::parse_type_arguments);
        Ok(SimpleClassTypeSignature { identifier, type_arguments })
    }

    pub fn parse_class_type_signature_suffix(&mut self) -> SignatureResult<ClassTypeSignatureSuffix> {
        self.expect_char('.', "ClassTypeSignatureSuffix")?;
        let simple = self.parse_simple_class_type_signature()?;
        Ok(ClassTypeSignatureSuffix::new(simple))
    }

    pub fn parse_class_type_signature(&mut self) -> SignatureResult<ClassTypeSignature> {
        self.expect_char('L', "ClassTypeSignature")?;
        let package_specifier = if self.can_parse_package_specifier() {
            Some(self.parse_package_specifier()?)
        } else {
            None
        };
        let simple_class_type_signature = self.parse_simple_class_type_signature()?;
        let mut suffixes = Vec::new();
        while let Some(suffix) = self.attempt(Self::parse_class_type_signature_suffix) {
            suffixes.push(suffix);
        }
        if !self.scanner.next_char(';') && self.config.strict_class_terminator {
            return Err(self.fail("ClassTypeSignature"));
        }
        Ok(ClassTypeSignature { package_specifier, simple_class_type_signature, suffixes })
    }

    /// All leading `[` are taken at once and the element type parsed once,
    /// so array depth costs no recursion.
    pub fn parse_array_type_signature(&mut self) -> SignatureResult<ArrayTypeSignature> {
        let dimensions = self.scanner.remainder().bytes().take_while(|b| *b == b'[').count();
        if dimensions > self.config.max_array_dimensions {
            let max = self.config.max_array_dimensions;
            return Err(self.fail_fatal(SignatureError::ArrayTooDeep { dimensions, max }));
        }
        if dimensions == 0 {
            return Err(self.fail("ArrayTypeSignature"));
        }
        for _ in 0..dimensions {
            self.expect_char('[', "ArrayTypeSignature")?;
        }
        let element = self.parse_java_type_signature()?;
        let mut array = ArrayTypeSignature { component: Arc::new(element) };
        for _ in 1..dimensions {
            array = ArrayTypeSignature { component: Arc::new(JavaTypeSignature::from(array)) };
        }
        Ok(array)
    }

    /// Class type, then type variable, then array; the first that is
    /// recognized is committed.
    pub fn parse_reference_type_signature(&mut self) -> SignatureResult<ReferenceTypeSignature> {
        if let Some(class) = self.attempt(Self::parse_class_type_signature) {
            return Ok(ReferenceTypeSignature::Class(Arc::new(class)));
        }
        if self.can_parse_type_variable_signature() {
            return Ok(ReferenceTypeSignature::TypeVariable(self.parse_type_variable_signature()?));
        }
        if self.scanner.test_literal("[") {
            // array depth errors must not be swallowed as "not recognized"
            return self.parse_array_type_signature().map(ReferenceTypeSignature::Array);
        }
        Err(self.fail("ReferenceTypeSignature"))
    }

    pub fn parse_java_type_signature(&mut self) -> SignatureResult<JavaTypeSignature> {
        if self.can_parse_base_type() {
            return Ok(JavaTypeSignature::Base(self.parse_base_type()?));
        }
        self.parse_reference_type_signature().map(JavaTypeSignature::Reference)
    }

    pub fn parse_result(&mut self) -> SignatureResult<ResultType> {
        if self.can_parse_void_descriptor() {
            return Ok(ResultType::Void(self.parse_void_descriptor()?));
        }
        self.parse_java_type_signature().map(ResultType::Type)
    }

    // Type arguments

    pub fn parse_type_argument(&mut self) -> SignatureResult<TypeArgument> {
        if self.scanner.next_char('*') {
            return Ok(TypeArgument::Unknown);
        }
        let wildcard = if self.can_parse_wildcard_indicator() {
            Some(self.parse_wildcard_indicator()?)
        } else {
            None
        };
        let signature = self.parse_reference_type_signature()?;
        Ok(TypeArgument::Bounded { wildcard, signature })
    }

    pub fn parse_type_arguments(&mut self) -> SignatureResult<TypeArguments> {
        self.expect_char('<', "TypeArguments")?;
        if self.nesting >= self.config.max_nesting_depth {
            let max = self.config.max_nesting_depth;
            return Err(self.fail_fatal(SignatureError::NestingTooDeep { depth: self.nesting + 1, max }));
        }
        self.nesting += 1;
        let arguments = self.parse_type_argument_list();
        self.nesting -= 1;
        arguments
    }

    fn parse_type_argument_list(&mut self) -> SignatureResult<TypeArguments> {
        let mut arguments = Vec::new();
        while let Some(argument) = self.attempt(Self::parse_type_argument) {
            arguments.push(argument);
        }
        if arguments.is_empty() {
            return Err(self.fail("TypeArguments"));
        }
        self.expect_char('>', "TypeArguments")?;
        TypeArguments::new(arguments)
    }

    // Type parameters

    pub fn parse_class_bound(&mut self) -> SignatureResult<ClassBound> {
        self.expect_char(':', "ClassBound")?;
        let signature = self.attempt(Self::parse_reference_type_signature);
        Ok(ClassBound { signature })
    }

    pub fn parse_interface_bound(&mut self) -> SignatureResult<InterfaceBound> {
        self.expect_char(':', "InterfaceBound")?;
        let signature = self.parse_reference_type_signature()?;
        Ok(InterfaceBound { signature })
    }

    pub fn parse_type_parameter(&mut self) -> SignatureResult<TypeParameter> {
        let identifier = self.parse_identifier()?;
        let class_bound = self.parse_class_bound()?;
        let mut interface_bounds = Vec::new();
        while let Some(bound) = self.attempt(Self::parse_interface_bound) {
            interface_bounds.push(bound);
        }
        Ok(TypeParameter { identifier, class_bound, interface_bounds })
    }

    pub fn parse_type_parameters(&mut self) -> SignatureResult<TypeParameters> {
        self.expect_char('<', "TypeParameters")?;
        let mut parameters = Vec::new();
        while let Some(parameter) = self.attempt(Self::parse_type_parameter) {
            parameters.push(parameter);
        }
        if parameters.is_empty() {
            return Err(self.fail("TypeParameters"));
        }
        self.expect_char('>', "TypeParameters")?;
        TypeParameters::new(parameters)
    }

    // Top level

    pub fn parse_throws_signature(&mut self) -> SignatureResult<ThrowsSignature> {
        self.expect_char('^', "ThrowsSignature")?;
        if let Some(class) = self.attempt(Self::parse_class_type_signature) {
            return Ok(ThrowsSignature::Class(Arc::new(class)));
        }
        if self.can_parse_type_variable_signature() {
            return Ok(ThrowsSignature::TypeVariable(self.parse_type_variable_signature()?));
        }
        Err(self.fail("ThrowsSignature"))
    }

    pub fn parse_super_class_signature(&mut self) -> SignatureResult<SuperClassSignature> {
        self.parse_class_type_signature()
    }

    pub fn parse_super_interface_signature(&mut self) -> SignatureResult<SuperInterfaceSignature> {
        self.parse_class_type_signature()
    }

    pub fn parse_class_signature(&mut self) -> SignatureResult<ClassSignature> {
        let type_parameters = self.attempt(Self::parse_type_parameters);
        let super_class = Arc::new(self.parse_super_class_signature()?);
        let mut super_interfaces = Vec::new();
        while let Some(iface) = self.attempt(Self::parse_super_interface_signature) {
            super_interfaces.push(Arc::new(iface));
        }
        Ok(ClassSignature { type_parameters, super_class, super_interfaces })
    }

    pub fn parse_method_signature(&mut self) -> SignatureResult<MethodSignature> {
        let type_parameters = self.attempt(Self::parse_type_parameters);
        self.expect_char('(', "MethodSignature")?;
        let mut parameters = Vec::new();
        while let Some(parameter) = self.attempt(Self::parse_java_type_signature) {
            parameters.push(parameter);
        }
        self.expect_char(')', "MethodSignature")?;
        let result = self.parse_result()?;
        let mut throws = Vec::new();
        while let Some(thrown) = self.attempt(Self::parse_throws_signature) {
            throws.push(thrown);
        }
        Ok(MethodSignature { type_parameters, parameters, result, throws })
    }

    pub fn parse_field_signature(&mut self) -> SignatureResult<FieldSignature> {
        self.parse_reference_type_signature()
    }

    /// Any of the three top-level grammars, which must span the whole input.
    /// A method signature is tried first, then a field signature, then a
    /// class signature; a lone class type is therefore a field signature.
    pub fn parse_signature(&mut self) -> SignatureResult<Signature> {
        if let Some(method) = self.attempt(Self::parse_complete_method) {
            return Ok(Signature::Method(method));
        }
        if let Some(field) = self.attempt(Self::parse_complete_field) {
            return Ok(Signature::Field(field));
        }
        let class = self.parse_class_signature().map_err(|e| self.best_error(e))?;
        if !self.scanner.is_at_end() {
            return Err(self.trailing_error("Signature"));
        }
        Ok(Signature::Class(class))
    }

    fn parse_complete_method(&mut self) -> SignatureResult<MethodSignature> {
        self.parse_complete(Self::parse_method_signature, "MethodSignature")
    }

    fn parse_complete_field(&mut self) -> SignatureResult<FieldSignature> {
        self.parse_complete(Self::parse_field_signature, "FieldSignature")
    }
}

macro_rules! recognizers {
    ($($can:ident => $parse:ident),* $(,)?) => {
        impl<'a> SignatureParser<'a> {
            $(
                pub fn $can(&mut self) -> bool {
                    self.recognizes(Self::$parse)
                }
            )*
        }
    };
}

recognizers! {
    can_parse_simple_class_type_signature => parse_simple_class_type_signature,
    can_parse_class_type_signature_suffix => parse_class_type_signature_suffix,
    can_parse_class_type_signature => parse_class_type_signature,
    can_parse_array_type_signature => parse_array_type_signature,
    can_parse_reference_type_signature => parse_reference_type_signature,
    can_parse_java_type_signature => parse_java_type_signature,
    can_parse_result => parse_result,
    can_parse_type_argument => parse_type_argument,
    can_parse_type_arguments => parse_type_arguments,
    can_parse_class_bound => parse_class_bound,
    can_parse_interface_bound => parse_interface_bound,
    can_parse_type_parameter => parse_type_parameter,
    can_parse_type_parameters => parse_type_parameters,
    can_parse_throws_signature => parse_throws_signature,
    can_parse_super_class_signature => parse_super_class_signature,
    can_parse_super_interface_signature => parse_super_interface_signature,
    can_parse_class_signature => parse_class_signature,
    can_parse_method_signature => parse_method_signature,
    can_parse_field_signature => parse_field_signature,
}

fn parse_whole<'i, T>(
    input: &'i str,
    config: Config,
    parse: fn(&mut SignatureParser<'i>) -> SignatureResult<T>,
    production: &'static str,
) -> SignatureResult<T> {
    log::debug!("parse {}: {}", production, input);
    SignatureParser::with_config(input, config).parse_complete(parse, production)
}

pub fn parse_class_signature(input: &str) -> SignatureResult<ClassSignature> {
    parse_class_signature_with(input, Config::default())
}

pub fn parse_class_signature_with(input: &str, config: Config) -> SignatureResult<ClassSignature> {
    parse_whole(input, config, SignatureParser::parse_class_signature, "ClassSignature")
}

pub fn parse_method_signature(input: &str) -> SignatureResult<MethodSignature> {
    parse_method_signature_with(input, Config::default())
}

pub fn parse_method_signature_with(input: &str, config: Config) -> SignatureResult<MethodSignature> {
    parse_whole(input, config, SignatureParser::parse_method_signature, "MethodSignature")
}

pub fn parse_field_signature(input: &str) -> SignatureResult<FieldSignature> {
    parse_field_signature_with(input, Config::default())
}

pub fn parse_field_signature_with(input: &str, config: Config) -> SignatureResult<FieldSignature> {
    parse_whole(input, config, SignatureParser::parse_field_signature, "FieldSignature")
}

pub fn parse_java_type_signature(input: &str) -> SignatureResult<JavaTypeSignature> {
    parse_whole(input, Config::default(), SignatureParser::parse_java_type_signature, "JavaTypeSignature")
}

pub fn parse_reference_type_signature(input: &str) -> SignatureResult<ReferenceTypeSignature> {
    parse_whole(
        input,
        Config::default(),
        SignatureParser::parse_reference_type_signature,
        "ReferenceTypeSignature",
    )
}

pub fn parse_class_type_signature(input: &str) -> SignatureResult<ClassTypeSignature> {
    parse_whole(input, Config::default(), SignatureParser::parse_class_type_signature, "ClassTypeSignature")
}

pub fn parse_type_parameter(input: &str) -> SignatureResult<TypeParameter> {
    parse_whole(input, Config::default(), SignatureParser::parse_type_parameter, "TypeParameter")
}

pub fn parse_type_parameters(input: &str) -> SignatureResult<TypeParameters> {
    parse_whole(input, Config::default(), SignatureParser::parse_type_parameters, "TypeParameters")
}

pub fn parse_type_arguments(input: &str) -> SignatureResult<TypeArguments> {
    parse_whole(input, Config::default(), SignatureParser::parse_type_arguments, "TypeArguments")
}

pub fn parse_signature(input: &str) -> SignatureResult<Signature> {
    parse_signature_with(input, Config::default())
}

pub fn parse_signature_with(input: &str, config: Config) -> SignatureResult<Signature> {
    log::debug!("parse Signature: {}", input);
    SignatureParser::with_config(input, config).parse_signature()
}

impl std::str::FromStr for ClassSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_class_signature(s)
    }
}

impl std::str::FromStr for MethodSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_method_signature(s)
    }
}

impl std::str::FromStr for ReferenceTypeSignature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field_signature(s)
    }
}

impl std::str::FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_signature(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::printer::SignatureForm;

    #[test]
    fn test_base_type_both_spellings() {
        let mut p = SignatureParser::new("Iint");
        assert_eq!(p.parse_base_type().unwrap(), BaseType::Int);
        assert_eq!(p.parse_base_type().unwrap(), BaseType::Int);
        assert!(p.is_at_end());
    }

    #[test]
    fn test_void_spellings() {
        assert!(SignatureParser::new("V").can_parse_void_descriptor());
        assert!(SignatureParser::new("void").can_parse_void_descriptor());
        assert!(!SignatureParser::new("Z").can_parse_void_descriptor());
    }

    #[test]
    fn test_can_parse_does_not_consume() {
        let mut p = SignatureParser::new("Ljava/lang/String;");
        assert!(p.can_parse_class_type_signature());
        assert!(p.can_parse_reference_type_signature());
        assert!(!p.can_parse_type_variable_signature());
        assert_eq!(p.scanner().offset(), 0);
        assert_eq!(p.scanner().depth(), 0);
    }

    #[test]
    fn test_identifier_stops_at_separators() {
        let mut p = SignatureParser::new("Map.Entry");
        assert_eq!(p.parse_identifier().unwrap().as_str(), "Map");
        assert_eq!(p.scanner().remainder(), ".Entry");
    }

    #[test]
    fn test_package_specifier_segments() {
        let mut p = SignatureParser::new("java/util/Map<TK;TV;>;");
        let package = p.parse_package_specifier().unwrap();
        assert_eq!(package.package_name(), "java.util");
        assert_eq!(p.scanner().remainder(), "Map<TK;TV;>;");
    }

    #[test]
    fn test_type_variable() {
        let mut p = SignatureParser::new("TKEY;");
        assert_eq!(p.parse_type_variable_signature().unwrap(), TypeVariableSignature::new("KEY"));
    }

    #[test]
    fn test_missing_terminator_strict_and_lenient() {
        assert!(parse_class_type_signature("Ljava/lang/String").is_err());

        let mut p = SignatureParser::with_config("Ljava/lang/String", Config::lenient());
        let class = p.parse_class_type_signature().unwrap();
        assert_eq!(class.class_name(), "java.lang.String");
        assert!(p.is_at_end());
    }

    #[test]
    fn test_array_depth_limit() {
        let config = Config::default().with_max_array_dimensions(2);
        let mut p = SignatureParser::with_config("[[[I", config);
        assert_eq!(
            p.parse_array_type_signature(),
            Err(SignatureError::ArrayTooDeep { dimensions: 3, max: 2 })
        );
    }

    #[test]
    fn test_arrays_nest_per_dimension() {
        let mut p = SignatureParser::new("[[TT;");
        let array = p.parse_array_type_signature().unwrap();
        assert_eq!(array.dimensions(), 2);
        assert!(matches!(array.element_type(), JavaTypeSignature::Reference(ReferenceTypeSignature::TypeVariable(_))));
        assert_eq!(array.to_internal_form(), "[[TT;");
    }

    #[test]
    fn test_nesting_depth_limit() {
        let config = Config::default().with_max_nesting_depth(2);
        let mut p = SignatureParser::with_config("La<Lb<Lc<TT;>;>;>;", config.clone());
        assert_eq!(
            p.parse_class_type_signature(),
            Err(SignatureError::NestingTooDeep { depth: 3, max: 2 })
        );

        let mut p = SignatureParser::with_config("La<Lb<TT;>;>;", config);
        assert!(p.parse_class_type_signature().is_ok());
        assert!(p.is_at_end());
    }

    #[test]
    fn test_error_reports_furthest_position() {
        let err = parse_field_signature("Ljava/util/List<Ljava/lang/String;").unwrap_err();
        match err {
            SignatureError::MalformedInput { offset, .. } => assert!(offset >= 16, "offset {}", offset),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_from_str() {
        let method: MethodSignature = "()V".parse().unwrap();
        assert!(method.result.is_void());
        assert!(method.parameters.is_empty());
    }
}
