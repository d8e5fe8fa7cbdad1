use jclass::config::Config;
use jclass::signature::*;

fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

#[test]
fn class_signature_round_trip() {
    init_logging();
    let text = "<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/List<TT;>;";
    let class = parse_class_signature(text).expect("Failed to parse");
    assert_eq!(class.to_internal_form(), text);
    assert_eq!(class.super_interfaces.len(), 1);
    assert_eq!(class.type_parameters.as_ref().map(|p| p.parameters().len()), Some(1));
}

#[test]
fn round_trip_assorted_signatures() {
    let methods = [
        "()V",
        "(IJZ[B)D",
        "<K:Ljava/lang/Object;V:Ljava/lang/Object;>(Ljava/util/Map<+TK;-TV;>;)Ljava/util/Set<Ljava/util/Map$Entry<TK;TV;>;>;",
        "<E:Ljava/lang/Exception;>()V^TE;^Ljava/io/IOException;",
        "(Ljava/util/List<*>;[[Ljava/lang/String;)Lcom/example/Outer<TT;>.Inner<TU;>.Deep;",
    ];
    for text in methods {
        let method = parse_method_signature(text).unwrap_or_else(|e| panic!("{}: {}", text, e));
        assert_eq!(method.to_internal_form(), text);
    }

    let classes = [
        "Ljava/lang/Object;",
        "<T::Ljava/lang/Comparable<-TT;>;:Ljava/io/Serializable;>Ljava/lang/Enum<TT;>;Ljava/lang/Runnable;",
    ];
    for text in classes {
        let class = parse_class_signature(text).unwrap_or_else(|e| panic!("{}: {}", text, e));
        assert_eq!(class.to_internal_form(), text);
    }
}

#[test]
fn simple_field_scenario() {
    let field = parse_field_signature("Ljava/lang/String;").unwrap();
    let class = field.as_class().expect("class type");
    assert_eq!(class.package_specifier.as_ref().map(|p| p.package_name()), Some("java.lang".to_string()));
    assert_eq!(field.to_external_form(), "java.lang.String");
}

#[test]
fn array_of_generic_type_scenario() {
    let text = "[Ljava/util/List<Ljava/lang/Integer;>;";
    let ty = parse_java_type_signature(text).unwrap();
    match &ty {
        JavaTypeSignature::Reference(ReferenceTypeSignature::Array(array)) => {
            assert_eq!(array.dimensions(), 1);
            match array.element_type() {
                JavaTypeSignature::Reference(ReferenceTypeSignature::Class(list)) => {
                    assert_eq!(list.class_name(), "java.util.List");
                    let args = list.simple_class_type_signature.type_arguments.as_ref().unwrap();
                    assert_eq!(args.arguments().len(), 1);
                }
                other => panic!("unexpected element {:?}", other),
            }
        }
        other => panic!("unexpected type {:?}", other),
    }
    assert_eq!(ty.to_internal_form(), text);
    assert_eq!(ty.to_external_form(), "java.util.List<java.lang.Integer>[]");
}

#[test]
fn method_with_throws_scenario() {
    let method = parse_method_signature("(Ljava/lang/String;)Ljava/lang/Object;^Ljava/io/IOException;").unwrap();
    assert_eq!(method.parameters.len(), 1);
    assert_eq!(method.result.to_external_form(), "java.lang.Object");
    assert_eq!(method.throws.len(), 1);
    assert!(matches!(&method.throws[0], ThrowsSignature::Class(c) if c.class_name() == "java.io.IOException"));
    assert_eq!(
        method.to_external_form(),
        "java.lang.Object(java.lang.String) throws java.io.IOException"
    );
}

#[test]
fn interface_bound_only_scenario() {
    let param = parse_type_parameter("T::Ljava/lang/Comparable<TT;>;").unwrap();
    assert_eq!(param.identifier.as_str(), "T");
    assert_eq!(param.class_bound, ClassBound::EMPTY);
    assert_eq!(param.interface_bounds.len(), 1);
    assert_eq!(param.interface_bounds[0].signature.to_external_form(), "java.lang.Comparable<T>");
}

#[test]
fn empty_lists_are_malformed() {
    assert!(matches!(parse_type_arguments("<>"), Err(SignatureError::MalformedInput { .. })));
    assert!(matches!(parse_type_parameters("<>"), Err(SignatureError::MalformedInput { .. })));
    assert!(parse_field_signature("Ljava/util/List<>;").is_err());
    assert!(parse_method_signature("<>()V").is_err());
}

#[test]
fn reference_type_disambiguation() {
    assert!(matches!(
        parse_reference_type_signature("Ljava/lang/String;").unwrap(),
        ReferenceTypeSignature::Class(_)
    ));
    assert!(matches!(
        parse_reference_type_signature("TFOO;").unwrap(),
        ReferenceTypeSignature::TypeVariable(_)
    ));
    assert!(matches!(
        parse_reference_type_signature("[TFOO;").unwrap(),
        ReferenceTypeSignature::Array(_)
    ));
    for bad in ["I", "V", "Q", "*", ""] {
        assert!(parse_reference_type_signature(bad).is_err(), "{} should fail", bad);
    }
}

#[test]
fn base_types_accept_both_spellings() {
    let descriptors = parse_method_signature("(ZBCDFIJS)V").unwrap();
    let keywords = parse_method_signature("(booleanbytechardoublefloatintlongshort)void").unwrap();
    assert_eq!(descriptors, keywords);
    assert_eq!(
        keywords.to_external_form(),
        "void(boolean, byte, char, double, float, int, long, short)"
    );
}

#[test]
fn parse_signature_dispatch() {
    assert!(matches!(parse_signature("(I)V").unwrap(), Signature::Method(_)));
    assert!(matches!(parse_signature("<T:Ljava/lang/Object;>()TT;").unwrap(), Signature::Method(_)));
    assert!(matches!(parse_signature("TT;").unwrap(), Signature::Field(_)));
    assert!(matches!(parse_signature("Ljava/lang/Object;").unwrap(), Signature::Field(_)));
    assert!(matches!(
        parse_signature("Ljava/lang/Object;Ljava/lang/Runnable;").unwrap(),
        Signature::Class(_)
    ));
    assert!(matches!(
        parse_signature("<T:Ljava/lang/Object;>Ljava/lang/Object;").unwrap(),
        Signature::Class(_)
    ));
    assert!(parse_signature("(I").is_err());
}

#[test]
fn trailing_input_is_rejected() {
    let err = parse_field_signature("Ljava/lang/String;X").unwrap_err();
    assert_eq!(
        err,
        SignatureError::TrailingInput { production: "FieldSignature", offset: 18, remainder: "X".to_string() }
    );
}

#[test]
fn errors_name_production_and_remainder() {
    let err = parse_method_signature("(I)Q").unwrap_err();
    let message = err.to_string();
    assert!(err.production().is_some());
    assert!(message.contains("offset 3"), "{}", message);
    assert!(message.contains("'Q'"), "{}", message);
}

#[test]
fn missing_terminator_policy() {
    assert!(parse_field_signature("Ljava/lang/String").is_err());
    let lenient = parse_field_signature_with("Ljava/lang/String", Config::lenient()).unwrap();
    assert_eq!(lenient.to_internal_form(), "Ljava/lang/String;");
}

#[test]
fn array_depth_limit() {
    let deep = format!("{}I", "[".repeat(256));
    assert!(matches!(
        parse_java_type_signature(&deep),
        Err(SignatureError::ArrayTooDeep { dimensions: 256, max: 255 })
    ));
    let ok = format!("{}I", "[".repeat(255));
    assert!(parse_java_type_signature(&ok).is_ok());
}

#[test]
fn deeply_nested_type_arguments_fail_cleanly() {
    let nested = |depth: usize| format!("{}LX;{}", "LA<".repeat(depth), ">;".repeat(depth));

    assert!(parse_field_signature(&nested(64)).is_ok());
    assert_eq!(
        parse_field_signature(&nested(500)),
        Err(SignatureError::NestingTooDeep { depth: 65, max: 64 })
    );
    assert!(matches!(
        parse_signature(&nested(500)),
        Err(SignatureError::NestingTooDeep { .. })
    ));

    let relaxed = Config::default().with_max_nesting_depth(200);
    assert!(parse_field_signature_with(&nested(150), relaxed).is_ok());
}

#[test]
fn trailing_input_reports_deeper_failure() {
    let err = parse_class_signature("<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/List<TT;>X").unwrap_err();
    match err {
        SignatureError::MalformedInput { offset, remainder, .. } => {
            assert_eq!(offset, 60);
            assert_eq!(remainder, "X");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn from_str_entry_points() {
    let class: ClassSignature = "Ljava/lang/Object;".parse().unwrap();
    assert_eq!(class.super_class.class_name(), "java.lang.Object");
    let any: Signature = "(J)J".parse().unwrap();
    assert_eq!(any.kind(), "method");
    assert!("(".parse::<MethodSignature>().is_err());
}

#[test]
fn lookahead_leaves_scanner_untouched() {
    let mut parser = SignatureParser::new("<T:Ljava/lang/Object;>(TT;)V");
    assert!(parser.can_parse_type_parameters());
    assert!(parser.can_parse_method_signature());
    assert!(!parser.can_parse_class_signature());
    assert_eq!(parser.scanner().offset(), 0);
    let method = parser.parse_method_signature().unwrap();
    assert!(parser.is_at_end());
    assert_eq!(method.parameters.len(), 1);
}

#[test]
fn factories_build_equal_trees() {
    let built = MethodSignature::new(
        None,
        vec![ClassTypeSignature::of("java.lang.String").unwrap().into()],
        VoidDescriptor,
        vec![],
    );
    assert_eq!(parse_method_signature("(Ljava/lang/String;)V").unwrap(), built);
}
