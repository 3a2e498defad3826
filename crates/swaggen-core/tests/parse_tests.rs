use swaggen_core::error::ParseError;
use swaggen_core::parse::legacy::LegacyParamType;
use swaggen_core::parse::parameter::{ParameterLocation, ParameterOrRef};
use swaggen_core::parse::schema::{AdditionalProperties, SchemaOrRef};
use swaggen_core::parse::security::SecuritySchemeType;
use swaggen_core::parse::{self, Dialect, Document};

const PETSTORE: &str = include_str!("fixtures/petstore-2.0.yaml");
const ORDERS: &str = include_str!("fixtures/orders-annotated.yaml");
const LEGACY: &str = include_str!("fixtures/pets-1.2.json");

#[test]
fn parse_petstore_yaml() {
    let doc = parse::from_yaml(PETSTORE).expect("should parse petstore");
    assert_eq!(doc.dialect(), Dialect::Swagger2);
    assert_eq!(doc.title(), "Swagger Petstore");
    assert_eq!(doc.api_version(), "1.0.5");

    let Document::Swagger2(spec) = doc else {
        panic!("expected a 2.0 document");
    };
    assert_eq!(spec.paths.len(), 5);
    assert_eq!(spec.definitions.len(), 3);
    assert_eq!(spec.parameters.len(), 2);

    let schemes = spec.security_definitions.as_ref().unwrap();
    assert_eq!(schemes["petstore_auth"].scheme_type, SecuritySchemeType::OAuth2);
    assert_eq!(schemes["api_key"].scheme_type, SecuritySchemeType::ApiKey);
}

#[test]
fn parse_path_item_keeps_vendor_keys_raw() {
    let Document::Swagger2(spec) = parse::from_yaml(PETSTORE).unwrap() else {
        panic!("expected a 2.0 document");
    };
    let item = spec.paths.get("/pet/{petId}").unwrap();
    assert_eq!(item.parameters.len(), 1);

    let keys: Vec<&str> = item.entries.keys().map(String::as_str).collect();
    assert_eq!(keys, ["x-controller", "get", "post"]);
}

#[test]
fn parse_shared_parameter_extensions() {
    let Document::Swagger2(spec) = parse::from_yaml(PETSTORE).unwrap() else {
        panic!("expected a 2.0 document");
    };

    let status = &spec.parameters["status"];
    assert_eq!(status.location, ParameterLocation::Query);
    assert_eq!(status.inline.enum_values.len(), 3);
    assert!(!status.is_proxy_header());

    let forwarded = &spec.parameters["forwardedFor"];
    assert_eq!(forwarded.location, ParameterLocation::Header);
    assert!(forwarded.is_proxy_header());
}

#[test]
fn parse_body_parameter_schema() {
    let Document::Swagger2(spec) = parse::from_yaml(PETSTORE).unwrap() else {
        panic!("expected a 2.0 document");
    };
    let raw = &spec.paths["/pet"].entries["post"];
    let op: swaggen_core::parse::operation::Operation =
        serde_yaml_ng::from_value(raw.clone()).unwrap();

    match &op.parameters[0] {
        ParameterOrRef::Parameter(p) => {
            assert_eq!(p.location, ParameterLocation::Body);
            assert!(p.required);
            assert!(matches!(p.schema, Some(SchemaOrRef::Ref { .. })));
        }
        _ => panic!("expected inline parameter"),
    }
}

#[test]
fn parse_include_directives() {
    let Document::Swagger2(spec) = parse::from_yaml(ORDERS).unwrap() else {
        panic!("expected a 2.0 document");
    };
    match &spec.definitions["OrderResponseModel"] {
        SchemaOrRef::Schema(s) => {
            assert_eq!(s.all_of.len(), 1);
            match &s.additional_properties {
                Some(AdditionalProperties::Directives(d)) => assert_eq!(d.len(), 3),
                other => panic!("expected directives, got {other:?}"),
            }
        }
        _ => panic!("expected inline schema"),
    }
}

#[test]
fn parse_legacy_json() {
    let doc = parse::from_json(LEGACY).expect("should parse legacy document");
    assert_eq!(doc.dialect(), Dialect::Legacy);
    assert_eq!(doc.api_version(), "1.0.0");

    let Document::Legacy(spec) = doc else {
        panic!("expected a legacy document");
    };
    assert_eq!(spec.apis.len(), 3);
    let body = &spec.apis[1].operations[0].parameters[0];
    assert_eq!(body.param_type, LegacyParamType::Body);
    assert!(matches!(body.to_schema(), SchemaOrRef::Ref { ref ref_path, .. } if ref_path == "Pet"));
}

#[test]
fn parse_numeric_swagger_marker() {
    let yaml = "swagger: 2.0\ninfo:\n  title: Numeric\n  version: 1\n";
    let doc = parse::from_yaml(yaml).unwrap();
    assert_eq!(doc.dialect(), Dialect::Swagger2);
    assert_eq!(doc.api_version(), "1");
}

#[test]
fn parse_unsupported_version() {
    let yaml = r#"
openapi: "3.0.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let err = parse::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedDialect(ref v) if v == "<missing>"));

    let err = parse::from_json(r#"{ "swagger": "3.0" }"#).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedDialect(ref v) if v == "3.0"));
}

#[test]
fn parse_malformed_input() {
    assert!(matches!(
        parse::from_json("{ not json"),
        Err(ParseError::Json(_))
    ));
}
