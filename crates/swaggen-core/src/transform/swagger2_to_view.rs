use std::collections::HashSet;

use heck::ToLowerCamelCase;
use log::debug;

use crate::config::BuildOptions;
use crate::error::BuildError;
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::lookup_parameter;
use crate::parse::schema::{AdditionalProperties, SchemaOrRef};
use crate::parse::security::SecuritySchemeType;
use crate::parse::spec::Swagger2Spec;
use crate::view::*;

use super::enum_registry::EnumCatalog;
use super::name_normalizer::{MethodNames, normalize_name, route_to_name};
use super::naming_convention::{
    classify_definition, parse_include_directive, plain_name, raw_name, split_operation_id,
};
use super::type_resolver::TypeResolver;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Build the view model of a Swagger 2.0 document.
pub fn build_swagger2(spec: &Swagger2Spec, options: &BuildOptions) -> Result<ViewModel, BuildError> {
    let mut builder = Swagger2Builder {
        spec,
        options,
        enums: EnumCatalog::new(),
        names: MethodNames::new(),
    };

    // Phase 1: operations, in path order then verb order
    let mut methods = Vec::new();
    for (path, item) in &spec.paths {
        for (verb, raw) in &item.entries {
            let Some(method) = HttpMethod::from_verb(verb) else {
                debug!("{path}: ignoring non-verb key `{verb}`");
                continue;
            };
            let op: Operation =
                serde_yaml_ng::from_value(raw.clone()).map_err(|source| BuildError::InvalidOperation {
                    method: method.as_str().to_string(),
                    path: path.clone(),
                    source,
                })?;
            methods.push(builder.build_method(path, method, &op, &item.parameters)?);
        }
    }

    // Phase 2: document-level security, aggregated over secure methods
    let mut security = ViewSecurity {
        secure: spec.security_definitions.is_some(),
        ..ViewSecurity::default()
    };
    for method in methods.iter().filter(|m| m.security.secure) {
        security.bearer_token |= method.security.bearer_token;
        security.api_key |= method.security.api_key;
        security.basic_auth |= method.security.basic_auth;
    }

    // Phase 3: model definitions
    let definitions = builder.build_definitions()?;

    Ok(ViewModel {
        title: spec.info.title.clone(),
        description: spec.info.description.clone(),
        version: spec.info.version.to_string(),
        domain: compute_domain(spec, options),
        class_name: options.class_name.clone(),
        module_name: options.module_name.clone(),
        is_node: options.is_node(),
        is_es6: options.is_es6(),
        imports: options.imports.clone(),
        security,
        enumerations: builder.enums.into_definitions(),
        definitions,
        methods,
    })
}

struct Swagger2Builder<'a> {
    spec: &'a Swagger2Spec,
    options: &'a BuildOptions,
    enums: EnumCatalog,
    names: MethodNames,
}

impl Swagger2Builder<'_> {
    fn resolver(&mut self) -> TypeResolver<'_> {
        TypeResolver::new(&self.spec.definitions, &mut self.enums)
    }

    fn build_method(
        &mut self,
        path: &str,
        method: HttpMethod,
        op: &Operation,
        shared: &[ParameterOrRef],
    ) -> Result<ViewMethod, BuildError> {
        let (name, response_model) = match &op.operation_id {
            Some(id) => {
                let (base, binding) = split_operation_id(id);
                (normalize_name(&base), binding)
            }
            None => (String::new(), None),
        };
        let name = if name.is_empty() {
            route_to_name(method.as_str(), path)
        } else {
            name
        };
        let name = self.names.claim(name);
        debug!("{} {path} -> {name}", method.as_str());

        let (headers, form_encoded) = self.headers(op);

        let mut parameters = Vec::new();
        for entry in op.parameters.iter().chain(shared) {
            self.add_parameter(entry, &mut parameters)?;
        }

        Ok(ViewMethod {
            name,
            method,
            path: path.to_string(),
            summary: op.description.clone().or_else(|| op.summary.clone()),
            external_docs: op.external_docs.as_ref().map(|d| d.url.clone()),
            parameters,
            headers,
            security: self.method_security(op),
            form_encoded,
            response_model,
        })
    }

    fn method_security(&self, op: &Operation) -> ViewSecurity {
        let mut security = ViewSecurity {
            secure: self.spec.security.is_some() || op.security.is_some(),
            ..ViewSecurity::default()
        };

        let Some(schemes) = &self.spec.security_definitions else {
            return security;
        };

        let required: HashSet<&str> = self
            .spec
            .security
            .iter()
            .chain(op.security.iter())
            .flatten()
            .flat_map(|requirement| requirement.keys())
            .map(String::as_str)
            .collect();

        for (scheme_name, scheme) in schemes {
            if !required.contains(scheme_name.as_str()) {
                continue;
            }
            match scheme.scheme_type {
                SecuritySchemeType::OAuth2 => security.bearer_token = true,
                SecuritySchemeType::ApiKey => security.api_key = true,
                SecuritySchemeType::Basic => security.basic_auth = true,
                SecuritySchemeType::Unknown => {
                    debug!("security scheme {scheme_name} has an unrecognized type, no auth flag set")
                }
            }
        }

        security
    }

    /// `Accept`/`Content-Type` headers, operation lists overriding document lists.
    fn headers(&self, op: &Operation) -> (Vec<ViewHeader>, bool) {
        let produces = op.produces.as_ref().or(self.spec.produces.as_ref());
        let consumes = op.consumes.as_ref().or(self.spec.consumes.as_ref());

        let mut headers = Vec::new();
        for (header, media_types) in [("Accept", produces), ("Content-Type", consumes)] {
            if let Some(list) = media_types.filter(|l| !l.is_empty()) {
                headers.push(ViewHeader {
                    name: header.to_string(),
                    value: list.join(", "),
                });
            }
        }

        let form_encoded = consumes.is_some_and(|l| l.iter().any(|c| c == FORM_URLENCODED));
        (headers, form_encoded)
    }

    fn add_parameter(
        &mut self,
        entry: &ParameterOrRef,
        out: &mut Vec<ViewParameter>,
    ) -> Result<(), BuildError> {
        let param: &Parameter = match entry {
            ParameterOrRef::Ref { ref_path } => lookup_parameter(self.spec, ref_path)?,
            ParameterOrRef::Parameter(param) => param.as_ref(),
        };

        if param.exclude_from_bindings {
            debug!("parameter `{}` excluded from bindings", param.name);
            return Ok(());
        }
        if param.is_proxy_header() && !self.options.is_node() {
            debug!("proxy header `{}` skipped for browser target", param.name);
            return Ok(());
        }

        // Object-shaped bodies become one argument per property.
        if param.location == ParameterLocation::Body
            && let Some(SchemaOrRef::Schema(body)) = &param.schema
            && !body.properties.is_empty()
        {
            for (name, property) in &body.properties {
                let required = body.required.iter().any(|r| r == name);
                let synthetic = Parameter::body_property(name, property, required);
                let mut view = self.view_parameter(&synthetic)?;
                view.body_property = true;
                out.push(view);
            }
            return Ok(());
        }

        out.push(self.view_parameter(param)?);
        Ok(())
    }

    fn view_parameter(&mut self, param: &Parameter) -> Result<ViewParameter, BuildError> {
        let location = match param.location {
            ParameterLocation::Path => ViewLocation::Path,
            ParameterLocation::Query => ViewLocation::Query,
            ParameterLocation::Header => ViewLocation::Header,
            ParameterLocation::FormData => ViewLocation::Form,
            ParameterLocation::Body => ViewLocation::Body,
        };

        let singleton = match param.inline.enum_values.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        };

        Ok(ViewParameter {
            name: param.name.clone(),
            camel_case_name: param.name.to_lower_camel_case(),
            location,
            required: param.required,
            description: param.inline.description.clone(),
            resolved_type: self.resolver().resolve_parameter(param)?,
            singleton,
            pattern: match location {
                ViewLocation::Query => param.name_pattern.clone(),
                _ => None,
            },
            body_property: false,
        })
    }

    fn build_definitions(&mut self) -> Result<Vec<ViewDefinition>, BuildError> {
        let spec = self.spec;
        let mut definitions = Vec::new();

        for (name, definition) in &spec.definitions {
            let Some(role) = classify_definition(name) else {
                continue;
            };

            let (description, includes) = match definition {
                SchemaOrRef::Schema(schema) => {
                    let includes = match &schema.additional_properties {
                        Some(AdditionalProperties::Directives(directives)) => directives
                            .iter()
                            .filter_map(|d| parse_include_directive(d))
                            .collect(),
                        _ => Vec::new(),
                    };
                    (schema.description.clone(), includes)
                }
                SchemaOrRef::Ref { description, .. } => (description.clone(), Vec::new()),
                SchemaOrRef::Unknown(_) => (None, Vec::new()),
            };

            let plain = plain_name(name);
            definitions.push(ViewDefinition {
                name: name.clone(),
                model_raw_name: raw_name(&plain),
                model_plain_name: plain,
                description,
                is_response: role.is_response,
                is_request: role.is_request,
                includes,
                resolved_type: self.resolver().resolve(definition)?,
            });
        }

        Ok(definitions)
    }
}

/// Base URL, by precedence: custom endpoint, host override + base path, then
/// `scheme://host` + base path when the document declares all three.
fn compute_domain(spec: &Swagger2Spec, options: &BuildOptions) -> Option<String> {
    if let Some(endpoint) = &options.custom_endpoint {
        return Some(endpoint.url());
    }

    let base_path = spec.base_path.as_deref().unwrap_or_default();
    if let Some(host) = &options.host_override {
        return Some(join_url(host, base_path));
    }

    match (spec.schemes.first(), &spec.host, &spec.base_path) {
        (Some(scheme), Some(host), Some(base_path)) => {
            Some(join_url(&format!("{scheme}://{host}"), base_path))
        }
        _ => None,
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomEndpoint;

    fn spec(yaml: &str) -> Swagger2Spec {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://api.example.com/", "/v1/"), "https://api.example.com/v1");
        assert_eq!(join_url("https://api.example.com", "/"), "https://api.example.com");
        assert_eq!(join_url("https://api.example.com", ""), "https://api.example.com");
    }

    #[test]
    fn test_domain_from_document() {
        let doc = spec("swagger: '2.0'\nhost: petstore.io\nbasePath: /v2/\nschemes: [https, http]\n");
        assert_eq!(
            compute_domain(&doc, &BuildOptions::default()).as_deref(),
            Some("https://petstore.io/v2")
        );
    }

    #[test]
    fn test_domain_requires_scheme_host_and_base_path() {
        let doc = spec("swagger: '2.0'\nhost: petstore.io\nschemes: [https]\n");
        assert_eq!(compute_domain(&doc, &BuildOptions::default()), None);
    }

    #[test]
    fn test_domain_precedence() {
        let doc = spec("swagger: '2.0'\nhost: petstore.io\nbasePath: /v2\nschemes: [https]\n");
        let mut options = BuildOptions {
            host_override: Some("http://localhost:3000/".into()),
            ..BuildOptions::default()
        };
        assert_eq!(
            compute_domain(&doc, &options).as_deref(),
            Some("http://localhost:3000/v2")
        );

        options.custom_endpoint = Some(CustomEndpoint {
            protocol: "https:".into(),
            host: "gateway.example.com".into(),
        });
        assert_eq!(
            compute_domain(&doc, &options).as_deref(),
            Some("https://gateway.example.com")
        );
    }

    #[test]
    fn test_vendor_keys_are_ignored() {
        let doc = spec(
            r#"
swagger: "2.0"
paths:
  /pets:
    x-handler: pets
    get:
      operationId: listPets
    trace:
      operationId: tracePets
"#,
        );
        let view = build_swagger2(&doc, &BuildOptions::default()).unwrap();
        let names: Vec<&str> = view.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["listPets"]);
    }

    #[test]
    fn test_invalid_operation_is_reported() {
        let doc = spec(
            r#"
swagger: "2.0"
paths:
  /pets:
    get: "not an operation"
"#,
        );
        let err = build_swagger2(&doc, &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, BuildError::InvalidOperation { ref method, .. } if method == "GET"));
    }

    #[test]
    fn test_unrecognized_security_type_sets_no_flag() {
        let doc = spec(
            r#"
swagger: "2.0"
securityDefinitions:
  jwt:
    type: bearer
    scheme: JWT
paths:
  /pets:
    get:
      operationId: listPets
      security:
        - jwt: []
"#,
        );
        let view = build_swagger2(&doc, &BuildOptions::default()).unwrap();
        assert_eq!(
            view.methods[0].security,
            ViewSecurity {
                secure: true,
                ..ViewSecurity::default()
            }
        );
    }

    #[test]
    fn test_missing_shared_parameter() {
        let doc = spec(
            r##"
swagger: "2.0"
paths:
  /pets:
    get:
      parameters:
        - $ref: "#/parameters/missing"
"##,
        );
        let err = build_swagger2(&doc, &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, BuildError::Resolve(_)));
    }
}
