use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use log::debug;

use crate::config::BuildOptions;
use crate::error::BuildError;
use crate::parse::legacy::{LegacyOperation, LegacyParamType, LegacyParameter, LegacySpec};
use crate::view::*;

use super::enum_registry::EnumCatalog;
use super::name_normalizer::{MethodNames, normalize_name, route_to_name};
use super::type_resolver::TypeResolver;

/// Build the view model of a Swagger 1.x document.
///
/// Legacy documents carry no security, no model definitions and no body
/// expansion; everything else mirrors the 2.0 builder.
pub fn build_legacy(spec: &LegacySpec, options: &BuildOptions) -> Result<ViewModel, BuildError> {
    let definitions = IndexMap::new();
    let mut enums = EnumCatalog::new();
    let mut names = MethodNames::new();
    let mut methods = Vec::new();

    for api in &spec.apis {
        for op in &api.operations {
            let method = match HttpMethod::from_verb(&op.method) {
                Some(HttpMethod::Options) | None => {
                    debug!("{}: skipping {} operation", api.path, op.method);
                    continue;
                }
                Some(method) => method,
            };

            let name = op
                .nickname
                .as_deref()
                .map(normalize_name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| route_to_name(method.as_str(), &api.path));
            let name = names.claim(name);
            debug!("{} {} -> {name}", method.as_str(), api.path);

            let mut resolver = TypeResolver::new(&definitions, &mut enums);
            let parameters = op
                .parameters
                .iter()
                .filter_map(|p| view_parameter(&mut resolver, p).transpose())
                .collect::<Result<Vec<_>, BuildError>>()?;

            methods.push(ViewMethod {
                name,
                method,
                path: api.path.clone(),
                summary: op.summary.clone(),
                external_docs: None,
                parameters,
                headers: accept_header(spec, op),
                security: ViewSecurity::default(),
                form_encoded: false,
                response_model: None,
            });
        }
    }

    let info = spec.info.as_ref();
    Ok(ViewModel {
        title: info.map(|i| i.title.clone()).unwrap_or_default(),
        description: info
            .and_then(|i| i.description.clone())
            .or_else(|| spec.description.clone()),
        version: spec
            .api_version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        domain: legacy_domain(spec, options),
        class_name: options.class_name.clone(),
        module_name: options.module_name.clone(),
        is_node: options.is_node(),
        is_es6: options.is_es6(),
        imports: options.imports.clone(),
        security: ViewSecurity::default(),
        enumerations: enums.into_definitions(),
        definitions: Vec::new(),
        methods,
    })
}

fn accept_header(spec: &LegacySpec, op: &LegacyOperation) -> Vec<ViewHeader> {
    op.produces
        .as_ref()
        .or(spec.produces.as_ref())
        .filter(|l| !l.is_empty())
        .map(|list| ViewHeader {
            name: "Accept".to_string(),
            value: list.join(", "),
        })
        .into_iter()
        .collect()
}

/// Legacy `basePath` is already absolute, so an override replaces it outright.
fn legacy_domain(spec: &LegacySpec, options: &BuildOptions) -> Option<String> {
    if let Some(endpoint) = &options.custom_endpoint {
        return Some(endpoint.url());
    }
    options
        .host_override
        .clone()
        .or_else(|| spec.base_path.clone())
        .filter(|d| !d.is_empty())
}

/// `None` for a parameter whose `paramType` has no view location.
fn view_parameter(
    resolver: &mut TypeResolver<'_>,
    param: &LegacyParameter,
) -> Result<Option<ViewParameter>, BuildError> {
    let location = match param.param_type {
        LegacyParamType::Path => ViewLocation::Path,
        LegacyParamType::Query => ViewLocation::Query,
        LegacyParamType::Body => ViewLocation::Body,
        LegacyParamType::Header => ViewLocation::Header,
        LegacyParamType::Form => ViewLocation::Form,
        LegacyParamType::Unknown => {
            debug!("skipping parameter {} with unrecognized paramType", param.name);
            return Ok(None);
        }
    };

    Ok(Some(ViewParameter {
        name: param.name.clone(),
        camel_case_name: param.name.to_lower_camel_case(),
        location,
        required: param.required,
        description: param.description.clone(),
        resolved_type: resolver.resolve_hinted(&param.to_schema(), Some(&param.name))?,
        singleton: match param.enum_values.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        },
        pattern: match location {
            ViewLocation::Query => param.name_pattern.clone(),
            _ => None,
        },
        body_property: false,
    }))
}
