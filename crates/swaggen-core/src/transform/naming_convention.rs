//! The `…ResponseModel` naming convention.
//!
//! Documents written for this generator encode model roles and response bindings
//! in plain identifiers:
//!
//! - a definition named `OrderResponseModel` is a model entry of the view;
//! - an operation id `createOrder-OrderResponseModel` binds the operation to it;
//! - `additionalProperties: [includes_many:ItemResponseModel]` declares a relation.
//!
//! All substring matching lives here.

use crate::view::{ResponseModel, ViewInclude};

const MARKER: &str = "ResponseModel";

/// Whether `name` contains `ResponseModel` anywhere but at its very start.
pub fn has_response_model_marker(name: &str) -> bool {
    contains_after_start(name, MARKER)
}

fn contains_after_start(haystack: &str, needle: &str) -> bool {
    haystack.find(needle).is_some_and(|idx| idx > 0)
}

/// Split an operation id into the id to normalize and its response-model
/// annotation, if it carries one.
///
/// `createOrder-ResponseModel-OrderResponseModel` yields `createOrder` bound to
/// `OrderResponseModel`. Ids with a single `-` segment are not annotated.
pub fn split_operation_id(operation_id: &str) -> (String, Option<ResponseModel>) {
    if !has_response_model_marker(operation_id) {
        return (operation_id.to_string(), None);
    }

    let mut segments: Vec<&str> = operation_id.split('-').collect();
    if segments.len() < 2 {
        return (operation_id.to_string(), None);
    }

    let Some(model) = segments.pop() else {
        return (operation_id.to_string(), None);
    };
    while segments.len() > 1 && segments.last().is_some_and(|s| s.ends_with(MARKER)) {
        segments.pop();
    }

    let binding = ResponseModel {
        name: model.to_string(),
        raw_name: model_raw_name(model),
    };
    (segments.join("."), Some(binding))
}

/// `OrderResponseModel` → `Order`.
pub fn model_raw_name(model: &str) -> String {
    model.replacen(MARKER, "", 1)
}

/// Role flags derived from a definition name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionRole {
    pub is_response: bool,
    pub is_request: bool,
}

/// Classify a definition. Returns `None` for definitions that are not model
/// entries (e.g. `RepresentationModel` or `ResponseModelBase`).
pub fn classify_definition(name: &str) -> Option<DefinitionRole> {
    if !has_response_model_marker(name) {
        return None;
    }
    Some(DefinitionRole {
        is_response: contains_after_start(name, "Response"),
        is_request: contains_after_start(name, "Request"),
    })
}

/// `OrderResponseModel` → `OrderModel`.
pub fn plain_name(name: &str) -> String {
    name.replacen("Response", "", 1)
}

/// `OrderModel` → `Order`.
pub fn raw_name(plain_name: &str) -> String {
    plain_name.replacen("Model", "", 1)
}

/// Parse one `includes_one:<Type>ResponseModel` or
/// `includes_many:<Type>ResponseModel` directive.
pub fn parse_include_directive(directive: &str) -> Option<ViewInclude> {
    let (kind, type_name) = directive.split_once(':')?;
    let many = match kind.trim() {
        "includes_one" => false,
        "includes_many" => true,
        _ => return None,
    };

    let type_name = type_name.trim();
    if !has_response_model_marker(type_name) {
        return None;
    }

    let model = model_raw_name(type_name);
    let mut key = model.to_lowercase();
    if many {
        key.push('s');
    }

    Some(ViewInclude {
        key,
        model,
        response_model: type_name.to_string(),
        many,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_position() {
        assert!(has_response_model_marker("OrderResponseModel"));
        assert!(!has_response_model_marker("ResponseModelBase"));
        assert!(!has_response_model_marker("RepresentationModel"));
    }

    #[test]
    fn test_split_annotated_id() {
        let (id, binding) = split_operation_id("createOrder-ResponseModel-OrderResponseModel");
        assert_eq!(id, "createOrder");
        let binding = binding.unwrap();
        assert_eq!(binding.name, "OrderResponseModel");
        assert_eq!(binding.raw_name, "Order");
    }

    #[test]
    fn test_split_two_segments() {
        let (id, binding) = split_operation_id("listOrders-OrderResponseModel");
        assert_eq!(id, "listOrders");
        assert_eq!(binding.unwrap().name, "OrderResponseModel");
    }

    #[test]
    fn test_single_segment_is_not_annotated() {
        let (id, binding) = split_operation_id("getOrderResponseModel");
        assert_eq!(id, "getOrderResponseModel");
        assert!(binding.is_none());
    }

    #[test]
    fn test_plain_id_untouched() {
        let (id, binding) = split_operation_id("find-pets");
        assert_eq!(id, "find-pets");
        assert!(binding.is_none());
    }

    #[test]
    fn test_classify() {
        let role = classify_definition("OrderResponseModel").unwrap();
        assert!(role.is_response);
        assert!(!role.is_request);

        let role = classify_definition("OrderRequestResponseModel").unwrap();
        assert!(role.is_request);

        assert!(classify_definition("Order").is_none());
    }

    #[test]
    fn test_plain_and_raw_names() {
        let plain = plain_name("OrderResponseModel");
        assert_eq!(plain, "OrderModel");
        assert_eq!(raw_name(&plain), "Order");
    }

    #[test]
    fn test_include_directives() {
        let many = parse_include_directive("includes_many:ItemResponseModel").unwrap();
        assert_eq!(many.key, "items");
        assert_eq!(many.model, "Item");
        assert!(many.many);

        let one = parse_include_directive("includes_one:CustomerResponseModel").unwrap();
        assert_eq!(one.key, "customer");
        assert!(!one.many);

        assert!(parse_include_directive("includes_one:Customer").is_none());
        assert!(parse_include_directive("embeds:CustomerResponseModel").is_none());
        assert!(parse_include_directive("garbage").is_none());
    }
}
