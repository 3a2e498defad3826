use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use log::warn;

/// Turn an arbitrary identifier (operation id, nickname, path segment) into a
/// lower camel case name.
pub fn normalize_name(id: &str) -> String {
    id.replace(['.', '-', '{', '}'], "_").to_lower_camel_case()
}

/// Derive an operation name from HTTP method + path template, used when the
/// operation has no `operationId`.
///
/// Examples:
/// - `GET /` → `get`
/// - `GET /orders` → `getOrders`
/// - `GET /orders/{orderId}/items` → `getOrdersByOrderIdItems`
/// - `DELETE /users/{id}/` → `deleteUsersById`
pub fn route_to_name(method: &str, path: &str) -> String {
    let prefix = method.to_lowercase();
    let trimmed = path.strip_suffix('/').unwrap_or(path);

    let segments: Vec<String> = trimmed
        .split('/')
        .filter(|s| !s.is_empty())
        .map(rewrite_path_variable)
        .collect();

    if segments.is_empty() {
        return prefix;
    }

    format!("{prefix}{}", segments.join("-").to_upper_camel_case())
}

/// `{orderId}` → `byOrderId`. Anything that is not a single braced variable is
/// returned untouched.
fn rewrite_path_variable(segment: &str) -> String {
    let Some(inner) = segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .filter(|s| !s.is_empty())
    else {
        return segment.to_string();
    };

    let mut chars = inner.chars();
    match chars.next() {
        Some(first) => format!("by{}{}", first.to_uppercase(), chars.as_str()),
        None => segment.to_string(),
    }
}

/// Keeps method names unique within one generated class.
#[derive(Debug, Default)]
pub struct MethodNames {
    taken: HashSet<String>,
}

impl MethodNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`, appending `2`, `3`, ... when it is already in use.
    pub fn claim(&mut self, name: String) -> String {
        if self.taken.insert(name.clone()) {
            return name;
        }

        let mut suffix = 2;
        loop {
            let candidate = format!("{name}{suffix}");
            if self.taken.insert(candidate.clone()) {
                warn!("duplicate method name `{name}`, renamed to `{candidate}`");
                return candidate;
            }
            suffix += 1;
        }
    }
}
