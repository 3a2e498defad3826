use serde::Serialize;

use super::schemas::ResolvedType;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Copy,
    Head,
    Options,
    Link,
    Unlink,
    Purge,
    Lock,
    Unlock,
    Propfind,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Copy => "COPY",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Link => "LINK",
            HttpMethod::Unlink => "UNLINK",
            HttpMethod::Purge => "PURGE",
            HttpMethod::Lock => "LOCK",
            HttpMethod::Unlock => "UNLOCK",
            HttpMethod::Propfind => "PROPFIND",
        }
    }

    /// Match a path-item key or legacy `method` value, case-insensitively.
    /// Returns `None` for anything that is not an allowed verb.
    pub fn from_verb(verb: &str) -> Option<Self> {
        let method = match verb.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "COPY" => HttpMethod::Copy,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            "LINK" => HttpMethod::Link,
            "UNLINK" => HttpMethod::Unlink,
            "PURGE" => HttpMethod::Purge,
            "LOCK" => HttpMethod::Lock,
            "UNLOCK" => HttpMethod::Unlock,
            "PROPFIND" => HttpMethod::Propfind,
            _ => return None,
        };
        Some(method)
    }
}

/// Security capabilities of a method, or of the whole document when aggregated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSecurity {
    pub secure: bool,
    pub bearer_token: bool,
    pub api_key: bool,
    pub basic_auth: bool,
}

/// A fully resolved operation, rendered as one method of the generated class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMethod {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub external_docs: Option<String>,
    pub parameters: Vec<ViewParameter>,
    pub headers: Vec<ViewHeader>,
    pub security: ViewSecurity,
    pub form_encoded: bool,
    pub response_model: Option<ResponseModel>,
}

/// The response model an operation id is annotated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseModel {
    /// e.g. `OrderResponseModel`
    pub name: String,
    /// e.g. `Order`
    pub raw_name: String,
}

/// A request header derived from `produces`/`consumes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewHeader {
    pub name: String,
    pub value: String,
}

/// A resolved parameter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParameter {
    pub name: String,
    pub camel_case_name: String,
    pub location: ViewLocation,
    pub required: bool,
    pub description: Option<String>,
    pub resolved_type: ResolvedType,
    /// The only legal value when the parameter's enum has exactly one member.
    pub singleton: Option<serde_json::Value>,
    /// `x-name-pattern` on query parameters.
    pub pattern: Option<String>,
    /// Stands for one property of an expanded object body.
    pub body_property: bool,
}

impl ViewParameter {
    pub fn is_singleton_enum(&self) -> bool {
        self.singleton.is_some()
    }
}

/// Where a parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLocation {
    Path,
    Query,
    Header,
    Body,
    Form,
}
