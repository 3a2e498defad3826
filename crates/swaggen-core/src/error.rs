use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported Swagger dialect: {0}")]
    UnsupportedDialect(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("malformed reference: {0}")]
    MalformedReference(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("invalid operation {method} {path}: {source}")]
    InvalidOperation {
        method: String,
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
