pub mod legacy;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod schema;
pub mod security;
pub mod spec;

use serde::Deserialize;

use crate::error::ParseError;
use legacy::LegacySpec;
use spec::{Swagger2Spec, VersionString};

/// A parsed description document in one of the supported dialects.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Swagger2(Swagger2Spec),
    Legacy(LegacySpec),
}

impl Document {
    pub fn dialect(&self) -> Dialect {
        match self {
            Document::Swagger2(_) => Dialect::Swagger2,
            Document::Legacy(_) => Dialect::Legacy,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Document::Swagger2(spec) => &spec.info.title,
            Document::Legacy(spec) => spec.info.as_ref().map_or("", |i| i.title.as_str()),
        }
    }

    /// The API version declared by the document (not the dialect version).
    pub fn api_version(&self) -> &str {
        match self {
            Document::Swagger2(spec) => spec.info.version.as_str(),
            Document::Legacy(spec) => spec.api_version.as_ref().map_or("", |v| v.as_str()),
        }
    }
}

/// Which Swagger dialect a document is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Swagger2,
    Legacy,
}

#[derive(Deserialize)]
struct DialectProbe {
    swagger: Option<VersionString>,
    #[serde(rename = "swaggerVersion")]
    swagger_version: Option<VersionString>,
}

/// Parse a description document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    let probe: DialectProbe = serde_yaml_ng::from_str(input)?;
    Ok(match detect_dialect(&probe)? {
        Dialect::Swagger2 => Document::Swagger2(serde_yaml_ng::from_str(input)?),
        Dialect::Legacy => Document::Legacy(serde_yaml_ng::from_str(input)?),
    })
}

/// Parse a description document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let probe: DialectProbe = serde_json::from_str(input)?;
    Ok(match detect_dialect(&probe)? {
        Dialect::Swagger2 => Document::Swagger2(serde_json::from_str(input)?),
        Dialect::Legacy => Document::Legacy(serde_json::from_str(input)?),
    })
}

fn detect_dialect(probe: &DialectProbe) -> Result<Dialect, ParseError> {
    let marker = probe
        .swagger
        .as_ref()
        .or(probe.swagger_version.as_ref())
        .map(VersionString::as_str)
        .ok_or_else(|| ParseError::UnsupportedDialect("<missing>".to_string()))?;

    if marker == "2.0" {
        Ok(Dialect::Swagger2)
    } else if marker.starts_with("1.") {
        Ok(Dialect::Legacy)
    } else {
        Err(ParseError::UnsupportedDialect(marker.to_string()))
    }
}
