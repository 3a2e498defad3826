use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Options for one view-model build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Name of the generated class.
    pub class_name: String,
    /// Name of the generated module wrapper.
    pub module_name: String,
    /// Replaces the document's declared `scheme://host`.
    pub host_override: Option<String>,
    /// Takes precedence over both the override and the document.
    pub custom_endpoint: Option<CustomEndpoint>,
    pub target: TargetDialect,
    /// Force ES6 output regardless of target.
    pub es6: bool,
    /// Extra imports handed through to the template.
    pub imports: Vec<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            class_name: "Api".to_string(),
            module_name: "api".to_string(),
            host_override: None,
            custom_endpoint: None,
            target: TargetDialect::BrowserClient,
            es6: false,
            imports: Vec::new(),
        }
    }
}

impl BuildOptions {
    pub fn is_node(&self) -> bool {
        matches!(
            self.target,
            TargetDialect::ServerClient | TargetDialect::ReactiveClient
        )
    }

    pub fn is_es6(&self) -> bool {
        self.es6 || self.target == TargetDialect::ReactiveClient
    }
}

/// What kind of client the template produces. Only affects the `isNode` and
/// `isES6` flags, never resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetDialect {
    #[default]
    BrowserClient,
    ServerClient,
    ReactiveClient,
    /// Bring-your-own template.
    Custom,
}

/// An explicit endpoint, e.g. `{ protocol: "https", host: "api.example.com" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEndpoint {
    pub protocol: String,
    pub host: String,
}

impl CustomEndpoint {
    /// `https` + `api.example.com` → `https://api.example.com`.
    pub fn url(&self) -> String {
        let protocol = self.protocol.trim_end_matches("//");
        if protocol.ends_with(':') {
            format!("{protocol}//{}", self.host)
        } else {
            format!("{protocol}://{}", self.host)
        }
    }
}

/// Project configuration loaded from `.swaggen.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub input: String,
    pub output: String,
    /// Output file stem; the API version is appended.
    pub output_name: String,
    pub class_name: String,
    pub module_name: String,
    pub target: TargetDialect,
    pub host: Option<String>,
    pub custom_endpoint: Option<CustomEndpoint>,
    pub es6: bool,
    pub imports: Vec<String>,
    pub templates: TemplatePaths,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let options = BuildOptions::default();
        Self {
            input: "swagger.yaml".to_string(),
            output: "src/generated".to_string(),
            output_name: "api".to_string(),
            class_name: options.class_name,
            module_name: options.module_name,
            target: options.target,
            host: None,
            custom_endpoint: None,
            es6: false,
            imports: Vec::new(),
            templates: TemplatePaths::default(),
        }
    }
}

/// User-supplied template files, relative to the working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplatePaths {
    pub class: Option<String>,
}

impl ProjectConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            class_name: self.class_name.clone(),
            module_name: self.module_name.clone(),
            host_override: self.host.clone(),
            custom_endpoint: self.custom_endpoint.clone(),
            target: self.target,
            es6: self.es6,
            imports: self.imports.clone(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swaggen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ProjectConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ProjectConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swaggen configuration
input: swagger.yaml
output: src/generated
output_name: api        # written as <output_name>_<api version>.ts

class_name: Api
module_name: api
target: browser_client  # browser_client | server_client | reactive_client | custom
es6: false
imports: []

# host: https://staging.example.com/v2
# custom_endpoint:
#   protocol: https
#   host: api.example.com

templates: {}
  # class: templates/class.ts.j2   # required when target is custom
"#
}
