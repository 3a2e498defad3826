use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::info;

use swaggen_core::config::{self, CONFIG_FILE_NAME, ProjectConfig, TargetDialect};
use swaggen_core::parse::{self, Dialect, Document};
use swaggen_core::view::ViewModel;
use swaggen_core::{Renderer, TemplateSet};
use swaggen_typescript::TypeScriptRenderer;

#[derive(Parser)]
#[command(name = "swaggen", about = "Swagger 1.x/2.0 TypeScript client generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a client from a Swagger document
    Generate(GenerateArgs),

    /// Validate a Swagger document
    Validate {
        /// Path to the Swagger document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the view model built from a Swagger document
    Inspect {
        /// Path to the Swagger document (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new swaggen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Flags override the matching `.swaggen.yaml` entries.
#[derive(clap::Args)]
struct GenerateArgs {
    /// Path to the Swagger document (YAML or JSON)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file stem; the API version is appended
    #[arg(short = 'n', long)]
    output_name: Option<String>,

    /// Host override, joined with the document's base path
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// Name of the generated class
    #[arg(long)]
    class_name: Option<String>,

    /// Name of the generated module
    #[arg(long)]
    module_name: Option<String>,

    /// Kind of client to generate
    #[arg(long)]
    target: Option<TargetArg>,

    /// Class template replacing the built-in one
    #[arg(long)]
    template: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    BrowserClient,
    ServerClient,
    ReactiveClient,
    Custom,
}

impl From<TargetArg> for TargetDialect {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::BrowserClient => TargetDialect::BrowserClient,
            TargetArg::ServerClient => TargetDialect::ServerClient,
            TargetArg::ReactiveClient => TargetDialect::ReactiveClient,
            TargetArg::Custom => TargetDialect::Custom,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => cmd_generate(args),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swaggen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ProjectConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Read and parse a document, choosing JSON or YAML by file extension.
fn load_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let document = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(document)
}

fn load_view(path: &Path, cfg: &ProjectConfig) -> Result<ViewModel> {
    let document = load_document(path)?;
    let view = swaggen_core::build(&document, &cfg.build_options())
        .with_context(|| format!("failed to build {}", path.display()))?;
    Ok(view)
}

/// Fold command-line flags into the loaded config.
fn apply_overrides(cfg: &mut ProjectConfig, args: &GenerateArgs) {
    if let Some(input) = &args.input {
        cfg.input = input.display().to_string();
    }
    if let Some(output) = &args.output {
        cfg.output = output.display().to_string();
    }
    if let Some(name) = &args.output_name {
        cfg.output_name = name.clone();
    }
    if let Some(url) = &args.url {
        cfg.host = Some(url.clone());
    }
    if let Some(class_name) = &args.class_name {
        cfg.class_name = class_name.clone();
    }
    if let Some(module_name) = &args.module_name {
        cfg.module_name = module_name.clone();
    }
    if let Some(target) = args.target {
        cfg.target = target.into();
    }
    if let Some(template) = &args.template {
        cfg.templates.class = Some(template.display().to_string());
    }
}

fn load_templates(cfg: &ProjectConfig) -> Result<TemplateSet> {
    let class = match &cfg.templates.class {
        Some(path) => Some(
            fs::read_to_string(path).with_context(|| format!("failed to read template {path}"))?,
        ),
        None => None,
    };
    Ok(TemplateSet { class })
}

/// `<stem>_<version>.ts`, or `<stem>.ts` when the document carries no version.
fn output_file_name(stem: &str, version: &str) -> String {
    if version.is_empty() {
        format!("{stem}.ts")
    } else {
        format!("{stem}_{version}.ts")
    }
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    apply_overrides(&mut cfg, &args);

    let view = load_view(Path::new(&cfg.input), &cfg)?;
    let templates = load_templates(&cfg)?;
    let source = TypeScriptRenderer::new(cfg.target)
        .render(&view, &templates)
        .context("failed to render client")?;

    let output_dir = PathBuf::from(&cfg.output);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let path = output_dir.join(output_file_name(&cfg.output_name, &view.version));
    fs::write(&path, source).with_context(|| format!("failed to write {}", path.display()))?;
    info!("{} methods, {} models", view.methods.len(), view.definitions.len());
    eprintln!("Generated {} → {}", view.class_name, path.display());
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let document = load_document(&input)?;

    let dialect = match document.dialect() {
        Dialect::Swagger2 => "Swagger 2.0",
        Dialect::Legacy => "Swagger 1.x",
    };
    eprintln!("Valid {} document: {}", dialect, document.title());
    eprintln!("  Version: {}", document.api_version());

    // Also validate that it builds a view model
    let view = swaggen_core::build(&document, &ProjectConfig::default().build_options())?;
    eprintln!("  Methods: {}", view.methods.len());
    eprintln!("  Models: {}", view.definitions.len());
    eprintln!("  Enumerations: {}", view.enumerations.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let view = load_view(&input, &cfg)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&view)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&view)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("api", "1.0.5"), "api_1.0.5.ts");
        assert_eq!(output_file_name("client", ""), "client.ts");
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "swaggen",
            "generate",
            "-i",
            "petstore.json",
            "-u",
            "https://staging.example.com",
            "--target",
            "server-client",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };

        let mut cfg = ProjectConfig {
            output_name: "client".into(),
            ..ProjectConfig::default()
        };
        apply_overrides(&mut cfg, &args);
        assert_eq!(cfg.input, "petstore.json");
        assert_eq!(cfg.host.as_deref(), Some("https://staging.example.com"));
        assert_eq!(cfg.target, TargetDialect::ServerClient);
        assert_eq!(cfg.output_name, "client");
    }
}
