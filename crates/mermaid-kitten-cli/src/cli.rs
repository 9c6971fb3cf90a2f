//! Command-line interface for the mermaid-kitten utility
//!
//! Provides a CLI to build one Mermaid class diagram from a directory of
//! Swift sources or SourceKitten structure dumps.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::debug;

use mermaid_kitten::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use mermaid_kitten::plugins::{Generator, JsonStructureParser, SourceKittenParser};
use mermaid_kitten::{
    write_diagram, Declaration, DeclarationKind, DiagramConfig, EmitScope, Emitter,
    StructureParser,
};

/// Mermaid Kitten - Mermaid class diagrams from Swift declarations
#[derive(Parser)]
#[command(name = "mermaid-kitten")]
#[command(about = "Generate a Mermaid class diagram from Swift declaration trees")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build one class diagram from every source file below a directory
    Generate {
        /// Directory to scan recursively
        directory: PathBuf,

        /// Output file for the diagram (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram title (defaults to the directory name)
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        parser: ParserArgs,

        /// Only emit enums and their cases
        #[arg(long)]
        enums_only: bool,

        /// Process files one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Print the statements a single file contributes
    Inspect {
        /// Source file to inspect
        file: PathBuf,

        #[command(flatten)]
        parser: ParserArgs,

        /// Only emit enums and their cases
        #[arg(long)]
        enums_only: bool,
    },

    /// List the declaration kinds and whether they produce statements
    Kinds {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Options selecting how source files are turned into declaration trees
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct ParserArgs {
    /// Input format to read
    #[arg(long, value_enum, default_value_t = ParserChoice::Json)]
    pub parser: ParserChoice,

    /// Path to the sourcekitten executable (with --parser sourcekitten)
    #[arg(long, value_name = "PATH")]
    pub sourcekitten: Option<PathBuf>,
}

impl ParserArgs {
    fn build(&self) -> Box<dyn StructureParser> {
        match self.parser {
            ParserChoice::Json => Box::new(JsonStructureParser::new()),
            ParserChoice::Sourcekitten => match &self.sourcekitten {
                Some(executable) => Box::new(SourceKittenParser::with_executable(executable)),
                None => Box::new(SourceKittenParser::new()),
            },
        }
    }
}

/// Supported input formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ParserChoice {
    /// Pre-dumped `sourcekitten structure` output (`*.json`)
    #[default]
    Json,
    /// Run `sourcekitten structure` over `*.swift` files
    Sourcekitten,
}

fn scope_for(enums_only: bool) -> EmitScope {
    if enums_only {
        EmitScope::EnumsOnly
    } else {
        EmitScope::AllTypes
    }
}

/// Whether the default emitter produces anything for a named node of `kind`
fn emits_statements(kind: &DeclarationKind) -> bool {
    let probe = Declaration::new(kind.clone())
        .with_name("Probe")
        .with_child(Declaration::new(DeclarationKind::EnumElement).with_name("probe"));
    !Emitter::default().emit(&probe, Some("Probe")).is_empty()
}

/// Main CLI application
#[derive(Debug, Default)]
pub struct MermaidKittenApp;

impl MermaidKittenApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the CLI flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("mermaid-kitten v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                directory,
                output,
                title,
                parser,
                enums_only,
                sequential,
            } => {
                let config = Self::build_config(&directory, title, enums_only, sequential);
                self.generate_command(&directory, output.as_deref(), &parser, config, cli.verbose)
            }
            Commands::Inspect {
                file,
                parser,
                enums_only,
            } => self.inspect_command(&file, &parser, enums_only, cli.verbose),
            Commands::Kinds { json } => self.kinds_command(json, cli.verbose),
        }
    }

    fn build_config(
        directory: &Path,
        title: Option<String>,
        enums_only: bool,
        sequential: bool,
    ) -> DiagramConfig {
        let config = match title {
            Some(title) => DiagramConfig::new(title),
            None => DiagramConfig::for_directory(directory),
        };
        config
            .with_scope(scope_for(enums_only))
            .with_parallel(!sequential)
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        directory: &Path,
        output: Option<&Path>,
        parser: &ParserArgs,
        config: DiagramConfig,
        verbose: bool,
    ) -> Result<()> {
        let generator = Generator::new(parser.build(), config);
        let (diagram, report) = generator
            .generate_with_report(directory)
            .with_context(|| format!("Failed to generate diagram for '{}'", directory.display()))?;

        if verbose {
            eprintln!(
                "Parsed {} of {} files into {} statements",
                report.parsed, report.files, report.statements
            );
            for path in &report.failed {
                eprintln!("  skipped {}", path.display());
            }
        }

        write_diagram(&diagram.render(), output)?;
        debug!(output = ?output, "Diagram written");
        Ok(())
    }

    /// Handle the inspect command
    fn inspect_command(
        &self,
        file: &Path,
        parser: &ParserArgs,
        enums_only: bool,
        verbose: bool,
    ) -> Result<()> {
        let config = DiagramConfig::default().with_scope(scope_for(enums_only));
        let generator = Generator::new(parser.build(), config);

        if verbose {
            eprintln!("Parsing {} with the {} parser", file.display(), generator.parser_name());
        }

        let statements = generator
            .inspect(file)
            .with_context(|| format!("Failed to inspect '{}'", file.display()))?;
        for statement in &statements {
            println!("{}", statement);
        }
        Ok(())
    }

    /// Handle the kinds command
    fn kinds_command(&self, json: bool, verbose: bool) -> Result<()> {
        let kinds = DeclarationKind::known();

        if verbose {
            eprintln!("Listing {} declaration kinds", kinds.len());
        }

        if json {
            let entries: Vec<_> = kinds
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "identifier": kind.identifier(),
                        "label": kind.label(),
                        "emits": emits_statements(kind),
                    })
                })
                .collect();
            let table = serde_json::json!({
                "kinds": entries,
                "total": kinds.len(),
            });
            println!("{}", serde_json::to_string_pretty(&table)?);
        } else {
            println!("Declaration kinds:");
            for kind in &kinds {
                let marker = if emits_statements(kind) { "*" } else { " " };
                println!("  {} {}", marker, kind.identifier());
            }
            println!();
            println!("Total: {} kinds (* produces statements)", kinds.len());
        }

        Ok(())
    }
}
