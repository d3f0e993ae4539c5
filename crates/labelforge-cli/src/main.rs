// crates/labelforge-cli/src/main.rs
// ============================================================================
// Module: Labelforge CLI Entry Point
// Description: Command dispatcher for offline label studio workflows.
// Purpose: Preview, apply, and score label transformations from the shell.
// Dependencies: clap, labelforge-config, labelforge-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The Labelforge CLI drives the studio engines offline: it loads resource
//! snapshots and strategy parameters from JSON files, the governance config
//! from TOML, and runs the same pure computations the console runs. Inputs
//! are untrusted; every file read is size-limited before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use labelforge_config::GovernanceConfig;
use labelforge_core::ChangeKind;
use labelforge_core::ChangeRecord;
use labelforge_core::FleetReport;
use labelforge_core::Preview;
use labelforge_core::Resource;
use labelforge_core::StudioConfig;
use labelforge_core::StudioSession;
use labelforge_core::evaluate_fleet;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a JSON input file in bytes.
const MAX_INPUT_BYTES: u64 = 1_048_576;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "labelforge", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the aggregated change preview for a resource snapshot.
    Preview(PreviewCommand),
    /// Run the review gate and emit the terminal label maps.
    Apply(ApplyCommand),
    /// Evaluate governance policies across a resource snapshot.
    Compliance(ComplianceCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a governance configuration file.
    Validate(ConfigValidateCommand),
}

/// Output formats for structured CLI commands.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum OutputFormat {
    /// Pretty JSON output.
    Json,
    /// Human-readable text output.
    Text,
}

/// Arguments for the `preview` command.
#[derive(Args, Debug)]
struct PreviewCommand {
    /// Path to the resource snapshot JSON file.
    #[arg(long, value_name = "PATH")]
    resources: PathBuf,
    /// Path to the studio configuration JSON file.
    #[arg(long, value_name = "PATH")]
    rules: PathBuf,
    /// Output format for the preview.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// Arguments for the `apply` command.
#[derive(Args, Debug)]
struct ApplyCommand {
    /// Path to the resource snapshot JSON file.
    #[arg(long, value_name = "PATH")]
    resources: PathBuf,
    /// Path to the studio configuration JSON file.
    #[arg(long, value_name = "PATH")]
    rules: PathBuf,
}

/// Arguments for the `compliance` command.
#[derive(Args, Debug)]
struct ComplianceCommand {
    /// Path to the resource snapshot JSON file.
    #[arg(long, value_name = "PATH")]
    resources: PathBuf,
    /// Path to the governance configuration TOML file.
    #[arg(long, value_name = "PATH")]
    config: PathBuf,
    /// Output format for the fleet report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Path to the governance configuration TOML file.
    #[arg(long, value_name = "PATH")]
    config: PathBuf,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying an operator-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(command) => command_preview(&command),
        Commands::Apply(command) => command_apply(&command),
        Commands::Compliance(command) => command_compliance(&command),
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
        },
    }
}

// ============================================================================
// SECTION: Preview Command
// ============================================================================

/// Executes the `preview` command.
fn command_preview(command: &PreviewCommand) -> CliResult<ExitCode> {
    let resources = load_resources(&command.resources)?;
    let config = load_rules(&command.rules)?;
    let session = StudioSession::new(config);
    let preview = session.preview(&resources);
    match command.format {
        OutputFormat::Json => write_json_line(&preview)?,
        OutputFormat::Text => {
            write_stdout_line(&render_preview_text(&preview))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Apply Command
// ============================================================================

/// Executes the `apply` command.
///
/// Runs the same review gate the studio runs: an incomplete strategy or an
/// empty preview fails before anything is emitted.
fn command_apply(command: &ApplyCommand) -> CliResult<ExitCode> {
    let resources = load_resources(&command.resources)?;
    let config = load_rules(&command.rules)?;
    let mut session = StudioSession::new(config);
    session
        .begin_review(&resources)
        .map_err(|err| CliError::new(format!("apply rejected: {err}")))?;
    let apply_set =
        session.commit().map_err(|err| CliError::new(format!("apply rejected: {err}")))?;
    write_json_line(&apply_set)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Compliance Command
// ============================================================================

/// Executes the `compliance` command.
fn command_compliance(command: &ComplianceCommand) -> CliResult<ExitCode> {
    let resources = load_resources(&command.resources)?;
    let config = load_governance_config(&command.config)?;
    let policies = config.into_policy_set();
    let report = evaluate_fleet(&resources, &policies);
    match command.format {
        OutputFormat::Json => write_json_line(&report)?,
        OutputFormat::Text => {
            write_stdout_line(&render_report_text(&report))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Executes the `config validate` command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_governance_config(&command.config)?;
    let taxonomy_keys = config.taxonomy.keys.len();
    let custom_policies = config.policies.len();
    write_stdout_line(&format!(
        "config ok: {taxonomy_keys} taxonomy keys, {custom_policies} custom policies"
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Loading
// ============================================================================

/// Reads a UTF-8 input file with a size limit enforced before reading.
fn read_limited(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|err| CliError::new(format!("failed to read '{}': {err}", path.display())))?;
    if metadata.len() > MAX_INPUT_BYTES {
        return Err(CliError::new(format!(
            "input '{}' exceeds max size of {MAX_INPUT_BYTES} bytes",
            path.display()
        )));
    }
    fs::read_to_string(path)
        .map_err(|err| CliError::new(format!("failed to read '{}': {err}", path.display())))
}

/// Loads a resource snapshot from a JSON file.
fn load_resources(path: &Path) -> CliResult<Vec<Resource>> {
    let text = read_limited(path)?;
    serde_json::from_str(&text)
        .map_err(|err| CliError::new(format!("invalid resource snapshot '{}': {err}", path.display())))
}

/// Loads studio strategy parameters from a JSON file.
fn load_rules(path: &Path) -> CliResult<StudioConfig> {
    let text = read_limited(path)?;
    serde_json::from_str(&text)
        .map_err(|err| CliError::new(format!("invalid studio config '{}': {err}", path.display())))
}

/// Loads and validates the governance configuration.
fn load_governance_config(path: &Path) -> CliResult<GovernanceConfig> {
    GovernanceConfig::load(path)
        .map_err(|err| CliError::new(format!("invalid governance config '{}': {err}", path.display())))
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders one change record as a text line.
fn render_change(change: &ChangeRecord) -> String {
    match change.kind {
        ChangeKind::Add => {
            format!("  + {} = {}", change.key, change.new_value.as_deref().unwrap_or(""))
        }
        ChangeKind::Modify => format!(
            "  ~ {}: {} -> {}",
            change.key,
            change.old_value.as_deref().unwrap_or(""),
            change.new_value.as_deref().unwrap_or("")
        ),
        ChangeKind::Delete => format!("  - {}", change.key),
    }
}

/// Renders an aggregated preview as human-readable text.
fn render_preview_text(preview: &Preview) -> String {
    if preview.is_empty() {
        return "no resources affected".to_string();
    }
    let mut lines = Vec::new();
    for (id, entry) in preview {
        lines.push(format!("{id} ({} changes)", entry.changes.len()));
        for change in &entry.changes {
            lines.push(render_change(change));
        }
    }
    lines.join("\n")
}

/// Renders a fleet report as human-readable text.
fn render_report_text(report: &FleetReport) -> String {
    let mut lines = vec![
        format!("score: {}/100", report.score),
        format!(
            "resources: {} total, {} compliant, {} violated",
            report.total, report.compliant, report.violated
        ),
    ];
    if !report.by_category.is_empty() {
        lines.push("violations by category:".to_string());
        for (category, count) in &report.by_category {
            lines.push(format!("  {category}: {count}"));
        }
    }
    if !report.inactive_policies.is_empty() {
        lines.push("inactive policies:".to_string());
        for id in &report.inactive_policies {
            lines.push(format!("  {id}"));
        }
    }
    lines.join("\n")
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Serializes a value as pretty JSON and writes it to stdout.
fn write_json_line<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("output serialization failed: {err}")))?;
    write_stdout_line(&text).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
