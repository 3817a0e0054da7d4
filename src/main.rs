use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{self, filter::EnvFilter};

use ruleset_resolver::{
    config::ServiceConfig,
    report::{OutputFormat, ReportFormatter},
    resolver::RuleSetResolver,
    types::RuleSetId,
};

/// Rule-set resolver - turn rule-set selections into the active rule list
#[derive(Parser, Debug)]
#[command(name = "ruleset-resolver")]
#[command(about = "Resolve refactoring rule sets into a filtered list of active rules")]
#[command(version)]
struct Args {
    /// Project file (default: nearest ruleset.yml above the current directory)
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Directories holding rule-set definitions (can be specified multiple times)
    #[arg(
        short = 'r',
        long = "registry-dir",
        value_name = "PATH",
        global = true,
        help = "Directory holding rule-set definitions (default: ~/.ruleset-resolver/sets)"
    )]
    registry_directories: Vec<PathBuf>,

    /// Do not register the built-in rule sets
    #[arg(long = "no-builtin", global = true)]
    no_builtin: bool,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the target paths and active rules
    Resolve,
    /// Print which sets contributed each active rule and what was excluded
    Explain,
    /// List registered rule sets
    ListSets,
    /// Print every rule a single set expands to
    ShowSet {
        /// Rule set identifier
        id: RuleSetId,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!("Starting with arguments: {:?}", args);

    let config = create_config_from_args(&args)?;
    let registry = config
        .registry_loader()
        .load()
        .context("Failed to load rule set registry")?;
    let resolver = RuleSetResolver::new(&registry);

    let output = match &args.command {
        Command::Resolve | Command::Explain => {
            let Some(project) = &config.project_config else {
                bail!("No ruleset.yml found; pass one with --config");
            };
            let configuration = project.to_configuration();
            if matches!(args.command, Command::Resolve) {
                let active = resolver.resolve(&configuration)?;
                ReportFormatter::active_configuration(&active, args.format)?
            } else {
                let report = resolver.explain(&configuration)?;
                ReportFormatter::resolution_report(&report, args.format)?
            }
        }
        Command::ListSets => ReportFormatter::rule_sets(&registry, args.format)?,
        Command::ShowSet { id } => {
            let rules = registry.expand(id)?;
            ReportFormatter::rule_set_expansion(id, &rules, args.format)?
        }
    };

    print!("{output}");
    Ok(())
}

/// Create a ServiceConfig from command line arguments
fn create_config_from_args(args: &Args) -> Result<ServiceConfig> {
    let mut config = ServiceConfig {
        include_builtin_sets: !args.no_builtin,
        ..Default::default()
    };
    if !args.registry_directories.is_empty() {
        config.registry_directories = args.registry_directories.clone();
    }

    let cwd = std::env::current_dir()?;
    Ok(config.with_project_config(args.config.as_deref(), &cwd)?)
}
