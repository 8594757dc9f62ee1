use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use schemadiff_core::{Config, DialectConfig, DialectProfile, JsonFileSource, DIALECT_PRESETS};
use schemadiff_engine::{DiffReport, ReportEntry};

const DEFAULT_CONFIG: &str = "schemadiff.toml";

/// schemadiff - Compare two database schema snapshots
#[derive(Parser)]
#[command(name = "schemadiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff a reference snapshot against a comparison snapshot
    Diff {
        /// Reference snapshot (JSON)
        reference: PathBuf,

        /// Comparison snapshot (JSON)
        comparison: PathBuf,

        /// Path to config file (default: schemadiff.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dialect preset, overrides the config file
        #[arg(short, long)]
        dialect: Option<String>,

        /// Output file for the JSON diff report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat catalog names as significant
        #[arg(long)]
        include_catalog: bool,

        /// Report column position changes
        #[arg(long)]
        diff_column_order: bool,
    },

    /// List the built-in dialect presets
    Dialects,
}

/// Command line settings layered over the config file
#[derive(Debug, Default)]
struct Overrides {
    dialect: Option<String>,
    include_catalog: bool,
    diff_column_order: bool,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if let Some(name) = self.dialect {
            config.dialect = DialectConfig::Preset(name);
        }
        config.compare.include_catalog |= self.include_catalog;
        config.compare.diff_column_order |= self.diff_column_order;
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Diff {
            reference,
            comparison,
            config,
            dialect,
            output,
            include_catalog,
            diff_column_order,
        } => {
            let mut config = load_config(config.as_deref(), cli.verbose)?;
            Overrides {
                dialect,
                include_catalog,
                diff_column_order,
            }
            .apply(&mut config);
            diff_command(&config, &reference, &comparison, output.as_deref(), cli.verbose)
        }
        Commands::Dialects => {
            dialects_command();
            Ok(())
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "schemadiff_engine=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Explicit path, else `schemadiff.toml` in the working directory, else defaults
fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    let config = if let Some(path) = path {
        Config::from_file(path)?
    } else if Path::new(DEFAULT_CONFIG).exists() {
        Config::from_file(Path::new(DEFAULT_CONFIG))?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    Ok(config)
}

/// Diff command - compare two snapshot files
fn diff_command(
    config: &Config,
    reference: &Path,
    comparison: &Path,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let database = config.database()?;
    let control = config.compare_control()?;

    if verbose {
        eprintln!("{} dialect: {}", "Using".cyan(), database.short_name);
        eprintln!("{} {} -> {}", "Comparing".cyan(), reference.display(), comparison.display());
    }

    let reference_source = JsonFileSource::new(reference);
    let comparison_source = JsonFileSource::new(comparison);
    let result =
        schemadiff_engine::diff(&reference_source, &comparison_source, &database, &control)?;

    let mut report = DiffReport::from_result(&result);
    report.metadata = Some(serde_json::json!({
        "reference": reference.display().to_string(),
        "comparison": comparison.display().to_string(),
        "dialect": database.short_name,
    }));

    if let Some(path) = output {
        report.save_to_file(path)?;
        if verbose {
            eprintln!("{} {}", "Report saved to:".green(), path.display());
        }
    }

    print_diff_summary(&report);

    if report.has_differences() {
        std::process::exit(1);
    }

    Ok(())
}

/// Dialects command - list presets
fn dialects_command() {
    println!("{}", "Dialect presets:".bold());
    for name in DIALECT_PRESETS {
        let Some(profile) = DialectProfile::preset(name) else {
            continue;
        };
        let default_schema = profile.default_schema.as_deref().unwrap_or("-");
        println!(
            "  {} catalogs: {:<5} schemas: {:<5} default schema: {}",
            format!("{:<8}", name).cyan(),
            profile.supports_catalogs,
            profile.supports_schemas,
            default_schema
        );
    }
}

/// Print entries under a heading, one block per object kind
fn print_entries(heading: &str, entries: &[ReportEntry]) {
    if entries.is_empty() {
        return;
    }

    println!("{}", heading.bold());
    let mut current = None;
    for entry in entries {
        if current != Some(entry.kind) {
            println!("  {}:", entry.kind.to_string().cyan());
            current = Some(entry.kind);
        }

        match &entry.comparison {
            Some(comparison) if comparison != &entry.object => {
                println!("    {} (as {})", entry.object, comparison);
            }
            _ => println!("    {}", entry.object),
        }
        for difference in &entry.differences {
            println!("      {}", difference.message.yellow());
        }
    }
    println!();
}

/// Print diff summary
fn print_diff_summary(report: &DiffReport) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Schema Diff Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    let products = [
        ("Product name", &report.product_name),
        ("Product version", &report.product_version),
    ];
    for (label, diff) in products {
        if !diff.are_equal() {
            println!(
                "{}: {} -> {}",
                label,
                diff.reference.as_deref().unwrap_or("-"),
                diff.comparison.as_deref().unwrap_or("-")
            );
        }
    }

    println!("{}", "Summary:".bold());
    let count = |n: usize| {
        if n > 0 {
            n.to_string().red().bold()
        } else {
            n.to_string().green()
        }
    };
    println!("  Missing:    {}", count(report.summary.missing));
    println!("  Unexpected: {}", count(report.summary.unexpected));
    println!("  Changed:    {}", count(report.summary.changed));
    println!();

    if !report.has_differences() {
        println!("{}", "✓ No differences found!".green().bold());
    } else {
        print_entries("Missing objects:", &report.missing);
        print_entries("Unexpected objects:", &report.unexpected);
        print_entries("Changed objects:", &report.changed);
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}
