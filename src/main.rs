// Thu Oct 15 2026 - Alex

use anyhow::{Context, Result};
use apitrace_vmi::config::TracingConfig;
use apitrace_vmi::logging::LoggingUtils;
use apitrace_vmi::schema::builder::{FunctionSignature, SchemaBuilder};
use apitrace_vmi::schema::{ParameterKind, ParameterSchema};
use clap::{Parser, Subcommand};
use colored::Colorize;
use regex::Regex;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "API call tracing definitions for VM introspection", long_about = None)]
struct Args {
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a definitions file and print the parameter layout of every traced function
    Check {
        definitions: PathBuf,

        /// Only show functions whose name matches this expression
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() {
    let args = Args::parse();
    LoggingUtils::init_from_env_or(LoggingUtils::level_from_verbosity(args.verbose));

    let result = match args.command {
        Command::Check { definitions, filter } => check(&definitions, filter.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn check(path: &Path, filter: Option<&str>) -> Result<()> {
    let filter = filter
        .map(Regex::new)
        .transpose()
        .context("Invalid function filter")?;

    println!("{} Loading definitions: {}", "[*]".blue(), path.display());
    let config = TracingConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let address_width = config.address_width()?;
    let signatures = SchemaBuilder::build_all(&config).context("Invalid parameter definitions")?;

    println!(
        "{} {} modules, {} functions, {} structures ({})",
        "[+]".green(),
        config.modules.len(),
        signatures.len(),
        config.structures.len(),
        address_width
    );
    println!();

    for signature in signatures
        .iter()
        .filter(|signature| filter.as_ref().map_or(true, |re| re.is_match(&signature.function_name)))
    {
        print_signature(signature);
    }
    Ok(())
}

fn print_signature(signature: &FunctionSignature) {
    println!(
        "{}!{}",
        signature.module_name.dimmed(),
        signature.function_name.cyan().bold()
    );
    for (index, parameter) in signature.parameters.iter().enumerate() {
        print_parameter(parameter, 1, Some(index));
    }
}

fn print_parameter(parameter: &ParameterSchema, depth: usize, index: Option<usize>) {
    let indent = "  ".repeat(depth);
    let slot = index.map(|i| format!("[{}] ", i)).unwrap_or_default();

    match parameter.kind() {
        ParameterKind::Leaf(kind) => {
            println!("{}{}{} {} ({} bytes)", indent, slot, parameter.name(), kind.to_string().green(), parameter.width());
        }
        ParameterKind::Composite(fields) => {
            println!("{}{}{} {} ({} bytes)", indent, slot, parameter.name(), "*struct".yellow(), parameter.width());
            for field in fields {
                print_parameter(field, depth + 1, None);
            }
        }
    }
}
