//! Shotplan CLI Entry Point
//!
//! Compiles a translation review sheet into an execution plan.
//!
//! # Usage
//!
//! ```bash
//! # Compile a sheet into execution_plan.json
//! shotplan sample_workflow.csv
//!
//! # Target a staging deployment and write elsewhere
//! shotplan sheet.csv --base-url https://staging.example.com --output plans/es.json
//!
//! # Use a config file and timestamped filenames
//! shotplan sheet.csv --config shotplan.yaml --timestamp
//!
//! # Show the generated scripts
//! shotplan sheet.csv --print-scripts
//! ```

use std::env;
use std::process::ExitCode;

use colored::Colorize;
use log::{error, info};

use shotplan::plan::filename::Disambiguator;
use shotplan::plan::{save_plan, ExecutionPlan, PlanCompiler, DEFAULT_PLAN_PATH};
use shotplan::workflow::load_items;
use shotplan::{PlannerConfig, APP_NAME, VERSION};

/// Command-line configuration parsed from arguments.
#[derive(Debug, Default)]
struct Config {
    sheet_path: Option<String>,
    output_path: Option<String>,
    config_path: Option<String>,
    base_url: Option<String>,
    screenshots_dir: Option<String>,
    timestamp: bool,
    strict: bool,
    print_scripts: bool,
    verbose: bool,
}

impl Config {
    /// Applies command-line overrides on top of file and environment settings.
    fn apply_to(&self, planner: &mut PlannerConfig) {
        if let Some(ref url) = self.base_url {
            planner.base_url = url.clone();
        }
        if let Some(ref dir) = self.screenshots_dir {
            planner.screenshots_dir = dir.clone();
        }
        if self.timestamp {
            planner.filenames.disambiguator = Disambiguator::Timestamp;
        }
        if self.strict {
            planner.strict = true;
        }
    }
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME.bold(), VERSION);
    println!("Translation Screenshot Planner");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: shotplan [OPTIONS] <CSV_FILE>");
    println!();
    println!("Arguments:");
    println!("  <CSV_FILE>              Review sheet with Screen/Page, Section, String, Language, Misc");
    println!();
    println!("Options:");
    println!("  --output PATH           Plan output path (default: {})", DEFAULT_PLAN_PATH);
    println!("  --config PATH           YAML configuration file");
    println!("  --base-url URL          Address of the app under review");
    println!("  --screenshots-dir DIR   Directory screenshot paths are derived under");
    println!("  --timestamp             Append a timestamp to screenshot filenames");
    println!("  --strict                Abort on the first invalid row instead of skipping it");
    println!("  --print-scripts         Print each step's highlight script");
    println!("  --verbose               Enable debug logging");
    println!("  --help                  Show this help message");
    println!("  --version               Show version information");
    println!();
    println!("Examples:");
    println!("  shotplan sample_workflow.csv");
    println!("  shotplan sheet.csv --base-url https://staging.example.com --output plans/es.json");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut i = 1; // Skip program name

    let value_for = |i: &mut usize, flag: &str| -> Result<String, String> {
        *i += 1;
        args.get(*i)
            .cloned()
            .ok_or_else(|| format!("{} requires a value", flag))
    };

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--output" | "-o" => config.output_path = Some(value_for(&mut i, arg)?),
            "--config" | "-c" => config.config_path = Some(value_for(&mut i, arg)?),
            "--base-url" => config.base_url = Some(value_for(&mut i, arg)?),
            "--screenshots-dir" => config.screenshots_dir = Some(value_for(&mut i, arg)?),
            "--timestamp" => config.timestamp = true,
            "--strict" => config.strict = true,
            "--print-scripts" => config.print_scripts = true,
            "--verbose" | "-v" => config.verbose = true,
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                if config.sheet_path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                config.sheet_path = Some(arg.clone());
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Builds the planner configuration from file, environment and flags.
fn load_planner_config(config: &Config) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    let mut planner = match config.config_path {
        Some(ref path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };

    planner.apply_env();
    config.apply_to(&mut planner);
    planner.validate()?;

    Ok(planner)
}

/// Prints the step listing, summary and warnings.
fn print_plan(plan: &ExecutionPlan, print_scripts: bool) {
    println!();
    println!("{}", "=== Workflow Steps ===".bold());
    for step in &plan.steps {
        println!(
            "Step {} [{}]",
            step.item.describe(),
            step.strategy.to_string().cyan()
        );
        println!("    {} {}", "url: ".dimmed(), step.url);
        println!("    {} {}", "shot:".dimmed(), step.filepath);

        if print_scripts {
            println!();
            println!("{}", step.script);
        }
    }

    println!();
    println!("{}", "=== Summary ===".bold());
    println!("Total items:      {}", plan.summary.total_items);
    println!("Languages needed: {}", plan.summary.languages_needed.join(", "));
    println!("Pages needed:     {}", plan.summary.pages_needed.join(", "));

    if !plan.warnings.is_empty() {
        println!();
        println!("{}", format!("Skipped {} item(s):", plan.warnings.len()).yellow());
        for warning in &plan.warnings {
            println!("  - {}", warning);
        }
    }
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    let Some(sheet_path) = config.sheet_path.clone() else {
        print_usage();
        return Err("No CSV file given".into());
    };

    setup_logging(config.verbose);
    print_banner();

    let planner = load_planner_config(&config)?;
    info!("Base URL: {}", planner.base_url);

    let items = load_items(&sheet_path).map_err(|e| {
        error!("Failed to load sheet: {}", e);
        e
    })?;

    let plan = PlanCompiler::new(planner).compile_plan(sheet_path.as_str(), &items)?;
    print_plan(&plan, config.print_scripts);

    let output_path = config
        .output_path
        .unwrap_or_else(|| DEFAULT_PLAN_PATH.to_string());
    save_plan(&plan, &output_path)?;

    println!();
    println!(
        "{} Execution plan saved to: {}",
        "✓".green(),
        output_path.bold()
    );

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("shotplan")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_arguments_defaults() {
        let config = parse_arguments(&args(&["sheet.csv"])).unwrap();
        assert_eq!(config.sheet_path.as_deref(), Some("sheet.csv"));
        assert!(config.output_path.is_none());
        assert!(!config.timestamp);
    }

    #[test]
    fn test_parse_arguments_options() {
        let config = parse_arguments(&args(&[
            "--output",
            "plan.json",
            "sheet.csv",
            "--base-url",
            "http://qa:8080",
            "--timestamp",
            "--strict",
        ]))
        .unwrap();

        assert_eq!(config.output_path.as_deref(), Some("plan.json"));
        assert_eq!(config.base_url.as_deref(), Some("http://qa:8080"));
        assert!(config.timestamp);
        assert!(config.strict);
    }

    #[test]
    fn test_parse_arguments_missing_value() {
        let result = parse_arguments(&args(&["sheet.csv", "--output"]));
        assert!(result.unwrap_err().contains("requires a value"));
    }

    #[test]
    fn test_parse_arguments_unknown_option() {
        assert!(parse_arguments(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_parse_arguments_extra_positional() {
        assert!(parse_arguments(&args(&["a.csv", "b.csv"])).is_err());
    }

    #[test]
    fn test_apply_to_overrides_planner() {
        let config = parse_arguments(&args(&[
            "sheet.csv",
            "--screenshots-dir",
            "shots/es",
            "--timestamp",
        ]))
        .unwrap();
        let mut planner = PlannerConfig::default();
        config.apply_to(&mut planner);

        assert_eq!(planner.screenshots_dir, "shots/es");
        assert_eq!(planner.filenames.disambiguator, Disambiguator::Timestamp);
        assert!(!planner.strict);
    }
}
