//! wifihal conformance validator.
//!
//! Drives a live chip service instance through registered scenarios and
//! reports whether the returned status codes match what the advertised
//! capability mask allows.
//!
//! # Usage
//!
//! Run a specific scenario:
//! ```bash
//! wifihal-conformance --case power.body_sar_scenario --instance wifi0=127.0.0.1:9000
//! ```
//!
//! List all scenarios:
//! ```bash
//! wifihal-conformance --list
//! ```
//!
//! List scenarios for a category:
//! ```bash
//! wifihal-conformance --list --category power
//! ```
//!
//! Show the contract rules each scenario covers:
//! ```bash
//! wifihal-conformance --list --show-rules
//! ```
//!
//! # Exit Codes
//!
//! - 0: scenario passed
//! - 1: contract violation
//! - 2: setup or internal error

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wifihal_conformance::driver::Driver;
use wifihal_core::InstanceId;

#[derive(Parser, Debug)]
#[command(name = "wifihal-conformance")]
#[command(about = "Capability-gated conformance validator for wifihal chip services")]
struct Args {
    /// Run a specific scenario (e.g., "power.body_sar_scenario")
    #[arg(long)]
    case: Option<String>,

    /// List available scenarios
    #[arg(long)]
    list: bool,

    /// Filter by category (power, callback, lifecycle)
    #[arg(long)]
    category: Option<String>,

    /// Show contract rules covered by each scenario
    #[arg(long)]
    show_rules: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: String,

    /// Instance under test as name=host:port; falls back to the
    /// WIFIHAL_INSTANCE environment variable
    #[arg(long)]
    instance: Option<String>,
}

/// JSON output for a scenario listing.
#[derive(Serialize)]
struct ScenarioJson {
    name: String,
    rules: Vec<String>,
}

/// JSON output for a scenario result.
#[derive(Serialize)]
struct ResultJson {
    scenario: String,
    instance: String,
    outcome: &'static str,
    passed: bool,
    error: Option<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if args.list {
        list_scenarios(&args);
        return;
    }

    if let Some(case) = &args.case {
        run_scenario(case, &args);
    } else {
        eprintln!("Usage: wifihal-conformance --case <scenario> --instance <name=host:port>");
        eprintln!("       wifihal-conformance --list");
        std::process::exit(2);
    }
}

fn list_scenarios(args: &Args) {
    let scenarios = if let Some(category) = &args.category {
        wifihal_conformance::list_category(category)
    } else {
        wifihal_conformance::list_all()
    };

    if args.format == "json" {
        let output: Vec<ScenarioJson> = scenarios
            .iter()
            .map(|(name, rules)| ScenarioJson {
                name: name.clone(),
                rules: rules.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        print_json(&output);
    } else {
        println!("Available scenarios:\n");

        let mut current_category = "";
        for (name, rules) in &scenarios {
            let category = name.split('.').next().unwrap_or("");
            if category != current_category {
                if !current_category.is_empty() {
                    println!();
                }
                println!("## {category}");
                current_category = category;
            }

            if args.show_rules {
                println!("  {} [{}]", name, rules.join(", "));
            } else {
                println!("  {name}");
            }
        }

        println!("\nTotal: {} scenarios", scenarios.len());

        let mut all_rules: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for (_, rules) in &scenarios {
            all_rules.extend(rules.iter().copied());
        }
        println!("Rules covered: {}", all_rules.len());
    }
}

fn run_scenario(case: &str, args: &Args) {
    let (instance, addr) = match resolve_instance(args) {
        Ok(resolved) => resolved,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let mut driver = match Driver::connect(addr.as_str(), instance.clone()) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("error: could not connect to {addr}: {e}");
            std::process::exit(2);
        }
    };

    let result = wifihal_conformance::run_case(case, &mut driver);

    if args.format == "json" {
        print_json(&ResultJson {
            scenario: case.to_string(),
            instance: instance.to_string(),
            outcome: result.outcome.as_str(),
            passed: result.passed(),
            error: result.error.clone(),
        });
    } else {
        eprintln!("{}: {case}", result.outcome.as_str().to_uppercase());
        if let Some(error) = &result.error {
            eprintln!("  {error}");
        }
    }

    std::process::exit(result.exit_code());
}

/// The instance under test: `--instance name=host:port`, else the
/// WIFIHAL_INSTANCE environment variable in the same format.
fn resolve_instance(args: &Args) -> Result<(InstanceId, String), String> {
    let raw = match &args.instance {
        Some(raw) => raw.clone(),
        None => std::env::var("WIFIHAL_INSTANCE").map_err(|_| {
            "no instance given: pass --instance name=host:port or set WIFIHAL_INSTANCE".to_string()
        })?,
    };

    let (name, addr) = raw
        .split_once('=')
        .ok_or_else(|| format!("malformed instance '{raw}': expected name=host:port"))?;
    if name.is_empty() || addr.is_empty() {
        return Err(format!("malformed instance '{raw}': expected name=host:port"));
    }

    Ok((InstanceId::from(name), addr.to_string()))
}

fn print_json<T: Serialize>(output: &T) {
    match serde_json::to_string(output) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: could not serialize output: {e}");
            std::process::exit(2);
        }
    }
}
