//! State Algebra CLI driver.
//!
//! Declares variables, adds rules and evidence, compiles, and prints the
//! resulting valid set or a single queried variable's value.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin state-algebra -- \
//!     --variable rain --variable wet_grass \
//!     --rule "rain => wet_grass" \
//!     --evidence rain=true \
//!     --query wet_grass
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use state_algebra::{Config, Engine};

/// Command-line arguments for the State Algebra CLI.
#[derive(Debug, Parser)]
#[command(name = "state-algebra", rename_all = "kebab-case")]
struct Args {
    /// Declare a variable. Repeat for each variable in the knowledge base.
    #[arg(long = "variable", short = 'V')]
    variables: Vec<String>,

    /// Add a rule. Repeat for each rule.
    #[arg(long = "rule", short = 'r')]
    rules: Vec<String>,

    /// Pin evidence as `name=true` or `name=false`. Repeat for each variable.
    #[arg(long = "evidence", short = 'e')]
    evidence: Vec<String>,

    /// Print only this variable's consolidated value instead of the full valid set.
    #[arg(long = "query", short = 'q')]
    query: Option<String>,

    /// Path to a TOML configuration file. Defaults to the standard search path.
    #[arg(long)]
    config: Option<String>,

    /// Emit scheduler progress via tracing.
    #[arg(long, short)]
    verbose: bool,
}

fn parse_evidence(raw: &str) -> anyhow::Result<(String, bool)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("evidence must be `name=true` or `name=false`, got {raw:?}"))?;
    let value = match value {
        "true" => true,
        "false" => false,
        other => anyhow::bail!("evidence value must be `true` or `false`, got {other:?}"),
    };
    Ok((name.to_string(), value))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load().unwrap_or_default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(if args.verbose { "debug" } else { config.logging.level }))
        .init();

    let mut engine = Engine::with_name(args.variables, Some("cli".to_string()), args.verbose)?;
    engine.set_optimization_config(config.scheduler);

    for rule in &args.rules {
        engine.add_rule(rule)?;
    }

    let evidence: Vec<(String, bool)> = args
        .evidence
        .iter()
        .map(|raw| parse_evidence(raw))
        .collect::<anyhow::Result<_>>()?;
    if !evidence.is_empty() {
        engine.add_evidence(evidence.iter().map(|(n, v)| (n.as_str(), *v)))?;
    }

    engine.compile();

    match &args.query {
        Some(name) => {
            let value = engine.get_variable_value(name)?;
            println!("{name} = {value}");
        }
        None => {
            if engine.valid_set()?.is_empty() {
                println!("contradiction: no assignment satisfies the given rules and evidence");
            } else {
                for name in engine.variables() {
                    println!("{name} = {}", engine.get_variable_value(name)?);
                }
            }
        }
    }

    Ok(())
}
