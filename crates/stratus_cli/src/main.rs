//! STRATUS CLI
//!
//! Synthesizes the deployment topology into a plan. Exit code 0 on
//! success; configuration and provider errors exit non-zero.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use stratus_core::{ACCOUNT_VAR, REGION_VAR};
use stratus_graph::Plan;
use stratus_provider::PlanProvider;

/// Running `stratus` synthesizes the deployment plan; there is nothing
/// else to ask it for, so there are no subcommands.
#[derive(Parser)]
#[command(name = "stratus")]
#[command(about = "STRATUS - deterministic cloud deployment synthesizer", long_about = None)]
struct Cli {
    /// Write the plan to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Target region, overriding STRATUS_REGION
    #[arg(long)]
    region: Option<String>,
    /// Target account, overriding STRATUS_ACCOUNT
    #[arg(long)]
    account: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut provider = PlanProvider::new();
    let lookup = layered(&cli.region, &cli.account, |key| std::env::var(key).ok());
    let plan = stratus_deploy::run_from(&mut provider, lookup)?;
    emit(&plan, cli.output.as_deref())?;
    Ok(())
}

/// Environment lookup with CLI overrides layered over a base lookup.
/// An override wins over whatever the base would return.
fn layered<'a, F>(
    region: &'a Option<String>,
    account: &'a Option<String>,
    base: F,
) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |key| match key {
        REGION_VAR => region.clone().or_else(|| base(key)),
        ACCOUNT_VAR => account.clone().or_else(|| base(key)),
        _ => base(key),
    }
}

/// Render the plan to the requested destination, then list outputs for
/// the operator.
fn emit(plan: &Plan, output: Option<&std::path::Path>) -> Result<()> {
    let rendered = plan.to_json_pretty()?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("Plan written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    for o in &plan.outputs {
        println!("{}.{} = {}", o.stack, o.key, o.value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratus_core::Environment;

    #[test]
    fn test_override_wins_over_base() {
        let region = Some("eu-west-1".to_string());
        let account = None;
        let lookup = layered(&region, &account, |key| match key {
            REGION_VAR => Some("us-east-1".to_string()),
            ACCOUNT_VAR => Some("123".to_string()),
            _ => None,
        });

        assert_eq!(lookup(REGION_VAR).as_deref(), Some("eu-west-1"));
        assert_eq!(lookup(ACCOUNT_VAR).as_deref(), Some("123"));
    }

    #[test]
    fn test_missing_region_stays_missing() {
        let lookup = layered(&None, &None, |_| None);
        assert!(lookup(REGION_VAR).is_none());
    }

    #[test]
    fn test_emit_writes_plan_file() {
        let env = Environment::new(Some("123"), "us-east-1");
        let mut provider = PlanProvider::new();
        let plan = stratus_deploy::synthesize(&mut provider, &env).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        emit(&plan, Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("load-balanced-service"));
        assert!(written.contains("\"region\": \"us-east-1\""));
    }
}
