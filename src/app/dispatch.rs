use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use crate::cli::commands::{Cli, Commands};
use response_composer::runner::{self, CaseReport, VerifyReport};
use response_composer::{Composer, Config, Response};

pub fn dispatch(cli: Cli, config: &Config) -> Result<()> {
    let composer = Composer::from_config(config).context("Invalid template overrides")?;
    let pretty = config.output.pretty;

    match cli.command {
        Commands::Compose {
            input,
            seed,
            ephemeral_trace,
            compact,
        } => {
            let seed = if ephemeral_trace {
                Some(uuid::Uuid::new_v4().to_string())
            } else {
                seed
            };
            let payload = read_json_input(&input)?;
            let response = match seed.as_deref() {
                Some(seed) => composer.compose_value_with_seed(&payload, seed),
                None => composer.compose_value(&payload),
            };
            println!("{}", to_json(&response.to_json(), pretty && !compact)?);
            Ok(())
        }

        Commands::RunExamples { dir, out } => {
            let outcomes = runner::run_examples(&composer, &dir, out.as_deref(), pretty)?;
            for outcome in &outcomes {
                println!(
                    "OK {} -> {}",
                    file_name(&outcome.payload),
                    file_name(&outcome.output)
                );
            }
            info!(count = outcomes.len(), "examples complete");
            Ok(())
        }

        Commands::Regress { file } => {
            let summary = runner::run_file(&composer, &file)?;
            for report in &summary.reports {
                print_report(report);
            }
            println!(
                "{} passed, {} failed",
                summary.passed(),
                summary.failed()
            );
            if !summary.all_passed() {
                bail!("{} regression case(s) failed", summary.failed());
            }
            Ok(())
        }

        Commands::Verify { input, repair } => {
            let value = read_json_input(&input)?;
            let reports = runner::verify_value(&value);
            for report in &reports {
                print_verify_report(report);
            }
            if repair {
                let repaired: Vec<serde_json::Value> = runner::repair_value(&value)
                    .iter()
                    .map(Response::to_json)
                    .collect();
                println!("{}", to_json(&repaired, pretty)?);
            }
            let failed = reports.iter().filter(|r| !r.passed()).count();
            if failed > 0 {
                bail!("{failed} object(s) violate the response contract");
            }
            Ok(())
        }

        Commands::Demo => {
            #[derive(Serialize)]
            struct DemoBlock<'a> {
                case: &'a str,
                result: serde_json::Value,
            }

            for outcome in runner::run_demo(&composer) {
                let block = DemoBlock {
                    case: outcome.name,
                    result: outcome.response.to_json(),
                };
                println!("{}", to_json(&block, pretty)?);
            }
            Ok(())
        }
    }
}

fn read_json_input(input: &str) -> Result<serde_json::Value> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        let path = response_composer::config::expand_path(input);
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("{input} is not valid JSON"))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("Failed to serialize output")
}

fn print_report(report: &CaseReport) {
    if report.passed() {
        println!("PASS {}", report.name);
        return;
    }
    println!("FAIL {}", report.name);
    for issue in &report.contract_issues {
        println!("  contract: {issue}");
    }
    for mismatch in &report.mismatches {
        let actual = mismatch
            .actual
            .as_ref()
            .map_or_else(|| "<absent>".to_string(), ToString::to_string);
        let (field, expected) = (&mismatch.field, &mismatch.expected);
        println!("  {field}: expected {expected}, got {actual}");
    }
}

fn print_verify_report(report: &VerifyReport) {
    if report.passed() {
        println!("[OK] index={}", report.index);
        return;
    }
    let issues: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
    let errors = issues.join(",");
    println!("[FAIL] index={} errors={errors}", report.index);
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}
