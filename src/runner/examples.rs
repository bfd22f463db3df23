use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::read_json;
use crate::core::composer::Composer;
use crate::error::RunnerError;

pub const PAYLOAD_PREFIX: &str = "payload_";
pub const OUTPUT_PREFIX: &str = "output_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleOutcome {
    pub payload: PathBuf,
    pub output: PathBuf,
}

/// `payload_<name>.json` → `output_<name>.json`; `None` for other files.
pub fn output_name(file_name: &str) -> Option<String> {
    let stem = file_name
        .strip_prefix(PAYLOAD_PREFIX)?
        .strip_suffix(".json")?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{OUTPUT_PREFIX}{stem}.json"))
}

/// Compose every `payload_*.json` in `dir` (sorted by name) and write the
/// matching `output_*.json` into `out_dir`, or next to the payload.
pub fn run_examples(
    composer: &Composer,
    dir: &Path,
    out_dir: Option<&Path>,
    pretty: bool,
) -> Result<Vec<ExampleOutcome>, RunnerError> {
    if !dir.is_dir() {
        return Err(RunnerError::NotADirectory(dir.to_path_buf()));
    }
    let out_dir = out_dir.unwrap_or(dir);
    fs::create_dir_all(out_dir).map_err(|source| RunnerError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let entries = fs::read_dir(dir).map_err(|source| RunnerError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut payloads: Vec<(PathBuf, String)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let output = output_name(&name)?;
            Some((entry.path(), output))
        })
        .collect();
    payloads.sort();

    let mut outcomes = Vec::with_capacity(payloads.len());
    for (payload_path, output) in payloads {
        let payload = read_json(&payload_path)?;
        let response = composer.compose_value(&payload).to_json();
        let rendered = if pretty {
            serde_json::to_string_pretty(&response)
        } else {
            serde_json::to_string(&response)
        }
        .map_err(|source| RunnerError::Json {
            path: payload_path.clone(),
            source,
        })?;

        let output_path = out_dir.join(output);
        fs::write(&output_path, format!("{rendered}\n")).map_err(|source| RunnerError::Write {
            path: output_path.clone(),
            source,
        })?;
        info!(
            payload = %payload_path.display(),
            output = %output_path.display(),
            "example.composed"
        );
        outcomes.push(ExampleOutcome {
            payload: payload_path,
            output: output_path,
        });
    }

    Ok(outcomes)
}
