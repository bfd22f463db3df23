use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `composer` - Deterministic assistant response composition.
#[derive(Parser, Debug)]
#[command(name = "composer")]
#[command(version)]
#[command(
    about = "Compose assistant responses from task, routing and execution payloads.",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: ~/.response-composer/config.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose one payload and print the response JSON
    Compose {
        /// Payload JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Salt for trace ids derived from the payload
        #[arg(long, conflicts_with = "ephemeral_trace")]
        seed: Option<String>,

        /// Salt derived ids with a random seed (ids differ between runs)
        #[arg(long)]
        ephemeral_trace: bool,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Compose every payload_<name>.json in a directory into output_<name>.json
    RunExamples {
        /// Directory holding payload files
        dir: PathBuf,

        /// Where to write outputs (default: next to the payloads)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a regression fixture of {name, input, expected_partial} cases
    Regress {
        /// JSON file holding an array of cases
        file: PathBuf,
    },

    /// Check serialized responses (one object or an array) against the contract
    Verify {
        /// Response JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Also print every item run through the output validator
        #[arg(long)]
        repair: bool,
    },

    /// Compose the built-in demonstration payloads
    Demo,
}
