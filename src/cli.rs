use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Parameters;

/// Assemble form definitions into view-models and harvest submissions
#[derive(Parser, Debug, Clone)]
#[command(name = "formview", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FORMVIEW_CONFIG", default_value = "formview.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the assembled view-model of a form definition as JSON
    Assemble {
        /// Form definition file (json, yaml or toml)
        form: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Assemble a form, apply submitted values and print the harvested results
    Harvest {
        /// Form definition file (json, yaml or toml)
        form: PathBuf,

        /// Submitted value as name=value (percent-encoding allowed)
        #[arg(long = "submit", value_parser = parse_pair)]
        submitted: Vec<(String, String)>,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// List registered field type identifiers
    Types,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Query-string parameter as name=value (percent-encoding allowed)
    #[arg(long = "query", value_parser = parse_pair)]
    pub query: Vec<(String, String)>,

    /// Prefill fields from the query parameters
    #[arg(long)]
    pub read_query_string: bool,
}

impl QueryArgs {
    pub fn parameters(&self) -> Parameters {
        self.query.iter().cloned().collect()
    }
}

/// Split `name=value` and percent-decode both halves
pub fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    let decode = |s: &str| {
        urlencoding::decode(s)
            .map(|d| d.into_owned())
            .map_err(|e| e.to_string())
    };
    Ok((decode(name)?, decode(value)?))
}
