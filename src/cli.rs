//! Command-line argument parsing for dbq.
//!
//! Uses clap to parse CLI arguments.

use clap::Parser;
use db_query::config::{Config, OutputFormat};
use db_query::error::{AppError, AppResult};
use std::io::Read;
use std::path::PathBuf;

/// Parse and validate shell-style document database commands.
#[derive(Parser, Debug)]
#[command(name = "dbq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Command to parse, e.g. 'db.users.find({ active: true })'. Reads stdin when omitted or "-".
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Output format: text or json (overrides config)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List supported methods, optionally only those starting with PREFIX
    #[arg(long, value_name = "PREFIX", num_args = 0..=1, default_missing_value = "")]
    pub methods: Option<String>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Parses the --format argument, if given.
    pub fn output_format(&self) -> AppResult<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(|s| s.parse().map_err(AppError::config))
            .transpose()
    }

    /// Resolves the effective output format and pretty flag.
    ///
    /// Flags take precedence over the config file.
    pub fn resolve_output(&self, config: &Config) -> AppResult<(OutputFormat, bool)> {
        let format = self.output_format()?.unwrap_or(config.output.format);
        Ok((format, self.pretty || config.output.pretty))
    }

    /// Returns true if the query should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        matches!(self.query.as_deref(), None | Some("-"))
    }

    /// Returns the query text from the argument or stdin.
    ///
    /// A single trailing newline from stdin is dropped.
    pub fn read_query(&self) -> AppResult<String> {
        if !self.reads_stdin() {
            return Ok(self.query.clone().unwrap_or_default());
        }

        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(strip_trailing_newline(input))
    }
}

fn strip_trailing_newline(mut input: String) -> String {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    input
}
