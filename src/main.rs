//! dbq - parse shell-style document database commands.

mod cli;

use cli::Cli;
use db_query::config::{Config, OutputFormat};
use db_query::error::{AppError, AppResult};
use db_query::logging;
use db_query::output;
use db_query::query::{self, registry};
use db_query::safety::classify_command;
use tracing::{debug, error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        eprintln!("{e}");
        if let AppError::Query(query_error) = &e {
            if let Some(detail) = query_error.syntax_detail() {
                eprintln!("  {detail}");
            }
        }
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let (format, pretty) = cli.resolve_output(&config)?;

    if let Some(prefix) = cli.methods.as_deref() {
        print_methods(prefix);
        return Ok(());
    }

    let raw = cli.read_query()?;
    let command = query::create_query(Some(&raw)).await?;
    let classification = classify_command(&command);
    info!(
        method = %command.method(),
        safety = %classification.level,
        "parsed command"
    );

    print!("{}", output::render(&command, &classification, format, pretty)?);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

/// Prints usage for every method whose name starts with `prefix`.
fn print_methods(prefix: &str) {
    for name in registry::complete_method(prefix) {
        if let Some(def) = registry::find_method(name) {
            println!("{:<12} {}", def.name, def.description);
            println!("{:<12} {}", "", def.usage());
        }
    }
}
