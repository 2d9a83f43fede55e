//! BookScape Explorer - browse and analyze a catalog of history books.

use bookscape::app::Dashboard;
use bookscape::catalog::QueryCatalog;
use bookscape::cli::{Cli, RunMode};
use bookscape::config::{Config, ConnectionConfig};
use bookscape::connection::ConnectionProvider;
use bookscape::error::{BookscapeError, Result};
use bookscape::{logging, output, tui};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    if cli.is_interactive() {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e.message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(cli, &config)?;
    info!("Connection: {}", connection.display_string());

    let catalog = QueryCatalog::load()?;
    let dashboard = Dashboard::new(catalog, Box::new(ConnectionProvider::new(connection)));

    let (label, result) = match cli.run_mode() {
        RunMode::Interactive => {
            tui::run(&dashboard).await?;
            return Ok(ExitCode::SUCCESS);
        }
        RunMode::List => {
            println!("{}", output::format_catalog(dashboard.catalog(), cli.output)?);
            return Ok(ExitCode::SUCCESS);
        }
        RunMode::Explore(keyword) => {
            let label = dashboard.catalog().explore_search().label.to_string();
            (label, dashboard.explore(&keyword).await)
        }
        RunMode::Analytic { number, keyword } => {
            let label = dashboard
                .catalog()
                .lookup_number(number)
                .map(|def| def.label.to_string())
                .unwrap_or_else(|_| format!("Analytic {number}"));
            (label, dashboard.run_analytic(number, keyword.as_deref()).await)
        }
    };

    println!("{}", output::format_outcome(&label, &result, cli.output)?);

    Ok(if result.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Resolves the final connection configuration.
///
/// Precedence: CLI arguments, the named connection, the `default` connection,
/// environment variables, then built-in defaults.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    let mut connection = cli.to_connection_config()?;

    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(BookscapeError::config(format!(
                    "Connection '{}' not found in config file",
                    name
                )));
            }
        }
    }

    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    let mut connection = connection.unwrap_or_default();
    if cli.no_autocommit {
        connection.autocommit = false;
    }
    connection.apply_env_defaults();
    connection.apply_builtin_defaults();

    Ok(connection)
}
