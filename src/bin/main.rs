//! dbdoc CLI - Generate schema documentation from a live database
//!
//! Usage:
//!   dbdoc --db-type <1|2|3> --db-name <name> [--db-host ..] [--db-port ..]
//!         [--db-user ..] [--db-password ..] [--doc-type <1|2>] [--out <dir>]
//!   dbdoc --connection <name>
//!
//! Examples:
//!   dbdoc --db-type 1 --db-name shop --db-password secret
//!   dbdoc --db-type postgres --db-name events --doc-type offline --out docs
//!   dbdoc --connection warehouse --json

use clap::Parser;
use dbdoc::config::{ConfigError, ConnectionConfig, Settings, SettingsError};
use dbdoc::connection::{self, ConnectionError};
use dbdoc::dialect::{Dialect, DialectError};
use dbdoc::document::{self, DocType, Document, DocumentError};
use dbdoc::metadata::{IntrospectError, SchemaIntrospector};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "dbdoc")]
#[command(about = "dbdoc - Database schema documentation for MySQL, SQL Server and PostgreSQL")]
#[command(version)]
struct Cli {
    /// Database type: 1 = MySQL/MariaDB, 2 = SQL Server, 3 = PostgreSQL (or a name)
    #[arg(long, env = "DBDOC_DB_TYPE")]
    db_type: Option<String>,

    /// Database host
    #[arg(long, env = "DBDOC_DB_HOST")]
    db_host: Option<String>,

    /// Database port (defaults per database type)
    #[arg(long, env = "DBDOC_DB_PORT")]
    db_port: Option<u16>,

    /// Database username (defaults per database type)
    #[arg(long, env = "DBDOC_DB_USER")]
    db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DBDOC_DB_PASSWORD", hide_env_values = true)]
    db_password: Option<String>,

    /// Database name
    #[arg(long, env = "DBDOC_DB_NAME")]
    db_name: Option<String>,

    /// Document type: 1 = online, 2 = offline
    #[arg(long)]
    doc_type: Option<String>,

    /// Named connection from the config file
    #[arg(short, long)]
    connection: Option<String>,

    /// Output directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Fail if any table's columns cannot be read
    #[arg(long)]
    strict: bool,

    /// Write the introspected schema as JSON instead of a document
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Introspect(#[from] IntrospectError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl From<DialectError> for AppError {
    fn from(err: DialectError) -> Self {
        AppError::Config(err.into())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let settings = Settings::load()?;
    let config = resolve_connection(&cli, &settings)?;
    config.validate()?;

    let doc_type = match &cli.doc_type {
        Some(s) => s.parse::<DocType>()?,
        None => settings.output.doc_type,
    };
    let out_dir = cli.out.clone().unwrap_or_else(|| settings.output.dir.clone());
    let strict = cli.strict || settings.output.strict;

    let conn = connection::connect(&config).await?;
    let introspector = SchemaIntrospector::new(config.dialect, &config.database).strict(strict);

    let info = match introspector.database_info(&conn).await {
        Ok(info) => Some(info),
        Err(e) => {
            warn!(error = %e, "database info unavailable");
            None
        }
    };

    let tables = introspector.introspect(&conn).await?;
    for failure in &tables.failures {
        warn!(table = %failure.table, "documented without columns: {}", failure.message);
    }

    let mut doc = Document::new(&config.database, config.dialect, tables);
    if let Some(info) = info {
        doc = doc.with_info(info);
    }

    if cli.json {
        let path = out_dir.join(format!("{}.json", config.database));
        document::write_json(&doc, &path)?;
        println!("{}", path.display());
    } else {
        for path in document::generate(doc_type, &doc, &out_dir)? {
            println!("{}", path.display());
        }
    }

    info!(
        database = %config.database,
        tables = doc.tables.len(),
        complete = doc.tables.is_complete(),
        "done"
    );
    Ok(())
}

/// Build the connection config from a named connection or from flags.
///
/// Flags given explicitly, `--db-type` included, override the values of a
/// named connection.
fn resolve_connection(cli: &Cli, settings: &Settings) -> Result<ConnectionConfig, AppError> {
    let named = match &cli.connection {
        Some(name) => Some(settings.connection_config(name)?),
        None if cli.db_type.is_none() && cli.db_name.is_none() => settings
            .default_connection()
            .map(|(name, conn)| conn.to_config(name))
            .transpose()?,
        None => None,
    };

    let mut config = match named {
        Some(config) => config,
        None => {
            let database = cli.db_name.clone().ok_or_else(|| {
                ConfigError::InvalidConfig("--db-name is required".to_string())
            })?;
            ConnectionConfig::new(Dialect::default(), database)
        }
    };

    if let Some(db_type) = &cli.db_type {
        config.dialect = db_type.parse::<Dialect>()?;
    }
    if let Some(host) = &cli.db_host {
        config.host = host.clone();
    }
    if let Some(port) = cli.db_port {
        config.port = Some(port);
    }
    if let Some(user) = &cli.db_user {
        config.user = Some(user.clone());
    }
    if let Some(password) = &cli.db_password {
        config.password = Some(password.clone());
    }
    if let Some(db_name) = &cli.db_name {
        config.database = db_name.clone();
    }

    Ok(config)
}
