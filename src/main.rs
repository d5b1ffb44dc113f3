use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use cross_join_rewrite::{
    config::{CliConfig, RewriteConfig},
    input::RewriteInput,
    rewrite,
    sql_ast::to_sql::ToSql,
    RewriteContext,
};
use validator::Validate;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

/// Rewrite CROSS and comma joins into INNER JOIN ... ON
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Statement with resolved tables (.yaml, .yml or .json)
    #[arg(long)]
    input: PathBuf,

    /// 0 = disabled, 1 = best effort, 2 = reject unrewritable comma joins
    #[arg(long)]
    rewrite_level: Option<u8>,

    /// Database for unqualified table names
    #[arg(long)]
    current_database: Option<String>,

    /// YAML settings file (environment variables are used otherwise)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Sql)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RewriteConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RewriteConfig::from_env()?,
    };

    let input = RewriteInput::from_path(&cli.input)?;

    // Precedence: settings < input file < command line
    config.merge(CliConfig {
        cross_to_inner_join_rewrite: cli.rewrite_level,
        current_database: cli.current_database.or(input.current_database),
    });
    config.validate()?;

    let context = RewriteContext::from_config(&config, input.tables, input.aliases)?;
    let mut statement = input.statement;
    rewrite(&mut statement, &context)?;

    match cli.format {
        OutputFormat::Sql => println!("{}", statement.to_sql()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&statement)?),
    }
    Ok(())
}
