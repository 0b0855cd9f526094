mod emit;
mod error;
mod files;
mod logging;
mod parser;
mod rules;
mod schema;
mod types;
mod walker;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use crate::emit::{Emitter, RustEmitter, TypeScriptEmitter};
use crate::error::GeneratorError;
use crate::rules::{EnumRule, EnumRules};
use crate::types::TypeMapper;

/// PostgreSQL schema to Rust structs and TypeScript interfaces.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQL schema to read from
    #[arg(short, long, default_value = "../backend/database.sql")]
    schema: PathBuf,

    /// Where to write the Rust module
    #[arg(short, long, default_value = "../backend/src/database.rs")]
    rust_out: PathBuf,

    /// Where to write the TypeScript module
    #[arg(short, long, default_value = "../frontend/src/types/database.ts")]
    ts_out: PathBuf,

    /// Extra enum naming rule: TYPE=strip-prefix:N, TYPE=suffix:N or TYPE=name:Name
    #[arg(short, long = "enum-rule")]
    enum_rules: Vec<EnumRule>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(&args.log_level);

    let sql = files::load_schema(&args.schema)?;
    let statements = parser::parse_schema(&sql).map_err(GeneratorError::Parse)?;
    info!(statements = statements.len(), "sql to ast parsed successfully");

    let rules = EnumRules::default().with(args.enum_rules);
    let schema = walker::walk(&statements, &rules);
    info!(
        tables = schema.tables.len(),
        enums = schema.enums.len(),
        "schema extracted"
    );

    let mapper = TypeMapper::new(&rules);
    for (table, column, sql_type) in mapper.unmapped(&schema) {
        warn!(%table, %column, %sql_type, "no mapping for column type, emitting placeholder");
    }

    files::write_output(&args.rust_out, &RustEmitter::new(mapper).emit(&schema))?;
    files::write_output(&args.ts_out, &TypeScriptEmitter::new(mapper).emit(&schema))?;
    Ok(())
}
