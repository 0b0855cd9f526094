use std::path::PathBuf;

use sqlparser::parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("reading schema '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing sql: {0}")]
    Parse(#[from] ParserError),

    #[error("writing '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid enum rule '{0}', expected TYPE=strip-prefix:N, TYPE=suffix:N or TYPE=name:Name")]
    InvalidEnumRule(String),
}
