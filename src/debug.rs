//! Error type and debug facilities.
use nom::error::VerboseErrorKind;
use std::{fmt, io};

use crate::{graph::GraphError, parser::ParseError};

// Error type and From<...> implementations

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Graph construction error")]
    GraphError(GraphError),
    #[error("Error while parsing graph file")]
    ParseError(Vec<VerboseErrorKind>),
    #[error("Malformed graph file: {0}")]
    FormatError(String),
    #[error("I/O error")]
    IoError(io::Error),
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<GraphError> for Error {
    fn from(ge: GraphError) -> Self {
        Self::GraphError(ge)
    }
}

impl<'a> From<nom::Err<ParseError<'a>>> for Error {
    fn from(pe: nom::Err<ParseError<'a>>) -> Self {
        match pe {
            nom::Err::Error(verbose) | nom::Err::Failure(verbose) => Self::ParseError(
                verbose
                    .errors
                    .into_iter()
                    .map(|(msg, kind)| {
                        eprintln!("{}", msg);
                        kind
                    })
                    .collect(),
            ),
            nom::Err::Incomplete(_) => unreachable!(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(ie: io::Error) -> Self {
        Self::IoError(ie)
    }
}

/// Error for unknown CLI enum values (mode, solver, generator type).
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown value: {0}")]
pub struct ModeError(pub String);

// Custom formatter for debug printing

pub fn opt_fmt<T: fmt::Debug>(option: &Option<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match option {
        Some(val) => val.fmt(f),
        None => write!(f, "None"),
    }
}
