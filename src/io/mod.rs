//! Reading and writing CVRPLIB instance (`.vrp`) and solution (`.sol`) files.
//!
//! - [`cvrplib`]: `NODE_COORD_SECTION` / `DEMAND_SECTION` / `DEPOT_SECTION`
//!   instances with `EUC_2D` edge weights
//! - [`solution_file`]: `Route #k: …` solution listings with an optional
//!   `Cost` line

pub mod cvrplib;
pub mod solution_file;

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::{Instance, InstanceError};

pub use cvrplib::{format_instance, parse_instance};
pub use solution_file::{format_solution, parse_solution, SolutionFile};

/// Reasons an instance or solution file cannot be read.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing {0}")]
    MissingKey(&'static str),

    #[error("unsupported {key}: '{value}'")]
    UnsupportedValue { key: &'static str, value: String },

    /// A line that cannot be parsed, with its 1-based number.
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// Section data disagrees with `DIMENSION`: missing coordinates or
    /// demands, or ids beyond it.
    #[error("incomplete data: {0}")]
    Incomplete(String),

    #[error("invalid instance: {0}")]
    Instance(#[from] InstanceError),
}

impl ReadError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}

/// Reads a CVRPLIB instance from `path`.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance, ReadError> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Reads a CVRPLIB solution listing from `path`.
pub fn read_solution(path: impl AsRef<Path>) -> Result<SolutionFile, ReadError> {
    let text = fs::read_to_string(path)?;
    parse_solution(&text)
}
