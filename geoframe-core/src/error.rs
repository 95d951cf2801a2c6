//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Error types

use std::fmt;
use thiserror::Error;

/// Result type alias using `GeoError`.
pub type GeoResult<T> = Result<T, GeoError>;

/// Malformed input, out-of-range components or unresolved definitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("Invalid number of coordinate values for {kind}: expected {expected}, got {actual}")]
    InvalidArity {
        kind: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("Invalid number `{0}`")]
    InvalidNumber(String),

    #[error("Invalid {kind} text `{text}`")]
    InvalidText { kind: &'static str, text: String },

    /// Every violated constraint, not just the first one.
    #[error("Invalid {kind}: {}", .violations.join("; "))]
    Invalid {
        kind: &'static str,
        violations: Vec<String>,
    },

    #[error("Unresolved CRS `{crs}` (definition: {definition})")]
    UnresolvedCrs { crs: String, definition: String },
}

impl FormatError {
    pub(crate) fn arity(kind: &'static str, expected: &str, actual: usize) -> Self {
        FormatError::InvalidArity {
            kind,
            expected: expected.to_string(),
            actual,
        }
    }

    /// Constraint violations listed by this error (empty for other kinds).
    pub fn violations(&self) -> &[String] {
        match self {
            FormatError::Invalid { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// Collects constraint violations before building an aggregated error.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<String>);

impl Violations {
    pub fn check(&mut self, ok: bool, message: impl FnOnce() -> String) {
        if !ok {
            self.0.push(message());
        }
    }

    pub fn into_result(self, kind: &'static str) -> Result<(), FormatError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(FormatError::Invalid {
                kind,
                violations: self.0,
            })
        }
    }
}

/// Direction of a projection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Inverse => write!(f, "inverse"),
        }
    }
}

/// A forward or inverse projection could not produce a valid result.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{direction} projection from {from_crs} to {to_crs} failed for ({}): {reason}", format_values(.values))]
pub struct ProjectionError {
    pub direction: Direction,
    pub from_crs: String,
    pub to_crs: String,
    /// Source coordinate values as passed to the projection.
    pub values: Vec<f64>,
    pub reason: String,
}

fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Any error raised by the coordinate core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}
