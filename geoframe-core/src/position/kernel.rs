//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Free functions shared by all position types

use crate::coords::Coords;
use crate::error::FormatError;
use crate::position::Position;

/// Compares two values with an optional absolute tolerance.
pub fn equals_with_tolerance(a: f64, b: f64, tolerance: Option<f64>) -> bool {
    match tolerance {
        Some(tol) => {
            debug_assert!(tol >= 0.0, "tolerance must not be negative");
            (a - b).abs() <= tol
        }
        None => a == b,
    }
}

/// True when x and y of both positions are equal within `tolerance`.
pub fn equals_2d<A: Position, B: Position>(a: &A, b: &B, tolerance: Option<f64>) -> bool {
    equals_with_tolerance(a.x(), b.x(), tolerance) && equals_with_tolerance(a.y(), b.y(), tolerance)
}

/// True when both positions are 3D and x, y and z are equal within the tolerances.
pub fn equals_3d<A: Position, B: Position>(
    a: &A,
    b: &B,
    tolerance_horiz: Option<f64>,
    tolerance_vert: Option<f64>,
) -> bool {
    if !a.is_3d() || !b.is_3d() {
        return false;
    }
    equals_2d(a, b, tolerance_horiz) && equals_with_tolerance(a.z(), b.z(), tolerance_vert)
}

/// True when coordinate type and all values are exactly equal.
pub fn equals_coords<A: Position, B: Position>(a: &A, b: &B) -> bool {
    a.coord_type() == b.coord_type() && a.values() == b.values()
}

/// Position values ordered per coordinate type.
pub fn values<P: Position>(pos: &P) -> Vec<f64> {
    let mut values = Vec::with_capacity(4);
    values.push(pos.x());
    values.push(pos.y());
    if let Some(z) = pos.opt_z() {
        values.push(z);
    }
    if let Some(m) = pos.opt_m() {
        values.push(m);
    }
    values
}

/// Splits a coordinate slice into `(x, y, z, m)` according to an optional type.
///
/// Without a type, 3 values are read as x, y, z.
pub fn parts_from_values(
    kind: &'static str,
    values: &[f64],
    coord_type: Option<Coords>,
) -> Result<(f64, f64, Option<f64>, Option<f64>), FormatError> {
    let coord_type = match coord_type {
        Some(t) => {
            if values.len() != t.coordinate_dimension() {
                return Err(FormatError::arity(
                    kind,
                    &t.coordinate_dimension().to_string(),
                    values.len(),
                ));
            }
            t
        }
        None => Coords::from_dimension(values.len())
            .map_err(|_| FormatError::arity(kind, "2, 3 or 4", values.len()))?,
    };
    let z = if coord_type.is_3d() {
        Some(values[2])
    } else {
        None
    };
    let m = coord_type.index_of_m().map(|i| values[i]);
    Ok((values[0], values[1], z, m))
}

/// Parses delimited numbers, e.g. `"10.0,20.5"`.
pub fn parse_values(text: &str, delimiter: &str) -> Result<Vec<f64>, FormatError> {
    let parts: Vec<&str> = if delimiter.trim().is_empty() {
        text.split_whitespace().collect()
    } else {
        text.split(delimiter).map(str::trim).collect()
    };
    parts
        .into_iter()
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| FormatError::InvalidNumber(v.to_string()))
        })
        .collect()
}

/// Formats values with a delimiter, omitting trailing `.0` of integral values.
pub fn format_values(values: &[f64], delimiter: &str) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(delimiter)
}
