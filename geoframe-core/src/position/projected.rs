//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::coords::Coords;
use crate::error::FormatError;
use crate::position::kernel;
use crate::position::{CreatePosition, Position};
use std::fmt;
use std::str::FromStr;

/// Projected (cartesian) position: x, y, optional z and m.
///
/// No clamping or wrapping is applied to projected values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projected {
    x: f64,
    y: f64,
    z: Option<f64>,
    m: Option<f64>,
}

impl Projected {
    pub fn new(x: f64, y: f64) -> Projected {
        Projected {
            x,
            y,
            z: None,
            m: None,
        }
    }

    pub fn with_z(self, z: f64) -> Projected {
        Projected { z: Some(z), ..self }
    }

    pub fn with_m(self, m: f64) -> Projected {
        Projected { m: Some(m), ..self }
    }

    /// Build from `[x, y]`, `[x, y, z]`, `[x, y, m]` (with type) or `[x, y, z, m]`.
    pub fn from_coords(values: &[f64], coord_type: Option<Coords>) -> Result<Projected, FormatError> {
        let (x, y, z, m) = kernel::parts_from_values("projected position", values, coord_type)?;
        Ok(Projected::create(x, y, z, m))
    }

    /// Parse delimited text, e.g. `"10.0,20.0,5.0"`.
    pub fn parse(
        text: &str,
        delimiter: &str,
        coord_type: Option<Coords>,
    ) -> Result<Projected, FormatError> {
        let values = kernel::parse_values(text, delimiter)?;
        Projected::from_coords(&values, coord_type)
    }

    /// Text with values separated by `delimiter`.
    pub fn to_text(&self, delimiter: &str) -> String {
        kernel::format_values(&self.values(), delimiter)
    }
}

impl Position for Projected {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
    fn opt_z(&self) -> Option<f64> {
        self.z
    }
    fn opt_m(&self) -> Option<f64> {
        self.m
    }
}

impl CreatePosition for Projected {
    fn create(x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Self {
        Projected { x, y, z, m }
    }
}

impl FromStr for Projected {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Projected::parse(s, ",", None)
    }
}

impl fmt::Display for Projected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text(","))
    }
}
