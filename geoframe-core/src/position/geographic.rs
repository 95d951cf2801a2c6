//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::coords::Coords;
use crate::error::FormatError;
use crate::position::kernel;
use crate::position::{CreatePosition, Position};
use crate::units::{clip_latitude, format_lat_dms, format_lon_dms, wrap_longitude};
use std::fmt;
use std::str::FromStr;

/// Geographic position: longitude, latitude, optional elevation and measure.
///
/// Longitude is normalized to `[-180, 180)` and latitude clamped to `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geographic {
    lon: f64,
    lat: f64,
    elev: Option<f64>,
    m: Option<f64>,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Geographic {
        Geographic {
            lon: wrap_longitude(lon),
            lat: clip_latitude(lat),
            elev: None,
            m: None,
        }
    }

    pub fn with_elev(self, elev: f64) -> Geographic {
        Geographic {
            elev: Some(elev),
            ..self
        }
    }

    pub fn with_m(self, m: f64) -> Geographic {
        Geographic { m: Some(m), ..self }
    }

    /// Build from `[lon, lat]`, `[lon, lat, elev]`, `[lon, lat, m]` (with type) or `[lon, lat, elev, m]`.
    pub fn from_coords(
        values: &[f64],
        coord_type: Option<Coords>,
    ) -> Result<Geographic, FormatError> {
        let (x, y, z, m) = kernel::parts_from_values("geographic position", values, coord_type)?;
        Ok(Geographic::create(x, y, z, m))
    }

    /// Parse delimited text, values ordered lon, lat[, elev][, m].
    pub fn parse(
        text: &str,
        delimiter: &str,
        coord_type: Option<Coords>,
    ) -> Result<Geographic, FormatError> {
        let values = kernel::parse_values(text, delimiter)?;
        Geographic::from_coords(&values, coord_type)
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn opt_elev(&self) -> Option<f64> {
        self.elev
    }

    /// Elevation or `0.0`.
    pub fn elev(&self) -> f64 {
        self.elev.unwrap_or(0.0)
    }

    /// Text with values separated by `delimiter`.
    pub fn to_text(&self, delimiter: &str) -> String {
        kernel::format_values(&self.values(), delimiter)
    }

    /// Latitude and longitude in degrees/minutes/seconds, e.g. `48°51′29.52″ N, 2°17′40.20″ E`.
    pub fn to_dms(&self, decimals: usize) -> String {
        format!(
            "{}, {}",
            format_lat_dms(self.lat, decimals),
            format_lon_dms(self.lon, decimals)
        )
    }
}

impl Position for Geographic {
    fn x(&self) -> f64 {
        self.lon
    }
    fn y(&self) -> f64 {
        self.lat
    }
    fn opt_z(&self) -> Option<f64> {
        self.elev
    }
    fn opt_m(&self) -> Option<f64> {
        self.m
    }
}

impl CreatePosition for Geographic {
    fn create(x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Self {
        Geographic {
            lon: wrap_longitude(x),
            lat: clip_latitude(y),
            elev: z,
            m,
        }
    }
}

impl FromStr for Geographic {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Geographic::parse(s, ",", None)
    }
}

impl fmt::Display for Geographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text(","))
    }
}
