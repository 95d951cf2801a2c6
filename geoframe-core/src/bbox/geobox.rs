//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::{box_parts, max_opt, min_opt, PositionBox};
use crate::error::FormatError;
use crate::position::kernel;
use crate::position::{CreatePosition, Geographic, Position};
use crate::units::{clip_latitude, clip_longitude};
use std::fmt;
use std::str::FromStr;

/// Geographic bounding box.
///
/// Longitudes are clamped into `[-180, 180]` and latitudes into `[-90, 90]`.
/// `west > east` marks a box spanning the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBox {
    west: f64,
    south: f64,
    min_elev: Option<f64>,
    min_m: Option<f64>,
    east: f64,
    north: f64,
    max_elev: Option<f64>,
    max_m: Option<f64>,
}

/// Eastward angular distance from `from` to `to` in `[0, 360)`.
fn eastward(from: f64, to: f64) -> f64 {
    (to - from).rem_euclid(360.0)
}

impl GeoBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> GeoBox {
        GeoBox {
            west: clip_longitude(west),
            south: clip_latitude(south),
            min_elev: None,
            min_m: None,
            east: clip_longitude(east),
            north: clip_latitude(north),
            max_elev: None,
            max_m: None,
        }
    }

    /// The whole world `[-180, -90, 180, 90]`.
    pub fn world() -> GeoBox {
        GeoBox::new(-180.0, -90.0, 180.0, 90.0)
    }

    pub fn with_elev(self, min_elev: f64, max_elev: f64) -> GeoBox {
        GeoBox {
            min_elev: Some(min_elev),
            max_elev: Some(max_elev),
            ..self
        }
    }

    pub fn with_m(self, min_m: f64, max_m: f64) -> GeoBox {
        GeoBox {
            min_m: Some(min_m),
            max_m: Some(max_m),
            ..self
        }
    }

    /// Build from 4 (`west,south,east,north`), 6 (with elevation) or 8 (with elevation and m) values.
    pub fn from_coords(values: &[f64]) -> Result<GeoBox, FormatError> {
        let (min, max) = box_parts("geographic box", values)?;
        Ok(GeoBox {
            min_elev: min.2,
            min_m: min.3,
            max_elev: max.2,
            max_m: max.3,
            ..GeoBox::new(min.0, min.1, max.0, max.1)
        })
    }

    pub fn parse(text: &str, delimiter: &str) -> Result<GeoBox, FormatError> {
        GeoBox::from_coords(&kernel::parse_values(text, delimiter)?)
    }

    pub fn west(&self) -> f64 {
        self.west
    }
    pub fn south(&self) -> f64 {
        self.south
    }
    pub fn east(&self) -> f64 {
        self.east
    }
    pub fn north(&self) -> f64 {
        self.north
    }
    pub fn min_elev(&self) -> Option<f64> {
        self.min_elev
    }
    pub fn max_elev(&self) -> Option<f64> {
        self.max_elev
    }

    pub fn spans_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// The box itself, or its parts west and east of the antimeridian.
    pub fn split_on_antimeridian(&self) -> Vec<GeoBox> {
        if !self.spans_antimeridian() {
            return vec![*self];
        }
        vec![
            GeoBox {
                east: 180.0,
                ..*self
            },
            GeoBox {
                west: -180.0,
                ..*self
            },
        ]
    }

    /// The box covering the other side of the globe within the same latitude band.
    pub fn complementary(&self) -> GeoBox {
        GeoBox {
            west: self.east,
            east: self.west,
            ..*self
        }
    }

    /// Smallest box containing both boxes, measured by antimeridian-aware width.
    ///
    /// When both ways around the globe give the same width, the result starts at
    /// this box's west edge.
    pub fn merge_geographically(&self, other: &GeoBox) -> GeoBox {
        let (wa, wb) = (self.width(), other.width());
        let from_self = wa.max(eastward(self.west, other.west) + wb);
        let from_other = wb.max(eastward(other.west, self.west) + wa);
        let (west, width) = if from_self <= from_other {
            (self.west, from_self)
        } else {
            (other.west, from_other)
        };
        let (west, east) = if width >= 360.0 {
            (-180.0, 180.0)
        } else {
            let east = west + width;
            (west, if east > 180.0 { east - 360.0 } else { east })
        };
        GeoBox {
            west,
            south: self.south.min(other.south),
            min_elev: min_opt(self.min_elev, other.min_elev),
            min_m: min_opt(self.min_m, other.min_m),
            east,
            north: self.north.max(other.north),
            max_elev: max_opt(self.max_elev, other.max_elev),
            max_m: max_opt(self.max_m, other.max_m),
        }
    }

    /// Corners counter-clockwise starting at south-west.
    pub fn corners_2d(&self) -> [Geographic; 4] {
        [
            Geographic::new(self.west, self.south),
            Geographic::new(self.east, self.south),
            Geographic::new(self.east, self.north),
            Geographic::new(self.west, self.north),
        ]
    }

    /// Center point, on the antimeridian-aware longitude midpoint.
    pub fn center(&self) -> Geographic {
        Geographic::new(
            self.west + self.width() / 2.0,
            (self.south + self.north) / 2.0,
        )
    }

    pub fn intersects_point_2d<P: Position>(&self, point: &P) -> bool {
        let (lon, lat) = (point.x(), point.y());
        let lon_inside = if self.spans_antimeridian() {
            lon >= self.west || lon <= self.east
        } else {
            lon >= self.west && lon <= self.east
        };
        lon_inside && lat >= self.south && lat <= self.north
    }

    pub fn intersects_2d(&self, other: &GeoBox) -> bool {
        self.split_on_antimeridian().iter().any(|a| {
            other.split_on_antimeridian().iter().any(|b| {
                a.west <= b.east && a.east >= b.west && a.south <= b.north && a.north >= b.south
            })
        })
    }

    pub fn to_text(&self, delimiter: &str) -> String {
        kernel::format_values(&self.values(), delimiter)
    }
}

impl PositionBox for GeoBox {
    type Pos = Geographic;

    fn min_x(&self) -> f64 {
        self.west
    }
    fn min_y(&self) -> f64 {
        self.south
    }
    fn max_x(&self) -> f64 {
        self.east
    }
    fn max_y(&self) -> f64 {
        self.north
    }
    fn min_z(&self) -> Option<f64> {
        self.min_elev
    }
    fn max_z(&self) -> Option<f64> {
        self.max_elev
    }
    fn min_m(&self) -> Option<f64> {
        self.min_m
    }
    fn max_m(&self) -> Option<f64> {
        self.max_m
    }
    fn min(&self) -> Geographic {
        Geographic::create(self.west, self.south, self.min_elev, self.min_m)
    }
    fn max(&self) -> Geographic {
        Geographic::create(self.east, self.north, self.max_elev, self.max_m)
    }
    /// Wrapped width when spanning the antimeridian.
    fn width(&self) -> f64 {
        if self.spans_antimeridian() {
            360.0 - (self.west - self.east)
        } else {
            self.east - self.west
        }
    }
}

impl FromStr for GeoBox {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeoBox::parse(s, ",")
    }
}

impl fmt::Display for GeoBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text(","))
    }
}
