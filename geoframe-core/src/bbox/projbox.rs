//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::{box_parts, max_opt, min_opt, PositionBox};
use crate::error::FormatError;
use crate::position::kernel;
use crate::position::{CreatePosition, Position, Projected};
use std::fmt;
use std::str::FromStr;

/// Bounding box in a projected (cartesian) coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjBox {
    min_x: f64,
    min_y: f64,
    min_z: Option<f64>,
    min_m: Option<f64>,
    max_x: f64,
    max_y: f64,
    max_z: Option<f64>,
    max_m: Option<f64>,
}

impl ProjBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> ProjBox {
        ProjBox {
            min_x,
            min_y,
            min_z: None,
            min_m: None,
            max_x,
            max_y,
            max_z: None,
            max_m: None,
        }
    }

    pub fn with_z(self, min_z: f64, max_z: f64) -> ProjBox {
        ProjBox {
            min_z: Some(min_z),
            max_z: Some(max_z),
            ..self
        }
    }

    pub fn with_m(self, min_m: f64, max_m: f64) -> ProjBox {
        ProjBox {
            min_m: Some(min_m),
            max_m: Some(max_m),
            ..self
        }
    }

    /// Build from 4 (`minx,miny,maxx,maxy`), 6 (with z) or 8 (with z and m) values.
    pub fn from_coords(values: &[f64]) -> Result<ProjBox, FormatError> {
        let (min, max) = box_parts("projected box", values)?;
        Ok(ProjBox {
            min_x: min.0,
            min_y: min.1,
            min_z: min.2,
            min_m: min.3,
            max_x: max.0,
            max_y: max.1,
            max_z: max.2,
            max_m: max.3,
        })
    }

    pub fn parse(text: &str, delimiter: &str) -> Result<ProjBox, FormatError> {
        ProjBox::from_coords(&kernel::parse_values(text, delimiter)?)
    }

    /// Smallest box containing all positions, `None` for an empty input.
    pub fn from_positions<'a, P, I>(positions: I) -> Option<ProjBox>
    where
        P: Position + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        positions.into_iter().fold(None, |bbox, p| {
            let point = ProjBox {
                min_x: p.x(),
                min_y: p.y(),
                min_z: p.opt_z(),
                min_m: p.opt_m(),
                max_x: p.x(),
                max_y: p.y(),
                max_z: p.opt_z(),
                max_m: p.opt_m(),
            };
            Some(match bbox {
                None => point,
                Some(bbox) => bbox.merge(&point),
            })
        })
    }

    /// Corners counter-clockwise starting at the minimum corner.
    pub fn corners_2d(&self) -> [Projected; 4] {
        [
            Projected::new(self.min_x, self.min_y),
            Projected::new(self.max_x, self.min_y),
            Projected::new(self.max_x, self.max_y),
            Projected::new(self.min_x, self.max_y),
        ]
    }

    pub fn center(&self) -> Projected {
        Projected::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn intersects_point_2d<P: Position>(&self, point: &P) -> bool {
        point.x() >= self.min_x
            && point.x() <= self.max_x
            && point.y() >= self.min_y
            && point.y() <= self.max_y
    }

    pub fn intersects_2d(&self, other: &ProjBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: &ProjBox) -> ProjBox {
        ProjBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            min_z: min_opt(self.min_z, other.min_z),
            min_m: min_opt(self.min_m, other.min_m),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
            max_z: max_opt(self.max_z, other.max_z),
            max_m: max_opt(self.max_m, other.max_m),
        }
    }

    pub fn to_text(&self, delimiter: &str) -> String {
        kernel::format_values(&self.values(), delimiter)
    }
}

impl PositionBox for ProjBox {
    type Pos = Projected;

    fn min_x(&self) -> f64 {
        self.min_x
    }
    fn min_y(&self) -> f64 {
        self.min_y
    }
    fn max_x(&self) -> f64 {
        self.max_x
    }
    fn max_y(&self) -> f64 {
        self.max_y
    }
    fn min_z(&self) -> Option<f64> {
        self.min_z
    }
    fn max_z(&self) -> Option<f64> {
        self.max_z
    }
    fn min_m(&self) -> Option<f64> {
        self.min_m
    }
    fn max_m(&self) -> Option<f64> {
        self.max_m
    }
    fn min(&self) -> Projected {
        Projected::create(self.min_x, self.min_y, self.min_z, self.min_m)
    }
    fn max(&self) -> Projected {
        Projected::create(self.max_x, self.max_y, self.max_z, self.max_m)
    }
    fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
}

impl FromStr for ProjBox {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjBox::parse(s, ",")
    }
}

impl fmt::Display for ProjBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text(","))
    }
}
