//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Axis-aligned bounding boxes

mod geobox;
mod projbox;

#[cfg(test)]
mod bbox_test;

pub use self::geobox::GeoBox;
pub use self::projbox::ProjBox;

use crate::coords::Coords;
use crate::error::FormatError;
use crate::position::kernel::equals_with_tolerance;
use crate::position::Position;

/// Raw corner tuple `(x, y, z, m)`.
pub(crate) type Corner = (f64, f64, Option<f64>, Option<f64>);

/// Common bounding box operations.
///
/// Raw accessors return stored values; for geographic boxes spanning the
/// antimeridian `min_x` (west) is greater than `max_x` (east).
pub trait PositionBox {
    type Pos: Position;

    fn min_x(&self) -> f64;
    fn min_y(&self) -> f64;
    fn max_x(&self) -> f64;
    fn max_y(&self) -> f64;
    fn min_z(&self) -> Option<f64>;
    fn max_z(&self) -> Option<f64>;
    fn min_m(&self) -> Option<f64>;
    fn max_m(&self) -> Option<f64>;

    /// Minimum corner (west/south for geographic boxes).
    fn min(&self) -> Self::Pos;
    /// Maximum corner (east/north for geographic boxes).
    fn max(&self) -> Self::Pos;
    fn width(&self) -> f64;
    fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    fn is_3d(&self) -> bool {
        self.min_z().is_some()
    }
    fn is_measured(&self) -> bool {
        self.min_m().is_some()
    }
    fn coord_type(&self) -> Coords {
        Coords::select(self.is_3d(), self.is_measured())
    }
    /// Box values ordered min corner then max corner.
    fn values(&self) -> Vec<f64> {
        let mut values = vec![self.min_x(), self.min_y()];
        values.extend(self.min_z());
        values.extend(self.min_m());
        values.extend(&[self.max_x(), self.max_y()]);
        values.extend(self.max_z());
        values.extend(self.max_m());
        values
    }
    fn equals_2d(&self, other: &Self, tolerance: Option<f64>) -> bool
    where
        Self: Sized,
    {
        equals_with_tolerance(self.min_x(), other.min_x(), tolerance)
            && equals_with_tolerance(self.min_y(), other.min_y(), tolerance)
            && equals_with_tolerance(self.max_x(), other.max_x(), tolerance)
            && equals_with_tolerance(self.max_y(), other.max_y(), tolerance)
    }
    fn equals_3d(
        &self,
        other: &Self,
        tolerance_horiz: Option<f64>,
        tolerance_vert: Option<f64>,
    ) -> bool
    where
        Self: Sized,
    {
        match (self.min_z(), self.max_z(), other.min_z(), other.max_z()) {
            (Some(a), Some(b), Some(c), Some(d)) => {
                self.equals_2d(other, tolerance_horiz)
                    && equals_with_tolerance(a, c, tolerance_vert)
                    && equals_with_tolerance(b, d, tolerance_vert)
            }
            _ => false,
        }
    }
}

/// Splits 4, 6 or 8 box values into min and max corners.
///
/// 6 values are read as `minx, miny, minz, maxx, maxy, maxz`.
pub(crate) fn box_parts(kind: &'static str, values: &[f64]) -> Result<(Corner, Corner), FormatError> {
    match values.len() {
        4 => Ok((
            (values[0], values[1], None, None),
            (values[2], values[3], None, None),
        )),
        6 => Ok((
            (values[0], values[1], Some(values[2]), None),
            (values[3], values[4], Some(values[5]), None),
        )),
        8 => Ok((
            (values[0], values[1], Some(values[2]), Some(values[3])),
            (values[4], values[5], Some(values[6]), Some(values[7])),
        )),
        n => Err(FormatError::arity(kind, "4, 6 or 8", n)),
    }
}

fn min_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        _ => None,
    }
}

fn max_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        _ => None,
    }
}
