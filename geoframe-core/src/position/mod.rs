//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geographic, projected and scalable positions

mod geographic;
pub mod kernel;
mod projected;
mod scalable;
pub mod transforms;


pub use self::geographic::Geographic;
pub use self::projected::Projected;
pub use self::scalable::Scalable;

use crate::coords::Coords;

/// Read access to position coordinates.
///
/// Geographic positions map lon to `x`, lat to `y` and elevation to `z`.
pub trait Position {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    /// z (or elevation), `None` for 2D positions
    fn opt_z(&self) -> Option<f64>;
    /// Measure, `None` for unmeasured positions
    fn opt_m(&self) -> Option<f64>;

    /// z or `0.0` if not 3D
    fn z(&self) -> f64 {
        self.opt_z().unwrap_or(0.0)
    }
    /// m or `0.0` if not measured
    fn m(&self) -> f64 {
        self.opt_m().unwrap_or(0.0)
    }
    fn is_3d(&self) -> bool {
        self.opt_z().is_some()
    }
    fn is_measured(&self) -> bool {
        self.opt_m().is_some()
    }
    fn coord_type(&self) -> Coords {
        Coords::select(self.is_3d(), self.is_measured())
    }
    fn spatial_dimension(&self) -> usize {
        self.coord_type().spatial_dimension()
    }
    fn coordinate_dimension(&self) -> usize {
        self.coord_type().coordinate_dimension()
    }
    /// Coordinate values ordered per coordinate type.
    fn values(&self) -> Vec<f64>
    where
        Self: Sized,
    {
        kernel::values(self)
    }
    fn equals_2d<P: Position>(&self, other: &P, tolerance: Option<f64>) -> bool
    where
        Self: Sized,
    {
        kernel::equals_2d(self, other, tolerance)
    }
    fn equals_3d<P: Position>(
        &self,
        other: &P,
        tolerance_horiz: Option<f64>,
        tolerance_vert: Option<f64>,
    ) -> bool
    where
        Self: Sized,
    {
        kernel::equals_3d(self, other, tolerance_horiz, tolerance_vert)
    }
    fn equals_coords<P: Position>(&self, other: &P) -> bool
    where
        Self: Sized,
    {
        kernel::equals_coords(self, other)
    }
}

/// Positions that can be built from raw coordinate values.
pub trait CreatePosition: Position + Sized {
    /// Builds a position, applying the invariants of the implementing type.
    fn create(x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Self;

    /// Copy with overridden components (`None` keeps the current value).
    fn copy_with(&self, x: Option<f64>, y: Option<f64>, z: Option<f64>, m: Option<f64>) -> Self {
        Self::create(
            x.unwrap_or_else(|| self.x()),
            y.unwrap_or_else(|| self.y()),
            z.or_else(|| self.opt_z()),
            m.or_else(|| self.opt_m()),
        )
    }

    /// Copy as another coordinate type, missing components become `0.0`.
    fn copy_by_type(&self, coord_type: Coords) -> Self {
        Self::create(
            self.x(),
            self.y(),
            if coord_type.is_3d() {
                Some(self.z())
            } else {
                None
            },
            if coord_type.is_measured() {
                Some(self.m())
            } else {
                None
            },
        )
    }

    /// Applies a position-to-position function.
    fn transform<F>(&self, transform: F) -> Self
    where
        F: Fn(&Self) -> Self,
    {
        transform(self)
    }

    /// Converts between position types keeping the raw components.
    fn convert_from<P: Position>(source: &P) -> Self {
        Self::create(source.x(), source.y(), source.opt_z(), source.opt_m())
    }
}
