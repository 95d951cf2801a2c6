//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Forward and inverse projections between coordinate reference systems

mod ellipsoid;
mod geocentric;
mod transverse_mercator;
mod web_mercator;

#[cfg(test)]
mod projection_test;

pub use self::ellipsoid::{Datum, Ellipsoid, Helmert};
pub use self::geocentric::{Geocentric, GeocentricProjection};
pub use self::transverse_mercator::{
    TmPoint, TransverseMercator, UtmAdapter, UtmProjection, UTM_MAX_LATITUDE, UTM_MIN_LATITUDE,
};
pub use self::web_mercator::{
    lonlat_to_merc, merc_to_lonlat, WebMercator, WebMercatorProjection, EARTH_RADIUS,
    MAX_LATITUDE,
};

use crate::coords::Coords;
use crate::crs::CoordRefSys;
use crate::error::{Direction, FormatError, GeoResult, ProjectionError};
use crate::position::{CreatePosition, Position};

/// Raw position components `(x, y, z, m)`.
pub type Components = (f64, f64, Option<f64>, Option<f64>);

/// A projection in one direction between two coordinate reference systems.
pub trait Projection: Send + Sync {
    /// Projects raw components. Absent z or m stay absent unless the
    /// projection always produces them (see `target_type`).
    fn project_xyz(
        &self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<Components, ProjectionError>;

    /// Coordinate type of projected values for a given source type.
    fn target_type(&self, source: Coords) -> Coords {
        source
    }

    /// Projects a position into any position type.
    fn project<T, P>(&self, source: &P) -> Result<T, ProjectionError>
    where
        Self: Sized,
        T: CreatePosition,
        P: Position,
    {
        let (x, y, z, m) = self.project_xyz(source.x(), source.y(), source.opt_z(), source.opt_m())?;
        Ok(T::create(x, y, z, m))
    }

    /// Projects a flat coordinate array laid out per `coord_type`.
    ///
    /// The result is laid out per `target_type(coord_type)`.
    fn project_coords(&self, source: &[f64], coord_type: Coords) -> GeoResult<Vec<f64>> {
        let dim = coord_type.coordinate_dimension();
        if source.len() % dim != 0 {
            return Err(FormatError::InvalidArity {
                kind: "coordinate array",
                expected: format!("multiple of {}", dim),
                actual: source.len(),
            }
            .into());
        }
        let target = self.target_type(coord_type);
        let mut target_values = Vec::with_capacity(source.len() / dim * target.coordinate_dimension());
        for chunk in source.chunks(dim) {
            let z = if coord_type.is_3d() { Some(chunk[2]) } else { None };
            let m = coord_type.index_of_m().map(|i| chunk[i]);
            let (x, y, z, m) = self.project_xyz(chunk[0], chunk[1], z, m)?;
            target_values.push(x);
            target_values.push(y);
            if target.is_3d() {
                target_values.push(z.unwrap_or(0.0));
            }
            if target.is_measured() {
                target_values.push(m.unwrap_or(0.0));
            }
        }
        Ok(target_values)
    }
}

/// A pair of projections between a source and a target CRS.
///
/// Adapters are built once and shared; both directions are stateless.
pub trait ProjectionAdapter: Send + Sync {
    type Forward: Projection;
    type Inverse: Projection;

    fn from_crs(&self) -> &CoordRefSys;
    fn to_crs(&self) -> &CoordRefSys;
    /// Projection from `from_crs` to `to_crs`.
    fn forward(&self) -> &Self::Forward;
    /// Projection from `to_crs` to `from_crs`.
    fn inverse(&self) -> &Self::Inverse;
}

/// Source and target of a projection, used for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub direction: Direction,
    pub source: CoordRefSys,
    pub target: CoordRefSys,
}

impl Endpoints {
    pub fn forward(source: CoordRefSys, target: CoordRefSys) -> Endpoints {
        Endpoints {
            direction: Direction::Forward,
            source,
            target,
        }
    }

    /// The inverse direction with swapped source and target.
    pub fn reversed(&self) -> Endpoints {
        Endpoints {
            direction: match self.direction {
                Direction::Forward => Direction::Inverse,
                Direction::Inverse => Direction::Forward,
            },
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }

    pub fn failure(
        &self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
        reason: &str,
    ) -> ProjectionError {
        let mut values = vec![x, y];
        values.extend(z);
        values.extend(m);
        ProjectionError {
            direction: self.direction,
            from_crs: self.source.to_string(),
            to_crs: self.target.to_string(),
            values,
            reason: reason.to_string(),
        }
    }
}
