//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::{Components, Ellipsoid, Endpoints, Projection, ProjectionAdapter};
use crate::coords::Coords;
use crate::crs::CoordRefSys;
use crate::error::{Direction, ProjectionError};

/// One direction between geographic and earth-centered coordinates.
#[derive(Debug, Clone)]
pub struct GeocentricProjection {
    endpoints: Endpoints,
    ellipsoid: Ellipsoid,
}

impl Projection for GeocentricProjection {
    fn project_xyz(
        &self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<Components, ProjectionError> {
        let (tx, ty, tz) = match self.endpoints.direction {
            Direction::Forward => {
                if !(-90.0..=90.0).contains(&y) {
                    return Err(self.endpoints.failure(x, y, z, m, "latitude outside [-90, 90]"));
                }
                self.ellipsoid.to_geocentric(x, y, z.unwrap_or(0.0))
            }
            Direction::Inverse => self.ellipsoid.from_geocentric(x, y, z.unwrap_or(0.0)),
        };
        if tx.is_finite() && ty.is_finite() && tz.is_finite() {
            Ok((tx, ty, Some(tz), m))
        } else {
            Err(self.endpoints.failure(x, y, z, m, "non-finite result"))
        }
    }

    /// Always 3D, both geocentric X/Y/Z and ellipsoidal height.
    fn target_type(&self, source: Coords) -> Coords {
        Coords::select(true, source.is_measured())
    }
}

/// Geographic (lon, lat, ellipsoidal height) to geocentric EPSG:4978 adapter.
#[derive(Debug, Clone)]
pub struct Geocentric {
    forward: GeocentricProjection,
    inverse: GeocentricProjection,
}

impl Geocentric {
    /// WGS 84 adapter from CRS84h.
    pub fn new() -> Geocentric {
        Geocentric::with_ellipsoid(CoordRefSys::crs84h(), CoordRefSys::epsg_4978(), Ellipsoid::WGS84)
    }

    pub fn with_ellipsoid(
        geographic: CoordRefSys,
        geocentric: CoordRefSys,
        ellipsoid: Ellipsoid,
    ) -> Geocentric {
        debug!(
            "Geocentric adapter {} -> {} on {}",
            geographic, geocentric, ellipsoid.name
        );
        let endpoints = Endpoints::forward(geographic, geocentric);
        Geocentric {
            inverse: GeocentricProjection {
                endpoints: endpoints.reversed(),
                ellipsoid,
            },
            forward: GeocentricProjection {
                endpoints,
                ellipsoid,
            },
        }
    }
}

impl Default for Geocentric {
    fn default() -> Self {
        Geocentric::new()
    }
}

impl ProjectionAdapter for Geocentric {
    type Forward = GeocentricProjection;
    type Inverse = GeocentricProjection;

    fn from_crs(&self) -> &CoordRefSys {
        &self.forward.endpoints.source
    }
    fn to_crs(&self) -> &CoordRefSys {
        &self.forward.endpoints.target
    }
    fn forward(&self) -> &GeocentricProjection {
        &self.forward
    }
    fn inverse(&self) -> &GeocentricProjection {
        &self.inverse
    }
}
