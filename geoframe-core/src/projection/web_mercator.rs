//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::{Components, Endpoints, Projection, ProjectionAdapter};
use crate::crs::CoordRefSys;
use crate::error::{Direction, ProjectionError};
use std::f64::consts;

/// WGS 84 equatorial radius used by the spherical Mercator projection.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude limit of the square Web Mercator world.
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.max(-MAX_LATITUDE).min(MAX_LATITUDE);
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Returns (lon, lat) in degrees of a Spherical Mercator position
pub fn merc_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}

/// One direction of the Web Mercator projection.
#[derive(Debug, Clone)]
pub struct WebMercatorProjection {
    endpoints: Endpoints,
}

impl Projection for WebMercatorProjection {
    fn project_xyz(
        &self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<Components, ProjectionError> {
        let (tx, ty) = match self.endpoints.direction {
            Direction::Forward => lonlat_to_merc(x, y),
            Direction::Inverse => merc_to_lonlat(x, y),
        };
        if tx.is_finite() && ty.is_finite() {
            Ok((tx, ty, z, m))
        } else {
            Err(self.endpoints.failure(x, y, z, m, "non-finite result"))
        }
    }
}

/// Geographic WGS 84 to EPSG:3857 adapter.
#[derive(Debug, Clone)]
pub struct WebMercator {
    forward: WebMercatorProjection,
    inverse: WebMercatorProjection,
}

impl WebMercator {
    /// Adapter from CRS84.
    pub fn new() -> WebMercator {
        WebMercator::from_geographic(CoordRefSys::crs84())
    }

    /// Adapter from another WGS 84 based geographic CRS such as EPSG:4326.
    ///
    /// Positions are always passed longitude first.
    pub fn from_geographic(crs: CoordRefSys) -> WebMercator {
        debug!("Web Mercator adapter from {}", crs);
        let endpoints = Endpoints::forward(crs, CoordRefSys::epsg_3857());
        WebMercator {
            inverse: WebMercatorProjection {
                endpoints: endpoints.reversed(),
            },
            forward: WebMercatorProjection { endpoints },
        }
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        WebMercator::new()
    }
}

impl ProjectionAdapter for WebMercator {
    type Forward = WebMercatorProjection;
    type Inverse = WebMercatorProjection;

    fn from_crs(&self) -> &CoordRefSys {
        &self.forward.endpoints.source
    }
    fn to_crs(&self) -> &CoordRefSys {
        &self.forward.endpoints.target
    }
    fn forward(&self) -> &WebMercatorProjection {
        &self.forward
    }
    fn inverse(&self) -> &WebMercatorProjection {
        &self.inverse
    }
}
