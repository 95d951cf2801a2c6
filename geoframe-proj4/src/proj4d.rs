//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::registry::{parse_definition, resolve_definition};
use geoframe_core::coords::Coords;
use geoframe_core::crs::CoordRefSys;
use geoframe_core::error::{FormatError, ProjectionError};
use geoframe_core::projection::{Components, Endpoints, Projection, ProjectionAdapter};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use std::fmt;
use std::sync::Arc;

/// Coordinate space of a proj-string
#[derive(Clone, Copy, Debug, PartialEq)]
enum Space {
    /// Longitude/latitude in degrees (radians inside proj4rs)
    Geographic,
    /// Earth-centered X/Y/Z
    Geocentric,
    Projected,
}

impl Space {
    fn of(definition: &str) -> Space {
        let proj = definition
            .split_whitespace()
            .find_map(|param| param.strip_prefix("+proj="))
            .unwrap_or("");
        match proj {
            "longlat" | "latlong" | "lonlat" | "latlon" => Space::Geographic,
            "geocent" => Space::Geocentric,
            _ => Space::Projected,
        }
    }
}

#[derive(Clone)]
struct Endpoint {
    proj: Arc<Proj>,
    space: Space,
}

impl Endpoint {
    fn resolve(crs: &CoordRefSys, explicit: Option<&str>) -> Result<Endpoint, FormatError> {
        let definition = resolve_definition(crs, explicit)?;
        let proj = parse_definition(crs, &definition)?;
        debug!("Resolved {} to '{}'", crs, definition);
        Ok(Endpoint {
            proj: Arc::new(proj),
            space: Space::of(&definition),
        })
    }
}

/// One direction of a proj4rs transformation.
///
/// Geographic coordinates are passed in degrees, longitude first.
#[derive(Clone)]
pub struct Proj4dProjection {
    endpoints: Endpoints,
    source: Endpoint,
    target: Endpoint,
}

impl fmt::Debug for Proj4dProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proj4dProjection")
            .field("endpoints", &self.endpoints)
            .field("source", &self.source.space)
            .field("target", &self.target.space)
            .finish()
    }
}

impl Projection for Proj4dProjection {
    fn project_xyz(
        &self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<Components, ProjectionError> {
        let mut point = match self.source.space {
            Space::Geographic => (x.to_radians(), y.to_radians(), z.unwrap_or(0.0)),
            _ => (x, y, z.unwrap_or(0.0)),
        };
        transform(&self.source.proj, &self.target.proj, &mut point)
            .map_err(|e| self.endpoints.failure(x, y, z, m, &format!("{:?}", e)))?;
        let (tx, ty, tz) = match self.target.space {
            Space::Geographic => (point.0.to_degrees(), point.1.to_degrees(), point.2),
            _ => point,
        };
        if !(tx.is_finite() && ty.is_finite() && tz.is_finite()) {
            return Err(self.endpoints.failure(x, y, z, m, "non-finite result"));
        }
        let tz = if z.is_some() || self.target.space == Space::Geocentric {
            Some(tz)
        } else {
            None
        };
        Ok((tx, ty, tz, m))
    }

    fn target_type(&self, source: Coords) -> Coords {
        if self.target.space == Space::Geocentric {
            Coords::select(true, source.is_measured())
        } else {
            source
        }
    }
}

/// Adapter between any two CRS known to proj4rs
#[derive(Clone, Debug)]
pub struct Proj4d {
    forward: Proj4dProjection,
    inverse: Proj4dProjection,
}

impl Proj4d {
    /// Adapter between two CRS resolved by registry or EPSG code.
    pub fn new(from: &CoordRefSys, to: &CoordRefSys) -> Result<Proj4d, FormatError> {
        Proj4d::resolve(from, to, None, None)
    }

    /// Adapter between two CRS.
    ///
    /// Each side is resolved from the explicit proj-string if given, then the
    /// registered definitions, then the EPSG database.
    pub fn resolve(
        from: &CoordRefSys,
        to: &CoordRefSys,
        from_def: Option<&str>,
        to_def: Option<&str>,
    ) -> Result<Proj4d, FormatError> {
        let source = Endpoint::resolve(from, from_def)?;
        let target = Endpoint::resolve(to, to_def)?;
        debug!("proj4 adapter {} -> {}", from, to);
        let endpoints = Endpoints::forward(from.clone(), to.clone());
        Ok(Proj4d {
            inverse: Proj4dProjection {
                endpoints: endpoints.reversed(),
                source: target.clone(),
                target: source.clone(),
            },
            forward: Proj4dProjection {
                endpoints,
                source,
                target,
            },
        })
    }
}

impl ProjectionAdapter for Proj4d {
    type Forward = Proj4dProjection;
    type Inverse = Proj4dProjection;

    fn from_crs(&self) -> &CoordRefSys {
        &self.forward.endpoints.source
    }
    fn to_crs(&self) -> &CoordRefSys {
        &self.forward.endpoints.target
    }
    fn forward(&self) -> &Proj4dProjection {
        &self.forward
    }
    fn inverse(&self) -> &Proj4dProjection {
        &self.inverse
    }
}
