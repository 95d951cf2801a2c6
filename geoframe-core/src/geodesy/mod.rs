//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Spherical geodesy
//!
//! Great circle calculations on a sphere with a mean earth radius. Results are
//! accurate to about 0.3% compared to ellipsoidal calculations.

use crate::position::{CreatePosition, Geographic, Position};
use crate::units::wrap_360;


/// Mean earth radius in meters.
pub const MEAN_EARTH_RADIUS: f64 = 6371000.0;

/// Great circle calculations on a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    radius: f64,
}

impl Default for Spherical {
    fn default() -> Self {
        Spherical {
            radius: MEAN_EARTH_RADIUS,
        }
    }
}

impl Spherical {
    pub fn new(radius: f64) -> Spherical {
        debug_assert!(radius > 0.0);
        Spherical { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance in meters using the haversine formula.
    pub fn distance_haversine(&self, from: &Geographic, to: &Geographic) -> f64 {
        self.radius * angular_distance(from, to)
    }

    /// Initial bearing in degrees `[0, 360)` on the great circle from `from` to `to`.
    pub fn initial_bearing(&self, from: &Geographic, to: &Geographic) -> f64 {
        let (lat1, lat2) = (from.lat().to_radians(), to.lat().to_radians());
        let dlon = (to.lon() - from.lon()).to_radians();
        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        wrap_360(y.atan2(x).to_degrees())
    }

    /// Bearing in degrees `[0, 360)` when arriving at `to`.
    pub fn final_bearing(&self, from: &Geographic, to: &Geographic) -> f64 {
        wrap_360(self.initial_bearing(to, from) + 180.0)
    }

    /// Half-way point on the great circle.
    pub fn midpoint(&self, from: &Geographic, to: &Geographic) -> Geographic {
        let (lat1, lat2) = (from.lat().to_radians(), to.lat().to_radians());
        let lon1 = from.lon().to_radians();
        let dlon = (to.lon() - from.lon()).to_radians();
        let bx = lat2.cos() * dlon.cos();
        let by = lat2.cos() * dlon.sin();
        let lat = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
        let lon = lon1 + by.atan2(lat1.cos() + bx);
        Geographic::new(lon.to_degrees(), lat.to_degrees())
    }

    /// Point at `fraction` (0 = `from`, 1 = `to`) along the great circle.
    pub fn intermediate_point(&self, from: &Geographic, to: &Geographic, fraction: f64) -> Geographic {
        let delta = angular_distance(from, to);
        if delta == 0.0 {
            return Geographic::new(from.lon(), from.lat());
        }
        let (lat1, lon1) = (from.lat().to_radians(), from.lon().to_radians());
        let (lat2, lon2) = (to.lat().to_radians(), to.lon().to_radians());
        let a = ((1.0 - fraction) * delta).sin() / delta.sin();
        let b = (fraction * delta).sin() / delta.sin();
        let x = a * lat1.cos() * lon1.cos() + b * lat2.cos() * lon2.cos();
        let y = a * lat1.cos() * lon1.sin() + b * lat2.cos() * lon2.sin();
        let z = a * lat1.sin() + b * lat2.sin();
        let lat = z.atan2((x * x + y * y).sqrt());
        let lon = y.atan2(x);
        Geographic::new(lon.to_degrees(), lat.to_degrees())
    }

    /// Destination after travelling `distance` meters on the initial `bearing` (degrees).
    ///
    /// Elevation and measure of the origin are kept.
    pub fn destination_point(&self, origin: &Geographic, distance: f64, bearing: f64) -> Geographic {
        let delta = distance / self.radius;
        let theta = bearing.to_radians();
        let (lat1, lon1) = (origin.lat().to_radians(), origin.lon().to_radians());
        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
        Geographic::create(
            lon2.to_degrees(),
            lat2.to_degrees(),
            origin.opt_z(),
            origin.opt_m(),
        )
    }

    /// Signed distance of `point` from the great circle through `start` and `end`.
    ///
    /// Negative values are left of the path.
    pub fn cross_track_distance(&self, point: &Geographic, start: &Geographic, end: &Geographic) -> f64 {
        let d13 = angular_distance(start, point);
        let t13 = self.initial_bearing(start, point).to_radians();
        let t12 = self.initial_bearing(start, end).to_radians();
        (d13.sin() * (t13 - t12).sin()).asin() * self.radius
    }

    /// Distance from `start` to the closest point on the path to `point`.
    pub fn along_track_distance(&self, point: &Geographic, start: &Geographic, end: &Geographic) -> f64 {
        let d13 = angular_distance(start, point);
        let t13 = self.initial_bearing(start, point).to_radians();
        let t12 = self.initial_bearing(start, end).to_radians();
        let dxt = (d13.sin() * (t13 - t12).sin()).asin();
        let dat = (d13.cos() / dxt.cos()).max(-1.0).min(1.0).acos();
        dat * (t12 - t13).cos().signum() * self.radius
    }

    /// Arc segment from an origin along an initial bearing.
    pub fn arc_from(&self, origin: &Geographic, bearing: f64, distance: f64) -> GeodesicArcSegment {
        let destination = self.destination_point(origin, distance, bearing);
        GeodesicArcSegment {
            origin: *origin,
            bearing: wrap_360(bearing),
            distance,
            final_bearing: self.final_bearing(origin, &destination),
            destination,
        }
    }

    /// Arc segment between two positions.
    pub fn arc_between(&self, origin: &Geographic, destination: &Geographic) -> GeodesicArcSegment {
        GeodesicArcSegment {
            origin: *origin,
            bearing: self.initial_bearing(origin, destination),
            distance: self.distance_haversine(origin, destination),
            final_bearing: self.final_bearing(origin, destination),
            destination: *destination,
        }
    }
}

/// Central angle in radians.
fn angular_distance(from: &Geographic, to: &Geographic) -> f64 {
    let (lat1, lat2) = (from.lat().to_radians(), to.lat().to_radians());
    let dlat = lat2 - lat1;
    let dlon = (to.lon() - from.lon()).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great circle arc with its end points, bearings (degrees) and length (meters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicArcSegment {
    pub origin: Geographic,
    pub bearing: f64,
    pub distance: f64,
    pub final_bearing: f64,
    pub destination: Geographic,
}

impl GeodesicArcSegment {
    /// Position at `fraction` of the arc length.
    pub fn point_at(&self, geodesy: &Spherical, fraction: f64) -> Geographic {
        geodesy.intermediate_point(&self.origin, &self.destination, fraction)
    }
}
