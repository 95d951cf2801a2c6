//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::position::{CreatePosition, Geographic, Position};
use std::fmt;

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub name: &'static str,
    /// Semi-major axis in meters
    pub a: f64,
    /// Semi-minor axis in meters
    pub b: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        name: "WGS84",
        a: 6378137.0,
        b: 6356752.314245,
        f: 1.0 / 298.257223563,
    };
    pub const GRS80: Ellipsoid = Ellipsoid {
        name: "GRS80",
        a: 6378137.0,
        b: 6356752.314140,
        f: 1.0 / 298.257222101,
    };
    pub const AIRY1830: Ellipsoid = Ellipsoid {
        name: "Airy1830",
        a: 6377563.396,
        b: 6356256.909,
        f: 1.0 / 299.3249646,
    };
    pub const INTL1924: Ellipsoid = Ellipsoid {
        name: "Intl1924",
        a: 6378388.0,
        b: 6356911.946,
        f: 1.0 / 297.0,
    };
    pub const CLARKE1866: Ellipsoid = Ellipsoid {
        name: "Clarke1866",
        a: 6378206.4,
        b: 6356583.8,
        f: 1.0 / 294.978698214,
    };

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Geographic (degrees, ellipsoidal height) to earth-centered cartesian coordinates.
    pub fn to_geocentric(&self, lon: f64, lat: f64, height: f64) -> (f64, f64, f64) {
        let (sin_phi, cos_phi) = lat.to_radians().sin_cos();
        let (sin_lambda, cos_lambda) = lon.to_radians().sin_cos();
        let e2 = self.e2();
        let nu = self.a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        (
            (nu + height) * cos_phi * cos_lambda,
            (nu + height) * cos_phi * sin_lambda,
            (nu * (1.0 - e2) + height) * sin_phi,
        )
    }

    /// Earth-centered cartesian to geographic `(lon, lat, height)` (Bowring's method).
    pub fn from_geocentric(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let (a, b) = (self.a, self.b);
        let e2 = self.e2();
        let eps2 = e2 / (1.0 - e2);
        let p = (x * x + y * y).sqrt();
        if p == 0.0 {
            // on the polar axis
            let lat = if z > 0.0 {
                90.0
            } else if z < 0.0 {
                -90.0
            } else {
                0.0
            };
            let height = if z == 0.0 { -a } else { z.abs() - b };
            return (0.0, lat, height);
        }
        let r = (p * p + z * z).sqrt();
        let tan_beta = (b * z) / (a * p) * (1.0 + eps2 * b / r);
        let sin_beta = tan_beta / (1.0 + tan_beta * tan_beta).sqrt();
        let cos_beta = sin_beta / tan_beta;
        let phi = if cos_beta.is_nan() {
            0.0
        } else {
            (z + eps2 * b * sin_beta.powi(3)).atan2(p - e2 * a * cos_beta.powi(3))
        };
        let lambda = y.atan2(x);
        let (sin_phi, cos_phi) = phi.sin_cos();
        let nu = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let height = p * cos_phi + z * sin_phi - (a * a / nu);
        (lambda.to_degrees(), phi.to_degrees(), height)
    }
}

/// Helmert 7-parameter transform from WGS 84 to a datum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmert {
    /// Translations in meters
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    /// Scale in ppm
    pub s: f64,
    /// Rotations in arc seconds
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl Helmert {
    pub const IDENTITY: Helmert = Helmert {
        tx: 0.0,
        ty: 0.0,
        tz: 0.0,
        s: 0.0,
        rx: 0.0,
        ry: 0.0,
        rz: 0.0,
    };

    pub fn inverse(&self) -> Helmert {
        Helmert {
            tx: -self.tx,
            ty: -self.ty,
            tz: -self.tz,
            s: -self.s,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
        }
    }

    /// Applies the transform to geocentric coordinates.
    pub fn apply(&self, (x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
        let s1 = self.s / 1e6 + 1.0;
        let rx = (self.rx / 3600.0).to_radians();
        let ry = (self.ry / 3600.0).to_radians();
        let rz = (self.rz / 3600.0).to_radians();
        (
            self.tx + x * s1 - y * rz + z * ry,
            self.ty + x * rz + y * s1 - z * rx,
            self.tz - x * ry + y * rx + z * s1,
        )
    }
}

/// Geodetic datum: an ellipsoid and its relation to WGS 84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    pub name: &'static str,
    pub ellipsoid: Ellipsoid,
    /// Transform from WGS 84 to this datum
    pub transform: Helmert,
    /// EPSG code of the geographic 2D CRS
    pub epsg: u32,
}

impl Datum {
    pub const WGS84: Datum = Datum {
        name: "WGS84",
        ellipsoid: Ellipsoid::WGS84,
        transform: Helmert::IDENTITY,
        epsg: 4326,
    };
    pub const ETRS89: Datum = Datum {
        name: "ETRS89",
        ellipsoid: Ellipsoid::GRS80,
        transform: Helmert {
            tx: 0.054,
            ty: 0.051,
            tz: -0.048,
            s: 0.0,
            rx: 0.000081,
            ry: 0.00049,
            rz: -0.000792,
        },
        epsg: 4258,
    };
    pub const NAD83: Datum = Datum {
        name: "NAD83",
        ellipsoid: Ellipsoid::GRS80,
        transform: Helmert {
            tx: 1.004,
            ty: -1.910,
            tz: -0.515,
            s: -0.0015,
            rx: 0.0267,
            ry: 0.00034,
            rz: 0.011,
        },
        epsg: 4269,
    };
    pub const ED50: Datum = Datum {
        name: "ED50",
        ellipsoid: Ellipsoid::INTL1924,
        transform: Helmert {
            tx: 89.5,
            ty: 93.8,
            tz: 123.1,
            s: -1.2,
            rx: 0.0,
            ry: 0.0,
            rz: 0.156,
        },
        epsg: 4230,
    };
    pub const OSGB36: Datum = Datum {
        name: "OSGB36",
        ellipsoid: Ellipsoid::AIRY1830,
        transform: Helmert {
            tx: -446.448,
            ty: 125.157,
            tz: -542.060,
            s: 20.4894,
            rx: -0.1502,
            ry: -0.2470,
            rz: -0.8421,
        },
        epsg: 4277,
    };

    /// Datum by name (case insensitive).
    pub fn from_name(name: &str) -> Option<Datum> {
        [
            Datum::WGS84,
            Datum::ETRS89,
            Datum::NAD83,
            Datum::ED50,
            Datum::OSGB36,
        ]
        .iter()
        .find(|datum| datum.name.eq_ignore_ascii_case(name))
        .copied()
    }

    /// Converts a position given in this datum into another datum.
    ///
    /// Elevation is taken as ellipsoidal height (0 when absent) and kept
    /// absent for 2D input.
    pub fn convert(&self, position: &Geographic, to: &Datum) -> Geographic {
        if self == to {
            return *position;
        }
        let cartesian =
            self.ellipsoid
                .to_geocentric(position.lon(), position.lat(), position.elev());
        let wgs84 = if *self == Datum::WGS84 {
            cartesian
        } else {
            self.transform.inverse().apply(cartesian)
        };
        let target = if *to == Datum::WGS84 {
            wgs84
        } else {
            to.transform.apply(wgs84)
        };
        let (lon, lat, height) = to.ellipsoid.from_geocentric(target.0, target.1, target.2);
        Geographic::create(
            lon,
            lat,
            position.opt_elev().map(|_| height),
            position.opt_m(),
        )
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
